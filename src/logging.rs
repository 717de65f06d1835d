//! Minimal logging facility for tracing the search

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Where trace output of the engine goes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LogStrategy {
  /// Write every message to stderr
  StdErr,
  /// Append every message to the file
  File(PathBuf),
  /// Drop messages without formatting them
  #[default]
  Discard,
}

/// Sink for diagnostic messages, cheap to clone
#[derive(Clone, Debug, Default)]
pub struct Logger(LogStrategy);
impl Logger {
  /// Create a logger with the given strategy
  pub fn new(strat: LogStrategy) -> Self { Self(strat) }
  /// Write a message. Failure to write to a file is reported on stderr
  pub fn log(&self, msg: String) {
    match &self.0 {
      LogStrategy::StdErr => eprintln!("{msg}"),
      LogStrategy::File(f) => {
        let written = OpenOptions::new()
          .create(true)
          .append(true)
          .open(f)
          .and_then(|mut file| writeln!(file, "{msg}"));
        if let Err(e) = written {
          eprintln!("failed to log to {}: {e}\n{msg}", f.display())
        }
      },
      LogStrategy::Discard => (),
    }
  }
  /// Only build the message if it's going to be written somewhere
  pub fn log_with(&self, msg: impl FnOnce() -> String) {
    if self.is_active() {
      self.log(msg())
    }
  }
  /// Whether messages are written anywhere
  pub fn is_active(&self) -> bool { self.0 != LogStrategy::Discard }
  /// The configured strategy
  pub fn strat(&self) -> LogStrategy { self.0.clone() }
}
