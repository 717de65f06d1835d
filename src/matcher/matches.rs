use std::iter::FusedIterator;
use std::rc::Rc;

use im::Vector;

use super::config::MatchConfig;
use super::env::{lookup, Captures, Env};
use super::state::{Choice, Frame, Goal, Task};
use crate::error::{MatchError, MatchResult, UnboundTemplate};
use crate::matchable::Matchable;
use crate::pattern::Pattern;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Progress {
  /// The current frame has not produced a solution yet
  Searching,
  /// The current frame holds a solution that was already handed out
  Yielded,
  /// Nothing more to find, or an error occurred
  Exhausted,
}

/// Lazy enumeration of every way a pattern matches a datum.
///
/// Each call to [Matches::advance] resumes the search where the previous one
/// stopped. Solutions come depth first: the left side of an `Or`, the leftmost
/// window and the first path marker are explored before their alternatives.
/// The search uses explicit stacks, so suspending between solutions holds no
/// native call frames and dropping the enumerator at any point is harmless.
pub struct Matches<D: Matchable> {
  root: D,
  pattern: Pattern<D>,
  /// Bindings visible from the start, used by nested path steps
  seed: Captures<D>,
  pub(super) config: Rc<MatchConfig>,
  pub(super) frame: Frame<D>,
  pub(super) choices: Vec<Choice<D>>,
  progress: Progress,
}
impl<D: Matchable> Matches<D> {
  /// Start enumerating the solutions of `pattern` against `root`
  pub fn new(root: D, pattern: Pattern<D>, config: MatchConfig) -> Self {
    Self::seeded(root, pattern, Vector::new(), Rc::new(config))
  }

  pub(super) fn seeded(
    root: D,
    pattern: Pattern<D>,
    seed: Captures<D>,
    config: Rc<MatchConfig>,
  ) -> Self {
    let frame = Frame::seeded(root.clone(), pattern.clone(), seed.clone());
    Self { root, pattern, seed, config, frame, choices: Vec::new(), progress: Progress::Searching }
  }

  /// Discard all progress and start over from the root
  pub fn reset(&mut self) {
    self.frame = Frame::seeded(self.root.clone(), self.pattern.clone(), self.seed.clone());
    self.choices.clear();
    self.progress = Progress::Searching;
  }

  /// Find the next solution. `Ok(None)` means the enumeration is exhausted.
  /// After an error the enumerator stays exhausted until [Matches::reset].
  pub fn advance(&mut self) -> MatchResult<Option<Env<D>>> {
    Ok(self.solve()?.then(|| Env(self.frame.captures.clone())))
  }

  /// Markers collected by the most recent solution
  pub(super) fn marks(&self) -> &Vector<D> { &self.frame.nexts }

  /// Bindings of the most recent solution
  pub(super) fn captures(&self) -> &Captures<D> { &self.frame.captures }

  /// Move the current frame to the next solution. Returns false once
  /// exhausted.
  pub(super) fn solve(&mut self) -> MatchResult<bool> {
    let found = match self.progress {
      Progress::Exhausted => return Ok(false),
      Progress::Searching => self.run(),
      Progress::Yielded => match self.backtrack() {
        Ok(true) => self.run(),
        other => other,
      },
    };
    self.progress = match found {
      Ok(true) => Progress::Yielded,
      _ => Progress::Exhausted,
    };
    found
  }

  fn run(&mut self) -> MatchResult<bool> {
    while let Some(Task { datum, goal }) = self.frame.work.pop_back() {
      let ok = match goal {
        Goal::Match(pattern) => self.apply(datum, pattern)?,
        Goal::Path { steps, step } => self.path(datum, steps, step)?,
      };
      if !ok && !self.backtrack()? {
        self.config.logger.log_with(|| "search exhausted".to_string());
        return Ok(false);
      }
    }
    self.config.logger.log_with(|| format!("solution {:?}", Env(self.frame.captures.clone())));
    Ok(true)
  }

  /// Restore the most recent choice point that still leads somewhere.
  /// Returns false if there are none left.
  pub(super) fn backtrack(&mut self) -> MatchResult<bool> {
    while let Some(choice) = self.choices.pop() {
      self.config.logger.log_with(|| format!("backtrack, {} choice(s) left", self.choices.len()));
      match choice {
        Choice::Resume(frame) => {
          self.frame = frame;
          return Ok(true);
        },
        Choice::PathTail(tail) =>
          if self.resume_path(tail)? {
            return Ok(true);
          },
      }
    }
    Ok(false)
  }

  /// Save a branch to be tried after the current one is exhausted
  pub(super) fn branch(&mut self, alt: Frame<D>) {
    self.choices.push(Choice::Resume(alt));
    self.config.logger.log_with(|| format!("choice point #{}", self.choices.len()));
  }

  /// Interpret one pattern against one datum. Returns false on a match
  /// failure.
  fn apply(&mut self, datum: D, pattern: Pattern<D>) -> MatchResult<bool> {
    match pattern {
      Pattern::Wild => Ok(true),
      Pattern::Atom(value) => Ok(datum == value),
      Pattern::Capture(name) => {
        self.frame.captures.push_back((name, datum));
        Ok(true)
      },
      Pattern::TemplateVar(name) => match lookup(&self.frame.captures, &name) {
        Some(bound) => Ok(*bound == datum),
        None if self.config.strict_templates => Err(UnboundTemplate(name).pack()),
        None => Ok(false),
      },
      Pattern::Exact(kind, items) => {
        let (actual, children) = datum.decompose();
        Ok(actual == kind && push_pairs(&mut self.frame.work, &children, &items))
      },
      Pattern::Contents(items) => {
        let children = datum.children().into_iter().collect::<Vec<_>>();
        Ok(push_pairs(&mut self.frame.work, &children, &items))
      },
      Pattern::Kind(kind) => Ok(datum.kind() == kind),
      Pattern::And(left, right) => {
        self.frame.work.push_back(Task::new(datum.clone(), (*right).clone()));
        self.frame.work.push_back(Task::new(datum, (*left).clone()));
        Ok(true)
      },
      Pattern::Or(left, right) => {
        let mut alt = self.frame.clone();
        alt.work.push_back(Task::new(datum.clone(), (*right).clone()));
        self.branch(alt);
        self.frame.work.push_back(Task::new(datum, (*left).clone()));
        Ok(true)
      },
      Pattern::PathNext => {
        self.frame.nexts.push_back(datum);
        Ok(true)
      },
      Pattern::Path(steps) => self.path(datum, steps, 0),
      Pattern::SubContentPath(items) => Ok(self.window(datum, &items)),
      Pattern::Predicate(f) => f(&datum),
      Pattern::MatchWith(f) => {
        let pattern = f(&Env(self.frame.captures.clone()))?;
        self.frame.work.push_back(Task::new(datum, pattern));
        Ok(true)
      },
    }
  }
}

/// Push `(datum, pattern)` pairs so that the leftmost is processed first.
/// Returns false without touching the stack if the lengths differ.
pub(super) fn push_pairs<D: Matchable>(
  work: &mut Vector<Task<D>>,
  data: &[D],
  patterns: &[Pattern<D>],
) -> bool {
  if data.len() != patterns.len() {
    return false;
  }
  for (datum, pattern) in data.iter().zip(patterns).rev() {
    work.push_back(Task::new(datum.clone(), pattern.clone()));
  }
  true
}

impl<D: Matchable> Iterator for Matches<D> {
  type Item = MatchResult<Env<D>>;
  fn next(&mut self) -> Option<Self::Item> { self.advance().transpose() }
}
impl<D: Matchable> FusedIterator for Matches<D> {}
