use crate::logging::Logger;

/// Options for an enumeration. The default reproduces the lenient behaviour:
/// unbound template variables and path steps without continuation markers
/// are ordinary outcomes, not errors.
#[derive(Clone, Debug, Default)]
pub struct MatchConfig {
  /// Raise [crate::error::UnboundTemplate] instead of failing when a
  /// template variable has no binding
  pub strict_templates: bool,
  /// Raise [crate::error::DanglingPath] instead of ending the path when a
  /// step marks nothing but further steps remain
  pub strict_paths: bool,
  /// Receives a trace of the search
  pub logger: Logger,
}
impl MatchConfig {
  /// Same as [MatchConfig::default]
  pub fn new() -> Self { Self::default() }
  /// Set [MatchConfig::strict_templates]
  pub fn with_strict_templates(self, strict_templates: bool) -> Self {
    Self { strict_templates, ..self }
  }
  /// Set [MatchConfig::strict_paths]
  pub fn with_strict_paths(self, strict_paths: bool) -> Self { Self { strict_paths, ..self } }
  /// Set [MatchConfig::logger]
  pub fn with_logger(self, logger: Logger) -> Self { Self { logger, ..self } }
}
