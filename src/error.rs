//! Abstractions for handling the errors an enumeration can raise under a
//! common trait object.
//!
//! An ordinary match failure is never an error; it only causes backtracking.
//! The types here cover host closures that fail, the diagnostics enabled by
//! [crate::MatchConfig], and uniqueness violations when an environment is
//! turned into a map.

use std::any::Any;
use std::fmt;

use dyn_clone::{clone_box, DynClone};
use intern_all::Tok;

/// Errors that abort an enumeration or a conversion. Do not depend on this
/// trait, refer to [DynMatchError] instead.
pub trait MatchError: Clone + Sized + 'static {
  /// General description of the error condition
  const DESCRIPTION: &'static str;
  /// Specific description of the error including names or concrete data if
  /// possible
  fn message(&self) -> String { Self::DESCRIPTION.to_string() }
  /// Convert the error to a type-erased structure
  fn pack(self) -> MatchErrorObj { Box::new(self) }
}

/// Object-safe equivalent to [MatchError]. Implement that one instead of
/// this. Typically found as [MatchErrorObj]
pub trait DynMatchError: Any + DynClone {
  /// Allow to downcast the base object to distinguish between various errors.
  fn as_any_ref(&self) -> &dyn Any;
  /// Generic description of the error condition
  fn description(&self) -> &str;
  /// Specific description of this particular error
  fn message(&self) -> String;
}

/// Type-erased [MatchError] implementor through the object-trait
/// [DynMatchError].
pub type MatchErrorObj = Box<dyn DynMatchError>;
/// Result of any operation that may hit a [MatchError]
pub type MatchResult<T> = Result<T, MatchErrorObj>;

impl<T: MatchError> DynMatchError for T {
  fn as_any_ref(&self) -> &dyn Any { self }
  fn description(&self) -> &str { Self::DESCRIPTION }
  fn message(&self) -> String { MatchError::message(self) }
}
impl Clone for MatchErrorObj {
  fn clone(&self) -> Self { clone_box(&**self) }
}
impl DynMatchError for MatchErrorObj {
  fn as_any_ref(&self) -> &dyn Any { (**self).as_any_ref() }
  fn description(&self) -> &str { (**self).description() }
  fn message(&self) -> String { (**self).message() }
}
impl fmt::Display for MatchErrorObj {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.description(), self.message())
  }
}
impl fmt::Debug for MatchErrorObj {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "MatchError({self})") }
}

/// A predicate or pattern generator supplied by the host reported a failure.
/// Hosts with richer errors can implement [MatchError] on their own types
/// instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostError(pub String);
impl HostError {
  /// Wrap a message
  pub fn wrap(message: impl Into<String>) -> MatchErrorObj { Self(message.into()).pack() }
}
impl MatchError for HostError {
  const DESCRIPTION: &'static str = "A host function failed during matching";
  fn message(&self) -> String { self.0.clone() }
}

/// A template variable referenced a name that had no binding yet. Only raised
/// when [crate::MatchConfig::strict_templates] is set; otherwise this is an
/// ordinary failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnboundTemplate(pub Tok<String>);
impl MatchError for UnboundTemplate {
  const DESCRIPTION: &'static str = "Template variable refers to an unbound name";
  fn message(&self) -> String { format!("No capture named {} precedes the template", self.0) }
}

/// A path step produced no continuation markers while further steps remained.
/// Only raised when [crate::MatchConfig::strict_paths] is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DanglingPath {
  /// Index of the step that produced no markers
  pub step: usize,
  /// Number of steps that were left unapplied
  pub remaining: usize,
}
impl MatchError for DanglingPath {
  const DESCRIPTION: &'static str = "Path step selected no continuation";
  fn message(&self) -> String {
    format!("Step {} has no path markers but {} more step(s) follow", self.step, self.remaining)
  }
}

/// The same name was bound twice within one environment that was converted
/// into a uniqueness-checked map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateCapture(pub Tok<String>);
impl MatchError for DuplicateCapture {
  const DESCRIPTION: &'static str = "A capture name is bound more than once";
  fn message(&self) -> String { format!("{} appears more than once in the environment", self.0) }
}
