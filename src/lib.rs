#![warn(missing_docs)]
//! Treematch is a lazy backtracking query engine for tree-shaped data.
//!
//! Any type that can describe itself as a kind and an ordered list of
//! children implements [Matchable]. A [Pattern] built from a small closed
//! algebra is then matched against it with [find], which returns a lazy,
//! resumable enumeration of every capture environment the pattern admits.
pub mod error;
pub mod logging;
pub mod matchable;
pub mod matcher;
pub mod meta;
pub mod pattern;
#[cfg(test)]
mod testing;

pub use error::{DynMatchError, HostError, MatchError, MatchErrorObj, MatchResult};
pub use logging::{LogStrategy, Logger};
pub use matchable::{preorder, Matchable};
pub use matcher::{find, find_as_map, find_with, search, Env, MatchConfig, Matches};
pub use meta::PatternKind;
pub use pattern::Pattern;
