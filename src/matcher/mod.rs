//! The backtracking search and its entry points
mod config;
mod env;
mod matches;
mod sequence;
mod state;

pub use config::MatchConfig;
pub use env::Env;
use hashbrown::HashMap;
use intern_all::Tok;
pub use matches::Matches;

use crate::error::MatchResult;
use crate::matchable::{preorder, Matchable};
use crate::pattern::Pattern;

/// Enumerate every way `pattern` matches `datum` with the default
/// configuration
pub fn find<D: Matchable>(datum: D, pattern: &Pattern<D>) -> Matches<D> {
  find_with(datum, pattern, MatchConfig::default())
}

/// Enumerate every way `pattern` matches `datum`
pub fn find_with<D: Matchable>(datum: D, pattern: &Pattern<D>, config: MatchConfig) -> Matches<D> {
  Matches::new(datum, pattern.clone(), config)
}

/// Like [find] but each solution is converted with [Env::to_map], so a name
/// bound twice keeps its earliest value
pub fn find_as_map<D: Matchable>(
  datum: D,
  pattern: &Pattern<D>,
) -> impl Iterator<Item = MatchResult<HashMap<Tok<String>, D>>> {
  find(datum, pattern).map(|r| r.map(|env| env.to_map()))
}

/// Match anywhere: run [find] on the root and on each of its descendants in
/// pre-order, concatenating the solutions
pub fn search<D: Matchable>(root: D, pattern: &Pattern<D>) -> impl Iterator<Item = MatchResult<Env<D>>> {
  let pattern = pattern.clone();
  preorder(root).flat_map(move |datum| find(datum, &pattern))
}
