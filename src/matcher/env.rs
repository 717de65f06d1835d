use std::fmt;

use hashbrown::HashMap;
use im::Vector;
use intern_all::Tok;
use itertools::Itertools;

use crate::error::{DuplicateCapture, MatchError, MatchResult};
use crate::matchable::Matchable;

/// Bindings in the order they were made. Names may repeat; lookups always
/// see the earliest binding.
pub(super) type Captures<D> = Vector<(Tok<String>, D)>;

pub(super) fn lookup<'a, D: Matchable>(captures: &'a Captures<D>, name: &Tok<String>) -> Option<&'a D> {
  captures.iter().find(|(n, _)| n == name).map(|(_, d)| d)
}

/// The capture environment of one solution. Cloning is cheap because the
/// underlying list is shared with the search state.
#[derive(Clone, PartialEq)]
pub struct Env<D: Matchable>(pub(super) Captures<D>);
impl<D: Matchable> Env<D> {
  /// An environment with no bindings
  pub fn new() -> Self { Self(Vector::new()) }
  /// The earliest datum bound to `name`
  pub fn get(&self, name: &str) -> Option<&D> {
    self.0.iter().find(|(n, _)| n.as_str() == name).map(|(_, d)| d)
  }
  /// The earliest datum bound to the interned `name`
  pub fn get_tok(&self, name: &Tok<String>) -> Option<&D> { lookup(&self.0, name) }
  /// All bindings in the order they were made, duplicates included
  pub fn iter(&self) -> impl Iterator<Item = (&Tok<String>, &D)> + '_ {
    self.0.iter().map(|(n, d)| (n, d))
  }
  /// Names in binding order, duplicates included
  pub fn names(&self) -> impl Iterator<Item = &Tok<String>> + '_ { self.0.iter().map(|(n, _)| n) }
  /// Number of bindings, duplicates included
  pub fn len(&self) -> usize { self.0.len() }
  /// Whether nothing was bound
  pub fn is_empty(&self) -> bool { self.0.is_empty() }
  /// Convert to a map. If a name is bound more than once the earliest binding
  /// wins, consistently with template variables.
  pub fn to_map(&self) -> HashMap<Tok<String>, D> {
    let mut map = HashMap::with_capacity(self.len());
    for (name, datum) in self.0.iter() {
      map.entry(name.clone()).or_insert_with(|| datum.clone());
    }
    map
  }
  /// Convert to a map, failing with [DuplicateCapture] if any name is bound
  /// more than once.
  pub fn to_unique_map(&self) -> MatchResult<HashMap<Tok<String>, D>> {
    let mut map = HashMap::with_capacity(self.len());
    for (name, datum) in self.0.iter() {
      if map.insert(name.clone(), datum.clone()).is_some() {
        return Err(DuplicateCapture(name.clone()).pack());
      }
    }
    Ok(map)
  }
}
impl<D: Matchable> Default for Env<D> {
  fn default() -> Self { Self::new() }
}
impl<D: Matchable> FromIterator<(Tok<String>, D)> for Env<D> {
  fn from_iter<T: IntoIterator<Item = (Tok<String>, D)>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}
impl<D: Matchable> fmt::Debug for Env<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{{{}}}", self.0.iter().map(|(n, d)| format!("${n} = {d:?}")).join(", "))
  }
}
