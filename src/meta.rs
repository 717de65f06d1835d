//! Patterns viewed as data, so that patterns can be queried with patterns.
//!
//! A pattern decomposes into a [PatternKind] tag and its direct
//! sub-patterns. Leaf payloads such as capture names, embedded atoms and kinds
//! live in the tag; host closures are opaque and only equal to themselves.

use std::rc::Rc;

use intern_all::Tok;

use crate::matchable::Matchable;
use crate::pattern::Pattern;

/// The tag of a [Pattern] node when the pattern is matched as data
#[derive(Clone, Debug, PartialEq)]
pub enum PatternKind<D: Matchable> {
  /// Wildcard
  Wild,
  /// Carries the embedded datum
  Atom(D),
  /// Carries the bound name
  Capture(Tok<String>),
  /// Carries the referenced name
  TemplateVar(Tok<String>),
  /// Carries the required kind
  Exact(D::Kind),
  /// Children only
  Contents,
  /// Carries the required kind
  Kind(D::Kind),
  /// Conjunction
  And,
  /// Alternative
  Or,
  /// Path marker
  PathNext,
  /// Sequence of steps
  Path,
  /// Window
  SubContentPath,
  /// Opaque host test
  Predicate,
  /// Opaque host generator
  MatchWith,
}

impl<D: Matchable> Matchable for Pattern<D> {
  type Kind = PatternKind<D>;
  fn kind(&self) -> PatternKind<D> {
    match self {
      Self::Wild => PatternKind::Wild,
      Self::Atom(d) => PatternKind::Atom(d.clone()),
      Self::Capture(n) => PatternKind::Capture(n.clone()),
      Self::TemplateVar(n) => PatternKind::TemplateVar(n.clone()),
      Self::Exact(k, _) => PatternKind::Exact(k.clone()),
      Self::Contents(_) => PatternKind::Contents,
      Pattern::Kind(k) => PatternKind::Kind(k.clone()),
      Self::And(..) => PatternKind::And,
      Self::Or(..) => PatternKind::Or,
      Self::PathNext => PatternKind::PathNext,
      Self::Path(_) => PatternKind::Path,
      Self::SubContentPath(_) => PatternKind::SubContentPath,
      Self::Predicate(_) => PatternKind::Predicate,
      Self::MatchWith(_) => PatternKind::MatchWith,
    }
  }
  fn children(&self) -> impl IntoIterator<Item = Self> {
    match self {
      Self::And(l, r) | Self::Or(l, r) => vec![(**l).clone(), (**r).clone()],
      Self::Exact(_, items)
      | Self::Contents(items)
      | Self::Path(items)
      | Self::SubContentPath(items) => items.to_vec(),
      _ => vec![],
    }
  }
}

impl<D: Matchable> PartialEq for Pattern<D> {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Self::Wild, Self::Wild) | (Self::PathNext, Self::PathNext) => true,
      (Self::Atom(a), Self::Atom(b)) => a == b,
      (Self::Capture(a), Self::Capture(b)) | (Self::TemplateVar(a), Self::TemplateVar(b)) => a == b,
      (Self::Exact(k1, a), Self::Exact(k2, b)) => k1 == k2 && a == b,
      (Self::Contents(a), Self::Contents(b))
      | (Self::Path(a), Self::Path(b))
      | (Self::SubContentPath(a), Self::SubContentPath(b)) => a == b,
      (Pattern::Kind(a), Pattern::Kind(b)) => a == b,
      (Self::And(l1, r1), Self::And(l2, r2)) | (Self::Or(l1, r1), Self::Or(l2, r2)) =>
        l1 == l2 && r1 == r2,
      (Self::Predicate(a), Self::Predicate(b)) => Rc::ptr_eq(a, b),
      (Self::MatchWith(a), Self::MatchWith(b)) => Rc::ptr_eq(a, b),
      _ => false,
    }
  }
}

impl<D: Matchable> Pattern<D> {
  /// Every name bound by a [Pattern::Capture] in this pattern, in pre-order
  /// with duplicates. Patterns produced at match time by [Pattern::MatchWith]
  /// are not visible here.
  pub fn captures(&self) -> Vec<Tok<String>> {
    self
      .preorder()
      .filter_map(|p| match p {
        Self::Capture(name) => Some(name),
        _ => None,
      })
      .collect()
  }
}
