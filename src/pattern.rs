//! The closed algebra of patterns
//!
//! Patterns are immutable values built once and read during matching. All
//! composite payloads are reference counted, so cloning a pattern or handing
//! the same sub-pattern to several parents is cheap.

use std::fmt;
use std::rc::Rc;

use intern_all::{i, Tok};
use itertools::Itertools;
use trait_set::trait_set;

use crate::error::MatchResult;
use crate::matchable::Matchable;
use crate::matcher::Env;

trait_set! {
  /// A pure test on a single datum. An [Err] aborts the enumeration.
  pub trait PredicateFn<D> = Fn(&D) -> MatchResult<bool>;
  /// Produces a pattern from the captures bound so far. An [Err] aborts the
  /// enumeration.
  pub trait MatchWithFn<D: Matchable> = Fn(&Env<D>) -> MatchResult<Pattern<D>>;
}

/// A query over data of type `D`. See the constructor functions for the
/// meaning of each variant.
#[derive(Clone)]
pub enum Pattern<D: Matchable> {
  /// Matches anything, captures nothing
  Wild,
  /// Matches data equal to the embedded value
  Atom(D),
  /// Matches anything and binds it to the name
  Capture(Tok<String>),
  /// Matches data equal to the earliest binding of the name
  TemplateVar(Tok<String>),
  /// Kind must be equal and the children are matched one-to-one
  Exact(D::Kind, Rc<[Pattern<D>]>),
  /// Like [Pattern::Exact] but the kind is ignored
  Contents(Rc<[Pattern<D>]>),
  /// Only the kind is compared
  Kind(D::Kind),
  /// Both sides match the same datum, left first
  And(Rc<Pattern<D>>, Rc<Pattern<D>>),
  /// Either side matches the same datum, left first, both are enumerated
  Or(Rc<Pattern<D>>, Rc<Pattern<D>>),
  /// Marks the datum where the next step of the enclosing [Pattern::Path]
  /// continues
  PathNext,
  /// Each step is matched against a datum selected by [Pattern::PathNext] in
  /// the previous step
  Path(Rc<[Pattern<D>]>),
  /// Matches every contiguous window of the children, leftmost first
  SubContentPath(Rc<[Pattern<D>]>),
  /// Host-supplied test
  Predicate(Rc<dyn PredicateFn<D>>),
  /// Host-supplied pattern computed from the captures so far
  MatchWith(Rc<dyn MatchWithFn<D>>),
}

impl<D: Matchable> Pattern<D> {
  /// Bind the datum to `name`
  pub fn capture(name: &str) -> Self { Self::Capture(i(name)) }
  /// Require equality with the datum already bound to `name`. An unbound
  /// name simply fails unless [crate::MatchConfig::strict_templates] is set.
  pub fn template(name: &str) -> Self { Self::TemplateVar(i(name)) }
  /// Require equality with `datum`
  pub fn atom(datum: D) -> Self { Self::Atom(datum) }
  /// Require the kind and exactly one child per sub-pattern
  pub fn exact(kind: D::Kind, children: impl IntoIterator<Item = Self>) -> Self {
    Self::Exact(kind, children.into_iter().collect())
  }
  /// Require exactly one child per sub-pattern regardless of kind
  pub fn contents(children: impl IntoIterator<Item = Self>) -> Self {
    Self::Contents(children.into_iter().collect())
  }
  /// Require the kind, ignore the children
  pub fn kind(kind: D::Kind) -> Self { Pattern::Kind(kind) }
  /// Both must match the same datum
  pub fn and(left: Self, right: Self) -> Self { Self::And(Rc::new(left), Rc::new(right)) }
  /// Either may match the same datum, left solutions come first
  pub fn or(left: Self, right: Self) -> Self { Self::Or(Rc::new(left), Rc::new(right)) }
  /// Sequential traversal. A step that marks nothing with [Pattern::PathNext]
  /// ends the path, the remaining steps are not applied.
  pub fn path(steps: impl IntoIterator<Item = Self>) -> Self {
    Self::Path(steps.into_iter().collect())
  }
  /// Sliding window over the children
  pub fn window(items: impl IntoIterator<Item = Self>) -> Self {
    Self::SubContentPath(items.into_iter().collect())
  }
  /// Infallible predicate
  pub fn predicate(f: impl Fn(&D) -> bool + 'static) -> Self {
    Self::Predicate(Rc::new(move |d: &D| -> MatchResult<bool> { Ok(f(d)) }))
  }
  /// Predicate that may fail with an error
  pub fn try_predicate(f: impl PredicateFn<D> + 'static) -> Self { Self::Predicate(Rc::new(f)) }
  /// Infallible pattern generator
  pub fn match_with(f: impl Fn(&Env<D>) -> Self + 'static) -> Self {
    Self::MatchWith(Rc::new(move |env: &Env<D>| -> MatchResult<Self> { Ok(f(env)) }))
  }
  /// Pattern generator that may fail with an error
  pub fn try_match_with(f: impl MatchWithFn<D> + 'static) -> Self { Self::MatchWith(Rc::new(f)) }
  /// A pattern that never matches
  pub fn never() -> Self { Self::predicate(|_| false) }
  /// Conjunction of any number of patterns. Empty is [Pattern::Wild]
  pub fn all(patterns: impl IntoIterator<Item = Self>) -> Self {
    let mut patterns = patterns.into_iter().collect_vec();
    match patterns.pop() {
      None => Self::Wild,
      Some(last) => patterns.into_iter().rev().fold(last, |acc, p| Self::and(p, acc)),
    }
  }
  /// Disjunction of any number of patterns. Empty is [Pattern::never]
  pub fn any(patterns: impl IntoIterator<Item = Self>) -> Self {
    let mut patterns = patterns.into_iter().collect_vec();
    match patterns.pop() {
      None => Self::never(),
      Some(last) => patterns.into_iter().rev().fold(last, |acc, p| Self::or(p, acc)),
    }
  }
}

// ################ Display ################

fn seq<D: Matchable>(items: &[Pattern<D>]) -> String { items.iter().join(" ") }

impl<D: Matchable> fmt::Display for Pattern<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Wild => write!(f, "_"),
      Self::Atom(d) => write!(f, "{d:?}"),
      Self::Capture(n) => write!(f, "${n}"),
      Self::TemplateVar(n) => write!(f, "={n}"),
      Self::Exact(k, cs) => write!(f, "{k:?}({})", seq(cs)),
      Self::Contents(cs) => write!(f, "({})", seq(cs)),
      Pattern::Kind(k) => write!(f, "{k:?}(..)"),
      Self::And(l, r) => write!(f, "({l} & {r})"),
      Self::Or(l, r) => write!(f, "({l} | {r})"),
      Self::PathNext => write!(f, ">"),
      Self::Path(ps) => write!(f, "path[{}]", ps.iter().join(", ")),
      Self::SubContentPath(ps) => write!(f, "window[{}]", seq(ps)),
      Self::Predicate(_) => write!(f, "<pred>"),
      Self::MatchWith(_) => write!(f, "<with>"),
    }
  }
}
impl<D: Matchable> fmt::Debug for Pattern<D> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Pattern({self})") }
}
