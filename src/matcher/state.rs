//! Search state shared by the engine and the sequencing rules

use std::rc::Rc;

use im::Vector;

use super::env::Captures;
use super::matches::Matches;
use crate::matchable::Matchable;
use crate::pattern::Pattern;

/// What a pending [Task] still has to establish about its datum
#[derive(Clone)]
pub(super) enum Goal<D: Matchable> {
  Match(Pattern<D>),
  /// The remainder of a [Pattern::Path] starting at `step`
  Path { steps: Rc<[Pattern<D>]>, step: usize },
}

/// A pending obligation on the work stack
#[derive(Clone)]
pub(super) struct Task<D: Matchable> {
  pub datum: D,
  pub goal: Goal<D>,
}
impl<D: Matchable> Task<D> {
  pub fn new(datum: D, pattern: Pattern<D>) -> Self { Self { datum, goal: Goal::Match(pattern) } }
  pub fn path(datum: D, steps: Rc<[Pattern<D>]>, step: usize) -> Self {
    Self { datum, goal: Goal::Path { steps, step } }
  }
}

/// The live part of a search branch. All three lists are persistent, so
/// cloning a frame into a choice point is O(1) and later pushes on either
/// copy are invisible to the other.
#[derive(Clone)]
pub(super) struct Frame<D: Matchable> {
  pub captures: Captures<D>,
  /// Top of the stack is the back of the vector
  pub work: Vector<Task<D>>,
  /// Data marked by [Pattern::PathNext] in this branch
  pub nexts: Vector<D>,
}
impl<D: Matchable> Frame<D> {
  pub fn seeded(root: D, pattern: Pattern<D>, captures: Captures<D>) -> Self {
    Self { captures, work: Vector::unit(Task::new(root, pattern)), nexts: Vector::new() }
  }
}

/// A suspended path step whose nested enumeration may still yield further
/// solutions. The work and markers are those of the outer branch at the
/// point where the step began.
pub(super) struct PathTail<D: Matchable> {
  pub work: Vector<Task<D>>,
  pub nexts: Vector<D>,
  pub steps: Rc<[Pattern<D>]>,
  pub step: usize,
  pub nested: Box<Matches<D>>,
}

/// A point to backtrack to
pub(super) enum Choice<D: Matchable> {
  Resume(Frame<D>),
  PathTail(PathTail<D>),
}
