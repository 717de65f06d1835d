//! Rules that match a sequence of patterns against data chosen at match time:
//! paths descend through marked data, windows slide over the children.

use std::rc::Rc;

use itertools::Itertools;

use super::matches::{push_pairs, Matches};
use super::state::{Choice, Frame, PathTail, Task};
use crate::error::{DanglingPath, MatchError, MatchResult};
use crate::matchable::Matchable;
use crate::pattern::Pattern;

impl<D: Matchable> Matches<D> {
  /// Start step `step` of a path on `datum`. Every solution of the step is
  /// enumerated lazily by a nested search which sees the captures made so
  /// far; the outer search suspends it in a [Choice::PathTail].
  pub(super) fn path(&mut self, datum: D, steps: Rc<[Pattern<D>]>, step: usize) -> MatchResult<bool> {
    let Some(pattern) = steps.get(step).cloned() else { return Ok(true) };
    self.config.logger.log_with(|| format!("path step {step}: {pattern}"));
    let captures = self.frame.captures.clone();
    let mut nested = Matches::seeded(datum, pattern, captures, self.config.clone());
    if !nested.solve()? {
      self.config.logger.log_with(|| format!("path step {step} has no solutions"));
      return Ok(false);
    }
    let work = self.frame.work.clone();
    let nexts = self.frame.nexts.clone();
    self.continue_path(PathTail { work, nexts, steps, step, nested: Box::new(nested) })
  }

  /// Pull the next solution out of a suspended path step
  pub(super) fn resume_path(&mut self, mut tail: PathTail<D>) -> MatchResult<bool> {
    if !tail.nested.solve()? {
      return Ok(false);
    }
    self.continue_path(tail)
  }

  /// Adopt the nested step's current solution and fan out over its markers,
  /// leftmost first. The tail goes under the fan-out so that all markers of
  /// this solution are explored before the step is asked for another one.
  fn continue_path(&mut self, tail: PathTail<D>) -> MatchResult<bool> {
    let captures = tail.nested.captures().clone();
    let marks = tail.nested.marks().iter().cloned().collect_vec();
    let frame = Frame { captures, work: tail.work.clone(), nexts: tail.nexts.clone() };
    let (steps, step) = (tail.steps.clone(), tail.step + 1);
    self.choices.push(Choice::PathTail(tail));
    self.frame = frame;
    let mut marks = marks.into_iter();
    let Some(first) = marks.next() else {
      if self.config.strict_paths && step < steps.len() {
        return Err(DanglingPath { step: step - 1, remaining: steps.len() - step }.pack());
      }
      return Ok(true);
    };
    for mark in marks.rev() {
      let mut alt = self.frame.clone();
      alt.work.push_back(Task::path(mark, steps.clone(), step));
      self.branch(alt);
    }
    self.frame.work.push_back(Task::path(first, steps, step));
    Ok(true)
  }

  /// Slide `items` over the children of `datum`. Windows other than the
  /// leftmost become choice points, the leftmost continues immediately.
  pub(super) fn window(&mut self, datum: D, items: &[Pattern<D>]) -> bool {
    let children = datum.children().into_iter().collect_vec();
    let width = items.len();
    if children.len() < width {
      return false;
    }
    for start in (1..=children.len() - width).rev() {
      let mut alt = self.frame.clone();
      push_pairs(&mut alt.work, &children[start..start + width], items);
      self.branch(alt);
    }
    push_pairs(&mut self.frame.work, &children[..width], items)
  }
}

#[cfg(test)]
mod test {
  use itertools::Itertools;

  use crate::error::{DanglingPath, DynMatchError, MatchResult};
  use crate::matcher::{find, find_with, MatchConfig};
  use crate::pattern::Pattern;
  use crate::testing::{leaf, leaves, list, node, Tree, TreeKind};

  type P = Pattern<Tree>;
  type Solution = Vec<(String, Tree)>;

  fn run(t: Tree, p: &P) -> Vec<Solution> {
    let solutions = find(t, p).collect::<MatchResult<Vec<_>>>().unwrap();
    solutions.iter().map(|env| env.iter().map(|(n, d)| (n.to_string(), d.clone())).collect()).collect()
  }
  fn sol(pairs: &[(&str, Tree)]) -> Solution {
    pairs.iter().map(|(n, d)| (n.to_string(), d.clone())).collect()
  }
  fn values(solutions: &[Solution], name: &str) -> Vec<u8> {
    solutions
      .iter()
      .map(|s| s.iter().find(|(n, _)| n == name).and_then(|(_, d)| d.value()).unwrap())
      .collect_vec()
  }

  #[test]
  fn window_pairs() {
    let out = run(leaves([1, 2, 3, 4]), &P::window([P::capture("a"), P::capture("b")]));
    assert_eq!(out, vec![
      sol(&[("a", leaf(1)), ("b", leaf(2))]),
      sol(&[("a", leaf(2)), ("b", leaf(3))]),
      sol(&[("a", leaf(3)), ("b", leaf(4))]),
    ]);
  }

  #[test]
  fn window_three_captures() {
    let p = P::window([P::capture("a"), P::capture("b"), P::capture("c")]);
    let out = run(leaves([1, 2, 3, 4, 5]), &p);
    assert_eq!(values(&out, "a"), vec![1, 2, 3]);
    assert_eq!(values(&out, "c"), vec![3, 4, 5]);
  }

  #[test]
  fn window_too_wide() {
    let t = node(leaf(1), leaf(2));
    let wide = P::window([P::Wild, P::Wild, P::Wild]);
    assert_eq!(run(t.clone(), &wide), Vec::<Solution>::new());
    let p = P::or(wide, P::capture("a"));
    assert_eq!(run(t.clone(), &p), vec![sol(&[("a", t)])]);
  }

  #[test]
  fn empty_window_matches_every_gap() {
    assert_eq!(run(leaves([1, 2, 3]), &P::window([])).len(), 4);
    assert_eq!(run(leaf(1), &P::window([])).len(), 1);
  }

  #[test]
  fn path_fans_out_left_to_right() {
    let t = node(node(leaf(1), leaf(2)), node(leaf(3), leaf(4)));
    let fork = P::contents([P::PathNext, P::PathNext]);
    let out = run(t, &P::path([fork.clone(), fork, P::capture("a")]));
    assert_eq!(values(&out, "a"), vec![1, 2, 3, 4]);
  }

  #[test]
  fn empty_path() {
    assert_eq!(run(leaf(1), &P::path([])), vec![sol(&[])]);
  }

  #[test]
  fn path_without_markers_ends_early() {
    let p = P::path([P::capture("a"), P::atom(leaf(9))]);
    assert_eq!(run(leaf(1), &p), vec![sol(&[("a", leaf(1))])]);
    // a failing step still fails the whole path
    let p = P::path([P::atom(leaf(2)), P::Wild]);
    assert_eq!(run(leaf(1), &p), Vec::<Solution>::new());
  }

  #[test]
  fn strict_paths_report_dangling_steps() {
    let p = P::path([P::capture("a"), P::Wild, P::Wild]);
    let config = MatchConfig::new().with_strict_paths(true);
    let err = find_with(leaf(1), &p, config).next().unwrap().unwrap_err();
    let dangling = err.as_any_ref().downcast_ref::<DanglingPath>();
    assert_eq!(dangling, Some(&DanglingPath { step: 0, remaining: 2 }));
    // marking nothing on the last step is fine
    let config = MatchConfig::new().with_strict_paths(true);
    let p = P::path([P::PathNext, P::capture("a")]);
    assert_eq!(find_with(leaf(1), &p, config).count(), 1);
  }

  #[test]
  fn markers_on_last_step() {
    let p = P::path([P::contents([P::PathNext, P::PathNext])]);
    assert_eq!(run(node(leaf(1), leaf(2)), &p).len(), 2);
  }

  #[test]
  fn window_inside_path() {
    let t = leaves([1, 1, 2, 2, 3, 3]);
    let p = P::path([P::window([P::capture("a"), P::PathNext]), P::template("a")]);
    assert_eq!(values(&run(t, &p), "a"), vec![1, 2, 3]);
  }

  #[test]
  fn path_inside_window() {
    let t = list([node(leaf(1), leaf(2)), leaf(3), node(leaf(4), leaf(5)), node(leaf(5), leaf(6)), node(
      leaf(6),
      leaf(7),
    )]);
    let p = P::window([
      P::path([P::exact(TreeKind::Node, [P::Wild, P::capture("a")])]),
      P::path([P::exact(TreeKind::Node, [P::template("a"), P::capture("b")])]),
    ]);
    assert_eq!(run(t, &p), vec![
      sol(&[("a", leaf(5)), ("b", leaf(6))]),
      sol(&[("a", leaf(6)), ("b", leaf(7))]),
    ]);
  }

  #[test]
  fn path_sees_earlier_captures() {
    let t = node(leaf(1), leaves([1, 2, 3]));
    let p = P::exact(TreeKind::Node, [
      P::capture("a"),
      P::path([P::exact(TreeKind::List, [P::template("a"), P::PathNext, P::PathNext]), P::capture("b")]),
    ]);
    assert_eq!(run(t, &p), vec![
      sol(&[("a", leaf(1)), ("b", leaf(2))]),
      sol(&[("a", leaf(1)), ("b", leaf(3))]),
    ]);
  }

  fn two_paths() -> P {
    P::exact(TreeKind::Node, [
      P::path([
        P::exact(TreeKind::Node, [P::PathNext, P::PathNext]),
        P::exact(TreeKind::Node, [P::capture("a"), P::capture("c")]),
      ]),
      P::path([P::exact(TreeKind::List, [P::template("a"), P::PathNext, P::PathNext]), P::capture("b")]),
    ])
  }

  #[test]
  fn path_captures_flow_into_later_paths() {
    let t = node(node(node(leaf(1), leaf(4)), node(leaf(1), leaf(5))), leaves([1, 2, 3]));
    let out = run(t, &two_paths());
    assert_eq!(out, vec![
      sol(&[("a", leaf(1)), ("c", leaf(4)), ("b", leaf(2))]),
      sol(&[("a", leaf(1)), ("c", leaf(4)), ("b", leaf(3))]),
      sol(&[("a", leaf(1)), ("c", leaf(5)), ("b", leaf(2))]),
      sol(&[("a", leaf(1)), ("c", leaf(5)), ("b", leaf(3))]),
    ]);
  }

  #[test]
  fn path_captures_can_fail_later_paths() {
    let t = node(node(node(leaf(1), leaf(4)), node(leaf(2), leaf(5))), leaves([1, 2, 3]));
    assert_eq!(values(&run(t, &two_paths()), "c"), vec![4, 4]);
    let t = node(node(node(leaf(1), leaf(4)), node(leaf(1), leaf(5))), leaves([0, 2, 3]));
    assert_eq!(run(t, &two_paths()), Vec::<Solution>::new());
  }

  #[test]
  fn window_captures_flow_into_path() {
    let t = node(leaves([1, 4, 1, 5]), leaves([1, 2, 3]));
    let p = P::exact(TreeKind::Node, [
      P::window([P::capture("a"), P::capture("c")]),
      P::path([P::exact(TreeKind::List, [P::template("a"), P::PathNext, P::PathNext]), P::capture("b")]),
    ]);
    let out = run(t, &p);
    assert_eq!(values(&out, "c"), vec![4, 4, 5, 5]);
    assert_eq!(values(&out, "b"), vec![2, 3, 2, 3]);
  }

  #[test]
  fn window_captures_flow_into_window() {
    let t = node(leaves([1, 4, 2, 5]), leaves([1, 2, 3]));
    let p = P::exact(TreeKind::Node, [
      P::window([P::capture("a"), P::capture("c")]),
      P::window([P::template("a"), P::capture("b")]),
    ]);
    assert_eq!(run(t, &p), vec![
      sol(&[("a", leaf(1)), ("c", leaf(4)), ("b", leaf(2))]),
      sol(&[("a", leaf(2)), ("c", leaf(5)), ("b", leaf(3))]),
    ]);
  }

  #[test]
  fn match_with_inside_window() {
    let successor = |env: &crate::matcher::Env<Tree>| match env.get("a").and_then(Tree::value) {
      Some(x) => P::predicate(move |t| t.value() == Some(x + 1)),
      None => P::Wild,
    };
    let p = P::window([P::capture("a"), P::match_with(successor)]);
    assert_eq!(values(&run(leaves([1, 2, 3, 4, 7]), &p), "a"), vec![1, 2, 3]);
  }

  #[test]
  fn nested_paths_keep_outer_markers() {
    // the outer path marks both children, the inner path runs on each one
    let t = node(node(leaf(1), leaf(2)), node(leaf(3), leaf(4)));
    let inner = P::path([P::contents([P::Wild, P::PathNext]), P::capture("x")]);
    let p = P::path([P::contents([P::PathNext, P::PathNext]), inner]);
    assert_eq!(values(&run(t, &p), "x"), vec![2, 4]);
  }

  #[test]
  fn step_solutions_are_pulled_lazily() {
    let t = leaves([1, 2, 3, 4]);
    let p = P::path([P::window([P::PathNext]), P::capture("x")]);
    let mut m = find(t, &p);
    let first = m.advance().unwrap().unwrap();
    assert_eq!(first.get("x"), Some(&leaf(1)));
    assert_eq!(m.map(|r| r.unwrap().get("x").and_then(Tree::value).unwrap()).collect_vec(), vec![
      2, 3, 4
    ]);
  }
}
