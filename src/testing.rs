//! Sample datum shared by the unit tests

use std::rc::Rc;

use crate::matchable::Matchable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeKind {
  Leaf,
  Node,
  List,
  /// Never produced by a [Tree]; handy for kind mismatches
  Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tree {
  Leaf(u8),
  Node(Rc<Tree>, Rc<Tree>),
  List(Rc<Vec<Tree>>),
}
impl Tree {
  pub fn value(&self) -> Option<u8> {
    match self {
      Self::Leaf(n) => Some(*n),
      _ => None,
    }
  }
}
impl Matchable for Tree {
  type Kind = TreeKind;
  fn kind(&self) -> TreeKind {
    match self {
      Self::Leaf(_) => TreeKind::Leaf,
      Self::Node(..) => TreeKind::Node,
      Self::List(_) => TreeKind::List,
    }
  }
  fn children(&self) -> impl IntoIterator<Item = Self> {
    match self {
      Self::Leaf(_) => vec![],
      Self::Node(l, r) => vec![(**l).clone(), (**r).clone()],
      Self::List(items) => items.to_vec(),
    }
  }
}

pub fn leaf(n: u8) -> Tree { Tree::Leaf(n) }
pub fn node(l: Tree, r: Tree) -> Tree { Tree::Node(Rc::new(l), Rc::new(r)) }
pub fn list(items: impl IntoIterator<Item = Tree>) -> Tree {
  Tree::List(Rc::new(items.into_iter().collect()))
}
pub fn leaves(values: impl IntoIterator<Item = u8>) -> Tree { list(values.into_iter().map(leaf)) }
