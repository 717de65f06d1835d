//! The decomposition contract host data must satisfy

use std::fmt::Debug;
use std::iter;

/// Any tree-shaped datum the engine can match against. The datum is viewed as
/// a kind tag and an ordered list of children of the same type.
///
/// Both methods must be pure: decomposing the same value twice during one
/// enumeration has to produce the same kind and the same children in the same
/// order. Captures hold clones of data, so cloning should be cheap (typically
/// an [std::rc::Rc] bump).
pub trait Matchable: Clone + PartialEq + Debug + 'static {
  /// Opaque identifier compared by `Exact` and `Kind` patterns
  type Kind: Clone + PartialEq + Debug;
  /// The kind of this node
  #[must_use]
  fn kind(&self) -> Self::Kind;
  /// The children of this node in order
  #[must_use]
  fn children(&self) -> impl IntoIterator<Item = Self>;
  /// Kind and children together
  #[must_use]
  fn decompose(&self) -> (Self::Kind, Vec<Self>) {
    (self.kind(), self.children().into_iter().collect())
  }
  /// Lazily walk this node and all of its descendants in pre-order. See
  /// [preorder]
  fn preorder(&self) -> impl Iterator<Item = Self> { preorder(self.clone()) }
}

/// Depth first, parents before children, children left to right. Uses an
/// explicit stack, so arbitrarily deep trees are safe.
pub fn preorder<D: Matchable>(root: D) -> impl Iterator<Item = D> {
  let mut stack = vec![root];
  iter::from_fn(move || {
    let next = stack.pop()?;
    let start = stack.len();
    stack.extend(next.children());
    stack[start..].reverse();
    Some(next)
  })
}
