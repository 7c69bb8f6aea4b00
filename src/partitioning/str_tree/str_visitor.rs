use super::{Node, NodeContent};
use crate::bounding_volume::Aabb;
use crate::math::Real;

/// Trait implemented by operations dispatched on the kind of a tree node.
///
/// `S` is the type of the payload items stored in the leaves, and `N` the type of the
/// nodes of the tree (either [`Node`] or [`SharedNode`](super::SharedNode)). Recursive
/// visitors descend into the children by calling `accept` on them again.
///
/// # Example
///
/// ```
/// use bvhpack::bounding_volume::Aabb;
/// use bvhpack::math::Point;
/// use bvhpack::partitioning::{Node, NodeVisitor};
///
/// struct CountItems;
///
/// impl NodeVisitor<Point<f32, 2>, Node<Point<f32, 2>, f32, 2>, f32, 2> for CountItems {
///     type Output = usize;
///
///     fn visit_leaf(&mut self, _: &Aabb<f32, 2>, data: &[Point<f32, 2>]) -> usize {
///         data.len()
///     }
///
///     fn visit_interior(
///         &mut self,
///         _: &Aabb<f32, 2>,
///         children: &[Node<Point<f32, 2>, f32, 2>],
///     ) -> usize {
///         children.iter().map(|child| child.accept(&mut *self)).sum()
///     }
/// }
///
/// let points: Vec<_> = (0..20).map(|i| Point::from([i as f32, 0.0])).collect();
/// let root = Node::pack(points, 2).unwrap();
/// assert_eq!(root.accept(&mut CountItems), 20);
/// ```
pub trait NodeVisitor<S, N, T: Real, const D: usize> {
    /// The value returned by each visit.
    type Output;

    /// Visits a leaf, with its bounding box and payload items.
    fn visit_leaf(&mut self, aabb: &Aabb<T, D>, data: &[S]) -> Self::Output;

    /// Visits an interior node, with its bounding box and children.
    fn visit_interior(&mut self, aabb: &Aabb<T, D>, children: &[N]) -> Self::Output;
}

impl<S, T: Real, const D: usize> Node<S, T, D> {
    /// Dispatches to the `visitor` method matching the kind of this node.
    ///
    /// Value-owned nodes always know their kind, so this cannot fail.
    pub fn accept<V>(&self, visitor: &mut V) -> V::Output
    where
        V: NodeVisitor<S, Self, T, D>,
    {
        match &self.content {
            NodeContent::Leaf(data) => visitor.visit_leaf(&self.aabb, data),
            NodeContent::Interior(children) => visitor.visit_interior(&self.aabb, children),
        }
    }
}
