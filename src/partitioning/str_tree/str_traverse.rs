use super::{Node, NodeError, NodeTag, SharedNode};
use crate::math::Real;

/// Controls the traversal of a tree, returned by the closure passed to
/// [`Node::traverse`] or [`SharedNode::traverse`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraversalAction {
    /// The traversal will continue on the children of the tested node.
    Continue,
    /// The traversal will skip all descendants of the tested node.
    Prune,
    /// The traversal will exit immediately.
    EarlyExit,
}

/// Iterator over the leaves of a [`Node`], in depth-first order.
pub struct Leaves<'a, S, T: Real, const D: usize> {
    stack: Vec<&'a Node<S, T, D>>,
}

impl<'a, S, T: Real, const D: usize> Iterator for Leaves<'a, S, T, D> {
    type Item = &'a Node<S, T, D>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_leaf() {
                return Some(node);
            }

            self.stack.extend(node.children().iter().rev());
        }

        None
    }
}

impl<S, T: Real, const D: usize> Node<S, T, D> {
    /// Iterates through the leaves of this subtree, from the first to the last child of
    /// every node.
    pub fn leaves(&self) -> Leaves<'_, S, T, D> {
        Leaves { stack: vec![self] }
    }

    /// Traverses this tree in depth-first order.
    ///
    /// The closure is called on every visited node (interior nodes and leaves) and
    /// decides whether the traversal should descend into its children, skip them, or
    /// stop altogether. Children are visited in order.
    ///
    /// # Example
    ///
    /// ```
    /// use bvhpack::bounding_volume::Aabb;
    /// use bvhpack::math::Point;
    /// use bvhpack::partitioning::{Node, TraversalAction};
    ///
    /// let points: Vec<_> = (0..64).map(|i| Point::from([(i % 8) as f64, (i / 8) as f64])).collect();
    /// let root = Node::pack(points, 4).unwrap();
    /// let region = Aabb::new(Point::from([-0.5, -0.5]), Point::from([1.5, 1.5]));
    ///
    /// let mut found: Vec<&Point<f64, 2>> = vec![];
    /// root.traverse(|node| {
    ///     if !node.aabb().intersects(&region) {
    ///         return TraversalAction::Prune;
    ///     }
    ///
    ///     found.extend(node.data().iter().filter(|pt| region.contains_point(pt)));
    ///     TraversalAction::Continue
    /// });
    ///
    /// assert_eq!(found.len(), 4);
    /// ```
    pub fn traverse<'a>(&'a self, mut check_node: impl FnMut(&'a Self) -> TraversalAction) {
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            match check_node(node) {
                TraversalAction::Continue => stack.extend(node.children().iter().rev()),
                TraversalAction::Prune => {}
                TraversalAction::EarlyExit => return,
            }
        }
    }
}

impl<T: Real, const D: usize> SharedNode<T, D> {
    /// Traverses this tree in depth-first order.
    ///
    /// This follows the same rules as [`Node::traverse`]. Fails if an interior node
    /// reached by the traversal is in an invalid state.
    pub fn traverse<'a>(
        &'a self,
        mut check_node: impl FnMut(&'a Self) -> TraversalAction,
    ) -> Result<(), NodeError> {
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            match check_node(node) {
                TraversalAction::Continue => {
                    if node.tag() == NodeTag::Interior {
                        stack.extend(node.children()?.iter().rev());
                    }
                }
                TraversalAction::Prune => {}
                TraversalAction::EarlyExit => return Ok(()),
            }
        }

        Ok(())
    }
}
