use super::{Node, NodeContent, NodeTag, SharedNode};
use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::shape::Shape;

impl<S: Shape<T, D>, T: Real, const D: usize> Node<S, T, D> {
    /// Panics if the tree isn’t well-formed.
    ///
    /// The tree is well-formed if no node is empty, all the leaves are at the same
    /// depth, and the bounding box cached by every node is exactly the merged bounding
    /// boxes of its payload items or children.
    pub fn assert_well_formed(&self) {
        let _ = self.assert_well_formed_recurse();
    }

    /// Returns the depth of the subtree.
    fn assert_well_formed_recurse(&self) -> usize {
        match &self.content {
            NodeContent::Leaf(data) => {
                assert!(!data.is_empty(), "Found an empty leaf.");
                assert_eq!(
                    self.aabb,
                    Aabb::combine(data.iter().map(|item| item.bounding_box())),
                    "Leaf AABB does not match its payload."
                );
                1
            }
            NodeContent::Interior(children) => {
                assert!(!children.is_empty(), "Found an interior node without children.");
                assert_eq!(
                    self.aabb,
                    Aabb::combine(children.iter().map(|child| child.aabb)),
                    "Interior node AABB does not match its children."
                );
                1 + assert_same_depth(children.iter().map(Self::assert_well_formed_recurse))
            }
        }
    }
}

impl<T: Real, const D: usize> SharedNode<T, D> {
    /// Panics if the tree isn’t well-formed.
    ///
    /// In addition to the checks of [`Node::assert_well_formed`], every node must have
    /// the concrete shape announced by its tag, and every leaf must hold payload items
    /// of type `S`.
    pub fn assert_well_formed<S: Shape<T, D> + 'static>(&self) {
        let _ = self.assert_well_formed_recurse::<S>();
    }

    fn assert_well_formed_recurse<S: Shape<T, D> + 'static>(&self) -> usize {
        match self.tag() {
            NodeTag::Leaf => {
                let data = match self.data::<S>() {
                    Ok(data) => data,
                    Err(e) => panic!("{}", e),
                };
                assert!(!data.is_empty(), "Found an empty leaf.");
                assert_eq!(
                    *self.aabb(),
                    Aabb::combine(data.iter().map(|item| item.bounding_box())),
                    "Leaf AABB does not match its payload."
                );
                1
            }
            NodeTag::Interior => {
                let children = match self.children() {
                    Ok(children) => children,
                    Err(e) => panic!("{}", e),
                };
                assert!(!children.is_empty(), "Found an interior node without children.");
                assert_eq!(
                    *self.aabb(),
                    Aabb::combine(children.iter().map(|child| *child.aabb())),
                    "Interior node AABB does not match its children."
                );
                1 + assert_same_depth(
                    children
                        .iter()
                        .map(|child| child.assert_well_formed_recurse::<S>()),
                )
            }
        }
    }
}

fn assert_same_depth(mut depths: impl Iterator<Item = usize>) -> usize {
    let first = depths.next().unwrap_or(0);

    for depth in depths {
        assert_eq!(depth, first, "Leaves are not all at the same depth.");
    }

    first
}
