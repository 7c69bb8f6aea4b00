use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::shape::Shape;

/// The content of a [`Node`]: either a list of payload items or a list of child nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeContent<S, T: Real, const D: usize> {
    /// A leaf, holding payload items directly.
    Leaf(Vec<S>),
    /// An interior node, owning its children.
    Interior(Vec<Node<S, T, D>>),
}

/// A node of a value-owned bounding volume hierarchy.
///
/// Every node owns its content, so the tree is strictly hierarchical. The bounding box
/// of each node is computed once, when the node is created, and is equal to the
/// merged bounding boxes of its payload items (for a leaf) or of its children (for an
/// interior node). Trees are immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Node<S, T: Real, const D: usize> {
    pub(super) aabb: Aabb<T, D>,
    pub(super) content: NodeContent<S, T, D>,
}

impl<S, T: Real, const D: usize> Node<S, T, D> {
    /// Creates a leaf holding the given payload items.
    pub fn leaf(data: Vec<S>) -> Self
    where
        S: Shape<T, D>,
    {
        let aabb = Aabb::combine(data.iter().map(|item| item.bounding_box()));
        Self {
            aabb,
            content: NodeContent::Leaf(data),
        }
    }

    /// Creates an interior node owning the given children.
    pub fn interior(children: Vec<Self>) -> Self {
        let aabb = Aabb::combine(children.iter().map(|child| child.aabb));
        Self {
            aabb,
            content: NodeContent::Interior(children),
        }
    }

    /// The bounding box of everything stored under this node.
    #[inline]
    pub fn aabb(&self) -> &Aabb<T, D> {
        &self.aabb
    }

    /// The content of this node.
    #[inline]
    pub fn content(&self) -> &NodeContent<S, T, D> {
        &self.content
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Leaf(_))
    }

    /// The payload items of this node if it is a leaf, or an empty slice otherwise.
    #[inline]
    pub fn data(&self) -> &[S] {
        match &self.content {
            NodeContent::Leaf(data) => data,
            NodeContent::Interior(_) => &[],
        }
    }

    /// The children of this node if it is an interior node, or an empty slice otherwise.
    #[inline]
    pub fn children(&self) -> &[Self] {
        match &self.content {
            NodeContent::Leaf(_) => &[],
            NodeContent::Interior(children) => children,
        }
    }

    /// The total number of payload items stored in the leaves of this subtree.
    pub fn num_items(&self) -> usize {
        match &self.content {
            NodeContent::Leaf(data) => data.len(),
            NodeContent::Interior(children) => children.iter().map(Self::num_items).sum(),
        }
    }

    /// The number of leaves of this subtree.
    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// The number of nodes of this subtree, including `self`.
    pub fn num_nodes(&self) -> usize {
        1 + self.children().iter().map(Self::num_nodes).sum::<usize>()
    }

    /// The number of levels of this subtree.
    ///
    /// A single leaf has a depth of 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Self::depth)
            .max()
            .unwrap_or(0)
    }

    /// Consumes this node, returning its bounding box and content.
    pub fn into_parts(self) -> (Aabb<T, D>, NodeContent<S, T, D>) {
        (self.aabb, self.content)
    }
}

impl<S, T: Real, const D: usize> Shape<T, D> for Node<S, T, D> {
    #[inline]
    fn bounding_box(&self) -> Aabb<T, D> {
        self.aabb
    }
}
