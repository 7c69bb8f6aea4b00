use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::shape::Shape;
use core::ops::Range;

/// A node of the hierarchy attached to a packed [`TriMesh`](super::TriMesh).
///
/// Each node covers the contiguous range `start..end` of triangles (rows of the mesh
/// index buffer). The range of an interior node is the concatenation of the ranges of
/// its children, in order.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeData<T: Real, const D: usize> {
    start: usize,
    end: usize,
    aabb: Aabb<T, D>,
    children: Vec<NodeData<T, D>>,
}

impl<T: Real, const D: usize> NodeData<T, D> {
    /// Creates a node covering the triangles in `range`.
    ///
    /// A reversed range is treated as empty.
    pub fn new(range: Range<usize>, aabb: Aabb<T, D>, children: Vec<Self>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
            aabb,
            children,
        }
    }

    /// Index of the first triangle covered by this node.
    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index past the last triangle covered by this node.
    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    /// The range of triangles covered by this node.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The number of triangles covered by this node.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Does this node cover no triangle?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The bounding box of the triangles covered by this node.
    #[inline]
    pub fn aabb(&self) -> &Aabb<T, D> {
        &self.aabb
    }

    /// The children of this node.
    #[inline]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The number of nodes of this subtree, including `self`.
    pub fn num_nodes(&self) -> usize {
        1 + self.children.iter().map(Self::num_nodes).sum::<usize>()
    }
}

impl<T: Real, const D: usize> Shape<T, D> for NodeData<T, D> {
    #[inline]
    fn bounding_box(&self) -> Aabb<T, D> {
        self.aabb
    }
}
