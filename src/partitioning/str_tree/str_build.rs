use super::str_level::{pack_level, PackedGroup, Sequential, SortBuckets};
use super::{Node, NodeContent, SharedNode};
use crate::math::Real;
use crate::shape::Shape;

#[cfg(feature = "parallel")]
use super::str_level::Parallel;

/// A reasonable leaf capacity for callers without specific requirements.
pub const DEFAULT_LEAF_CAPACITY: usize = 8;

/// Error returned when a set of shapes cannot be packed into a tree.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PackError {
    /// There is nothing to pack.
    #[error("Cannot pack an empty set of shapes.")]
    EmptyInput,
    /// Leaves must be allowed to hold at least one item.
    #[error("The leaf capacity must be at least 1.")]
    ZeroLeafCapacity,
    /// Shapes of dimension zero cannot be sorted along any axis.
    #[error("Cannot pack shapes of dimension {0}.")]
    UnsupportedDimension(usize),
}

/// Packs `shapes` into a tree, level by level, until a single root node remains.
///
/// The first level groups the shapes into leaves built by `make_leaf`. Every following
/// level groups the nodes of the previous one into interior nodes built by
/// `make_interior`, with a capacity of at least 2 so the number of nodes decreases at
/// each level.
fn pack_tree<X, S, N, T, const D: usize>(
    shapes: Vec<S>,
    leaf_capacity: usize,
    mut make_leaf: impl FnMut(PackedGroup<S, T, D>) -> N,
    mut make_interior: impl FnMut(PackedGroup<N, T, D>) -> N,
) -> Result<N, PackError>
where
    X: SortBuckets<S, T, D> + SortBuckets<N, T, D>,
    S: Shape<T, D>,
    N: Shape<T, D>,
    T: Real,
{
    if shapes.is_empty() {
        return Err(PackError::EmptyInput);
    }
    if leaf_capacity == 0 {
        return Err(PackError::ZeroLeafCapacity);
    }
    if D == 0 {
        return Err(PackError::UnsupportedDimension(D));
    }

    let num_shapes = shapes.len();
    let mut nodes: Vec<N> = pack_level::<X, S, T, D>(shapes, leaf_capacity)
        .into_iter()
        .map(&mut make_leaf)
        .collect();
    let num_leaves = nodes.len();
    let interior_capacity = leaf_capacity.max(2);
    let mut depth = 1;

    while nodes.len() > 1 {
        nodes = pack_level::<X, N, T, D>(nodes, interior_capacity)
            .into_iter()
            .map(&mut make_interior)
            .collect();
        depth += 1;
    }

    log::debug!(
        "Packed {} shapes into {} leaves (capacity {}), tree depth: {}.",
        num_shapes,
        num_leaves,
        leaf_capacity,
        depth
    );

    nodes.pop().ok_or(PackError::EmptyInput)
}

impl<S, T: Real, const D: usize> Node<S, T, D> {
    fn from_leaf_group(group: PackedGroup<S, T, D>) -> Self {
        Self {
            aabb: group.aabb,
            content: NodeContent::Leaf(group.items),
        }
    }

    fn from_interior_group(group: PackedGroup<Self, T, D>) -> Self {
        Self {
            aabb: group.aabb,
            content: NodeContent::Interior(group.items),
        }
    }
}

impl<S: Shape<T, D>, T: Real, const D: usize> Node<S, T, D> {
    /// Bulk-loads `shapes` into a new tree, with at most about `leaf_capacity` shapes per
    /// leaf.
    ///
    /// All the leaves of the resulting tree are at the same depth. Packing the same
    /// shapes, in the same order, always gives the same tree (as long as no two shapes
    /// have the same center coordinate along any axis).
    ///
    /// Each leaf holds at most `leaf_capacity` shapes when the number of shapes is
    /// `leaf_capacity * k^D` for some integer `k`. Otherwise, the number of leaves is
    /// the largest `D`-th power not exceeding `shapes.len() / leaf_capacity` (and at
    /// least 1), and the shapes are spread as evenly as possible among them.
    ///
    /// # Errors
    ///
    /// Fails if `shapes` is empty, if `leaf_capacity` is zero, or if `D` is zero.
    pub fn pack(
        shapes: impl IntoIterator<Item = S>,
        leaf_capacity: usize,
    ) -> Result<Self, PackError> {
        pack_tree::<Sequential, _, _, T, D>(
            shapes.into_iter().collect(),
            leaf_capacity,
            Self::from_leaf_group,
            Self::from_interior_group,
        )
    }

    /// Bulk-loads `shapes` into a new tree, sorting independent buckets in parallel.
    ///
    /// The result is identical to [`Node::pack`].
    #[cfg(feature = "parallel")]
    pub fn par_pack(
        shapes: impl IntoIterator<Item = S>,
        leaf_capacity: usize,
    ) -> Result<Self, PackError>
    where
        S: Send,
    {
        pack_tree::<Parallel, _, _, T, D>(
            shapes.into_iter().collect(),
            leaf_capacity,
            Self::from_leaf_group,
            Self::from_interior_group,
        )
    }
}

impl<T: Real, const D: usize> SharedNode<T, D> {
    /// Bulk-loads `shapes` into a new reference-counted tree.
    ///
    /// The tree has the same structure as the one built by [`Node::pack`] on the same
    /// input.
    ///
    /// # Errors
    ///
    /// Fails if `shapes` is empty, if `leaf_capacity` is zero, or if `D` is zero.
    pub fn pack<S: Shape<T, D> + 'static>(
        shapes: impl IntoIterator<Item = S>,
        leaf_capacity: usize,
    ) -> Result<Self, PackError> {
        pack_tree::<Sequential, _, _, T, D>(
            shapes.into_iter().collect(),
            leaf_capacity,
            |group| SharedNode::leaf_from_parts(group.aabb, group.items),
            |group| SharedNode::interior_from_parts(group.aabb, group.items),
        )
    }

    /// Bulk-loads `shapes` into a new reference-counted tree, sorting independent
    /// buckets in parallel.
    ///
    /// Reference-counted nodes cannot be shared between threads, so the tree is packed
    /// as a value-owned tree first, then converted.
    #[cfg(feature = "parallel")]
    pub fn par_pack<S: Shape<T, D> + Send + 'static>(
        shapes: impl IntoIterator<Item = S>,
        leaf_capacity: usize,
    ) -> Result<Self, PackError> {
        Node::par_pack(shapes, leaf_capacity).map(Node::into_shared)
    }
}
