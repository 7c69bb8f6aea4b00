use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::partitioning::{Node, PackError};
use crate::shape::{NodeData, TriMesh, TriangleRef};
use crate::utils::Array2;
use alloc::collections::VecDeque;
use core::ops::Range;

/// Error returned when the triangles of a mesh cannot be reordered along a tree.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshPackError {
    /// The triangles could not be packed.
    #[error(transparent)]
    Pack(#[from] PackError),
    /// A triangle of the mesh is not referenced by any leaf of the tree.
    #[error("the triangle {0} is not referenced by the tree.")]
    MissingTriangle(usize),
    /// A triangle of the mesh is referenced more than once by the tree.
    #[error("the triangle {0} is referenced more than once by the tree.")]
    DuplicateTriangle(usize),
    /// The tree references a triangle that does not exist.
    #[error("the tree references the triangle {index}, but there are only {num_triangles} triangles.")]
    TriangleOutOfBounds {
        /// The invalid triangle index.
        index: usize,
        /// The number of triangles of the mesh.
        num_triangles: usize,
    },
    /// Ranges cannot be contiguous in breadth-first order unless all the leaves are at
    /// the same depth.
    #[error("the leaves of the tree are not all at the same depth.")]
    UnbalancedTree,
}

/// A node visited by the breadth-first compaction pass.
struct CompactedNode<T: Real, const D: usize> {
    aabb: Aabb<T, D>,
    /// Rows written for the payload of this node (empty for interior nodes).
    rows: Range<usize>,
    /// Breadth-first indices of the children.
    children: Range<usize>,
}

/// The depth shared by all the leaves of `node`, if any.
///
/// Interior nodes without children count as empty leaves.
fn leaf_depth<S, T: Real, const D: usize>(node: &Node<S, T, D>) -> Option<usize> {
    if node.children().is_empty() {
        return Some(1);
    }

    let mut depths = node.children().iter().map(leaf_depth);
    let first = depths.next()??;
    depths
        .all(|depth| depth == Some(first))
        .then_some(first + 1)
}

fn build_node_data<T: Real, const D: usize>(
    nodes: &[CompactedNode<T, D>],
    id: usize,
) -> NodeData<T, D> {
    let node = &nodes[id];
    let children: Vec<_> = node
        .children
        .clone()
        .map(|child| build_node_data(nodes, child))
        .collect();

    let range = match (children.first(), children.last()) {
        (Some(first), Some(last)) => {
            debug_assert!(children.windows(2).all(|w| w[0].end() == w[1].start()));
            first.start()..last.end()
        }
        _ => node.rows.clone(),
    };

    NodeData::new(range, node.aabb, children)
}

impl<T: Real, const D: usize, P, I> TriMesh<T, D, P, I>
where
    P: Array2<Item = T>,
    I: Array2<Item = u32>,
{
    /// Packs the triangles of this mesh into a tree, then reorders the index buffer
    /// along that tree.
    ///
    /// On success, every node of the new hierarchy (see [`TriMesh::root`]) covers a
    /// contiguous range of triangles. The point buffer is not modified.
    pub fn pack(&mut self, leaf_capacity: usize) -> Result<(), TriMeshPackError> {
        let tree = Node::pack(self.triangle_refs(), leaf_capacity)?;
        self.compact(&tree)
    }

    /// Reorders the index buffer of this mesh along `tree`, and attaches the matching
    /// hierarchy to this mesh.
    ///
    /// The tree is walked in breadth-first order. The triangles referenced by each leaf
    /// are written, in order, to a new index buffer, and every node is assigned the
    /// range of rows written for the leaves below it. Since all the leaves are at the
    /// same depth, these ranges are contiguous, and the range of an interior node is
    /// the concatenation of the ranges of its children.
    ///
    /// The tree must reference every triangle of this mesh exactly once. An interior node
    /// without children is kept as a leaf covering an empty range. The mesh is left
    /// untouched if this fails.
    pub fn compact(&mut self, tree: &Node<TriangleRef<T, D>, T, D>) -> Result<(), TriMeshPackError> {
        let num_triangles = self.num_triangles();

        if leaf_depth(tree).is_none() {
            return Err(TriMeshPackError::UnbalancedTree);
        }

        let mut new_indices = I::with_shape(num_triangles, 3);
        let mut written = vec![false; num_triangles];
        let mut cursor = 0;
        let mut nodes = Vec::new();
        let mut queue = VecDeque::from([tree]);

        while let Some(node) = queue.pop_front() {
            let rows_start = cursor;

            for triangle in node.data() {
                let index = triangle.index();

                if index >= num_triangles {
                    return Err(TriMeshPackError::TriangleOutOfBounds {
                        index,
                        num_triangles,
                    });
                }

                if written[index] {
                    return Err(TriMeshPackError::DuplicateTriangle(index));
                }

                written[index] = true;

                for k in 0..3 {
                    new_indices.set(cursor, k, self.indices.get(index, k));
                }

                cursor += 1;
            }

            let first_child = nodes.len() + 1 + queue.len();
            nodes.push(CompactedNode {
                aabb: *node.aabb(),
                rows: rows_start..cursor,
                children: first_child..first_child + node.children().len(),
            });
            queue.extend(node.children());
        }

        if let Some(missing) = written.iter().position(|done| !done) {
            return Err(TriMeshPackError::MissingTriangle(missing));
        }

        let root = build_node_data(&nodes, 0);
        log::debug!(
            "Compacted {} triangles along a tree of {} nodes.",
            num_triangles,
            nodes.len()
        );

        self.indices = new_indices;
        self.root = Some(root);
        Ok(())
    }
}
