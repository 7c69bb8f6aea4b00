use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::{NodeData, Shape, Triangle};
use crate::utils::Array2;
use core::fmt;

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TriMeshBuilderError {
    /// The index buffer must have exactly three columns.
    #[error("the index buffer has {ncols} columns instead of 3.")]
    IndexShapeMismatch {
        /// The number of columns of the index buffer.
        ncols: usize,
    },
    /// The point buffer must have one column per dimension.
    #[error("the point buffer has {found} columns but the mesh has dimension {expected}.")]
    DimensionMismatch {
        /// The dimension of the mesh.
        expected: usize,
        /// The number of columns of the point buffer.
        found: usize,
    },
    /// A mesh cannot have dimension zero.
    #[error("unsupported mesh dimension {0}.")]
    UnsupportedDimension(usize),
    /// A triangle references a point that does not exist.
    #[error("the triangle {triangle} references the point {index}, but there are only {num_points} points.")]
    IndexOutOfBounds {
        /// The row of the triangle in the index buffer.
        triangle: usize,
        /// The invalid point index.
        index: u32,
        /// The number of points of the mesh.
        num_points: usize,
    },
    /// The root node covers triangles that do not exist.
    #[error("the root node ends at {end}, but there are only {num_triangles} triangles.")]
    RootOutOfBounds {
        /// The end of the range covered by the root.
        end: usize,
        /// The number of triangles of the mesh.
        num_triangles: usize,
    },
}

/// A reference to one triangle of a [`TriMesh`], by its row in the index buffer,
/// together with its bounding box.
///
/// This is the payload packed into a tree when a mesh is packed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriangleRef<T: Real, const D: usize> {
    index: usize,
    aabb: Aabb<T, D>,
}

impl<T: Real, const D: usize> TriangleRef<T, D> {
    /// Creates a reference to the `index`-th triangle, with bounding box `aabb`.
    #[inline]
    pub fn new(index: usize, aabb: Aabb<T, D>) -> Self {
        Self { index, aabb }
    }

    /// The row of the referenced triangle in the index buffer.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T: Real, const D: usize> Shape<T, D> for TriangleRef<T, D> {
    #[inline]
    fn bounding_box(&self) -> Aabb<T, D> {
        self.aabb
    }
}

/// A triangle mesh stored in externally provided buffers.
///
/// The point buffer `P` has one row per point and `D` columns. The index buffer `I` has
/// one row per triangle and three columns, each one being the row of a vertex in the
/// point buffer. Once the mesh is [packed](TriMesh::pack), the rows of the index
/// buffer are reordered so that every node of the attached hierarchy covers a
/// contiguous range of triangles.
pub struct TriMesh<T: Real, const D: usize, P, I> {
    pub(super) points: P,
    pub(super) indices: I,
    pub(super) root: Option<NodeData<T, D>>,
}

impl<T: Real, const D: usize, P, I> fmt::Debug for TriMesh<T, D, P, I>
where
    P: Array2<Item = T>,
    I: Array2<Item = u32>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TriMesh")
            .field("num_points", &self.num_points())
            .field("num_triangles", &self.num_triangles())
            .field("root", &self.root)
            .finish()
    }
}

impl<T: Real, const D: usize, P, I> TriMesh<T, D, P, I>
where
    P: Array2<Item = T>,
    I: Array2<Item = u32>,
{
    /// Creates a new triangle mesh from a point buffer and an index buffer.
    ///
    /// The mesh has no hierarchy until it is [packed](Self::pack).
    pub fn new(points: P, indices: I) -> Result<Self, TriMeshBuilderError> {
        if indices.ncols() != 3 {
            return Err(TriMeshBuilderError::IndexShapeMismatch {
                ncols: indices.ncols(),
            });
        }

        if points.ncols() != D {
            return Err(TriMeshBuilderError::DimensionMismatch {
                expected: D,
                found: points.ncols(),
            });
        }

        if D == 0 {
            return Err(TriMeshBuilderError::UnsupportedDimension(D));
        }

        let num_points = points.nrows();
        for triangle in 0..indices.nrows() {
            for k in 0..3 {
                let index = indices.get(triangle, k);
                if index as usize >= num_points {
                    return Err(TriMeshBuilderError::IndexOutOfBounds {
                        triangle,
                        index,
                        num_points,
                    });
                }
            }
        }

        Ok(Self {
            points,
            indices,
            root: None,
        })
    }

    /// Creates a new triangle mesh from buffers that were already packed, and the
    /// hierarchy describing them.
    pub fn with_root(
        points: P,
        indices: I,
        root: NodeData<T, D>,
    ) -> Result<Self, TriMeshBuilderError> {
        let mut mesh = Self::new(points, indices)?;

        if root.end() > mesh.num_triangles() {
            return Err(TriMeshBuilderError::RootOutOfBounds {
                end: root.end(),
                num_triangles: mesh.num_triangles(),
            });
        }

        mesh.root = Some(root);
        Ok(mesh)
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.nrows()
    }

    /// The number of points of this mesh.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.points.nrows()
    }

    /// Gets the `i`-th point of this mesh.
    pub fn point(&self, i: usize) -> Point<T, D> {
        Point::from(core::array::from_fn(|k| self.points.get(i, k)))
    }

    /// The point indices of the `i`-th triangle of this mesh.
    pub fn triangle_indices(&self, i: usize) -> [u32; 3] {
        core::array::from_fn(|k| self.indices.get(i, k))
    }

    /// Gets the `i`-th triangle of this mesh.
    pub fn triangle(&self, i: usize) -> Triangle<T, D> {
        let [a, b, c] = self.triangle_indices(i);
        Triangle::new(
            self.point(a as usize),
            self.point(b as usize),
            self.point(c as usize),
        )
    }

    /// An iterator through all the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle<T, D>> + '_ {
        (0..self.num_triangles()).map(move |i| self.triangle(i))
    }

    /// An iterator through references to all the triangles of this mesh, with their
    /// bounding boxes.
    pub fn triangle_refs(&self) -> impl ExactSizeIterator<Item = TriangleRef<T, D>> + '_ {
        (0..self.num_triangles()).map(move |i| TriangleRef::new(i, self.triangle(i).local_aabb()))
    }

    /// The triangles covered by the given node of the hierarchy of this mesh.
    pub fn node_triangles(
        &self,
        node: &NodeData<T, D>,
    ) -> impl ExactSizeIterator<Item = Triangle<T, D>> + '_ {
        node.range().map(move |i| self.triangle(i))
    }

    /// The point buffer of this mesh.
    #[inline]
    pub fn points(&self) -> &P {
        &self.points
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &I {
        &self.indices
    }

    /// The root of the hierarchy of this mesh, if it was packed.
    #[inline]
    pub fn root(&self) -> Option<&NodeData<T, D>> {
        self.root.as_ref()
    }

    /// Consumes this mesh, returning its point and index buffers.
    pub fn into_buffers(self) -> (P, I) {
        (self.points, self.indices)
    }
}
