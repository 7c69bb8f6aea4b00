use na::{DMatrix, Scalar};
use num::Zero;

/// Abstraction over a 2D array, accessed by rows and columns.
///
/// This is how a [`TriMesh`](crate::shape::TriMesh) reads its point buffer (one row per
/// point, one column per coordinate) and reads or rewrites its index buffer (one row per
/// triangle, three columns). Any storage providing these few operations can back a mesh.
pub trait Array2 {
    /// The type of elements.
    type Item;

    /// The number of rows of this array.
    fn nrows(&self) -> usize;

    /// The number of columns of this array.
    fn ncols(&self) -> usize;

    /// The total number of elements of this array.
    #[inline]
    fn len(&self) -> usize {
        self.nrows() * self.ncols()
    }

    /// Is this array empty?
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the element on the `(i, j)`-th cell of this array.
    fn get(&self, i: usize, j: usize) -> Self::Item;

    /// Sets the element on the `(i, j)`-th cell of this array.
    fn set(&mut self, i: usize, j: usize, val: Self::Item);

    /// Allocates a new array with `nrows` rows and `ncols` columns, filled with zeros.
    fn with_shape(nrows: usize, ncols: usize) -> Self
    where
        Self: Sized;
}

impl<T: Scalar + Zero> Array2 for DMatrix<T> {
    type Item = T;

    #[inline]
    fn nrows(&self) -> usize {
        self.nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols()
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> Self::Item {
        self[(i, j)].clone()
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, val: Self::Item) {
        self[(i, j)] = val
    }

    #[inline]
    fn with_shape(nrows: usize, ncols: usize) -> Self {
        DMatrix::zeros(nrows, ncols)
    }
}

/// Row-major storage: one fixed-size array per row.
///
/// This is the layout of `Vec<[u32; 3]>` index buffers and `Vec<[f32; 3]>` point
/// buffers.
impl<T: Copy + Zero, const C: usize> Array2 for Vec<[T; C]> {
    type Item = T;

    #[inline]
    fn nrows(&self) -> usize {
        <[[T; C]]>::len(self)
    }

    #[inline]
    fn ncols(&self) -> usize {
        C
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> Self::Item {
        self[i][j]
    }

    #[inline]
    fn set(&mut self, i: usize, j: usize, val: Self::Item) {
        self[i][j] = val
    }

    #[inline]
    fn with_shape(nrows: usize, ncols: usize) -> Self {
        assert_eq!(
            ncols, C,
            "a row-major buffer with {} columns cannot be allocated with {} columns",
            C, ncols
        );
        vec![[T::zero(); C]; nrows]
    }
}
