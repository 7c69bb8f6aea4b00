//! The trait shared by all the shapes that can be packed into a hierarchy.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// Trait implemented by everything that can be packed into a bounding volume hierarchy.
///
/// The only capability the packing algorithm relies on is the computation of an
/// axis-aligned bounding box. Points, boxes, triangles, and the nodes of a packed
/// tree all implement it, which is what allows a tree level to be packed again as
/// the input of the next level.
pub trait Shape<T: Real, const D: usize> {
    /// Computes the AABB of this shape.
    fn bounding_box(&self) -> Aabb<T, D>;
}

impl<T: Real, const D: usize> Shape<T, D> for Point<T, D> {
    #[inline]
    fn bounding_box(&self) -> Aabb<T, D> {
        Aabb::from_point(*self)
    }
}

impl<T: Real, const D: usize> Shape<T, D> for Aabb<T, D> {
    #[inline]
    fn bounding_box(&self) -> Aabb<T, D> {
        *self
    }
}

impl<T: Real, const D: usize, S: Shape<T, D> + ?Sized> Shape<T, D> for &S {
    #[inline]
    fn bounding_box(&self) -> Aabb<T, D> {
        (**self).bounding_box()
    }
}
