use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::shape::Triangle;

impl<T: Real, const D: usize> Triangle<T, D> {
    /// Computes the [`Aabb`] of this triangle.
    ///
    /// This is the merge of the three degenerate AABBs of its vertices.
    #[inline]
    pub fn local_aabb(&self) -> Aabb<T, D> {
        Aabb::combine(self.vertices().map(Aabb::from_point))
    }
}
