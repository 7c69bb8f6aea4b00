//! Definition of the triangle shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::shape::Shape;

/// A triangle shape.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle<T: Real, const D: usize> {
    /// The triangle first point.
    pub a: Point<T, D>,
    /// The triangle second point.
    pub b: Point<T, D>,
    /// The triangle third point.
    pub c: Point<T, D>,
}

impl<T: Real, const D: usize> From<[Point<T, D>; 3]> for Triangle<T, D> {
    fn from(arr: [Point<T, D>; 3]) -> Self {
        let [a, b, c] = arr;
        Self::new(a, b, c)
    }
}

impl<T: Real, const D: usize> Triangle<T, D> {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<T, D>, b: Point<T, D>, c: Point<T, D>) -> Self {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle, in order.
    #[inline]
    pub fn vertices(&self) -> [Point<T, D>; 3] {
        [self.a, self.b, self.c]
    }

    /// The centroid of this triangle.
    #[inline]
    pub fn center(&self) -> Point<T, D> {
        let third = T::one() / (T::one() + T::one() + T::one());
        Point::from((self.a.coords + self.b.coords + self.c.coords) * third)
    }
}

impl<T: Real, const D: usize> Shape<T, D> for Triangle<T, D> {
    #[inline]
    fn bounding_box(&self) -> Aabb<T, D> {
        self.local_aabb()
    }
}

#[cfg(test)]
mod test {
    use super::Triangle;
    use crate::math::Point;
    use crate::shape::Shape;

    #[test]
    fn triangle_from_array_keeps_vertex_order() {
        let pts = [
            Point::from([0.0, 0.0, 1.0]),
            Point::from([1.0, 0.0, 2.0]),
            Point::from([0.0, 1.0, 3.0]),
        ];
        let tri = Triangle::from(pts);
        assert_eq!(tri.vertices(), pts);
        assert_eq!(tri.a, pts[0]);
        assert_eq!(tri.c, pts[2]);
    }

    #[test]
    fn triangle_center_and_bounding_box() {
        let tri = Triangle::new(
            Point::from([0.0, 0.0]),
            Point::from([3.0, 0.0]),
            Point::from([0.0, 3.0]),
        );
        approx::assert_relative_eq!(tri.center(), Point::from([1.0, 1.0]));

        let aabb = tri.bounding_box();
        assert_eq!(aabb.mins, Point::from([0.0, 0.0]));
        assert_eq!(aabb.maxs, Point::from([3.0, 3.0]));
        assert!(aabb.contains_point(&tri.center()));
    }
}
