//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};

/// An Axis-Aligned Bounding Box (AABB) in `D` dimensions.
///
/// An AABB is defined by its minimum and maximum corners. Each component of `mins`
/// is smaller than or equal to the corresponding component of `maxs`, except for
/// the [empty](Aabb::empty) box which has inverted infinite bounds.
///
/// The empty box is the identity element of [`Aabb::merged`]: merging it with any
/// box `b` gives back exactly `b`.
///
/// # Example
///
/// ```
/// use bvhpack::bounding_volume::Aabb;
/// use bvhpack::math::Point;
///
/// let a = Aabb::new(Point::from([0.0, 0.0]), Point::from([1.0, 2.0]));
/// let b = Aabb::new(Point::from([-1.0, 1.0]), Point::from([0.5, 3.0]));
/// let ab = a.merged(&b);
///
/// assert_eq!(ab.mins, Point::from([-1.0, 0.0]));
/// assert_eq!(ab.maxs, Point::from([1.0, 3.0]));
/// assert_eq!(Aabb::empty().merged(&ab), ab);
/// ```
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Aabb<T: Real, const D: usize> {
    /// The point with minimum coordinates.
    pub mins: Point<T, D>,
    /// The point with maximum coordinates.
    pub maxs: Point<T, D>,
}

impl<T: Real, const D: usize> Aabb<T, D> {
    /// Creates a new AABB from its minimum and maximum corners.
    ///
    /// Each component of `mins` should be smaller than or equal to the corresponding
    /// component of `maxs`.
    #[inline]
    pub fn new(mins: Point<T, D>, maxs: Point<T, D>) -> Self {
        Aabb { mins, maxs }
    }

    /// The empty AABB.
    ///
    /// Its `mins` are set to `+∞` and its `maxs` to `-∞` so that it is the identity
    /// element of AABB merging.
    #[inline]
    pub fn empty() -> Self {
        Self::new(
            Point::from(Vector::<T, D>::repeat(T::infinity())),
            Point::from(Vector::<T, D>::repeat(T::neg_infinity())),
        )
    }

    /// The degenerate AABB containing only `pt`.
    #[inline]
    pub fn from_point(pt: Point<T, D>) -> Self {
        Self::new(pt, pt)
    }

    /// The smallest AABB containing all the given points.
    ///
    /// Returns the [empty](Self::empty) AABB if `pts` yields nothing.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<T, D>>,
    {
        pts.into_iter().fold(Self::empty(), |mut acc, pt| {
            acc.take_point(pt);
            acc
        })
    }

    /// Merges all the given AABBs, starting from the [empty](Self::empty) AABB.
    pub fn combine<I>(aabbs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        aabbs
            .into_iter()
            .fold(Self::empty(), |acc, aabb| acc.merged(&aabb))
    }

    /// Is this AABB empty?
    ///
    /// An AABB is empty if its `mins` exceed its `maxs` along at least one axis.
    /// A dimension-0 AABB is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        (0..D).any(|i| self.mins[i] > self.maxs[i])
    }

    /// The center of this AABB.
    ///
    /// The center of the empty AABB is undefined (its coordinates are NaN).
    #[inline]
    pub fn center(&self) -> Point<T, D> {
        na::center(&self.mins, &self.maxs)
    }

    /// The extents of this AABB along each axis.
    #[inline]
    pub fn extents(&self) -> Vector<T, D> {
        self.maxs - self.mins
    }

    /// Enlarges this AABB so it also contains the point `pt`.
    #[inline]
    pub fn take_point(&mut self, pt: Point<T, D>) {
        self.mins = self.mins.inf(&pt);
        self.maxs = self.maxs.sup(&pt);
    }

    /// Merges this AABB with another one, in-place.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.mins = self.mins.inf(&other.mins);
        self.maxs = self.maxs.sup(&other.maxs);
    }

    /// The smallest AABB containing both `self` and `other`.
    #[inline]
    pub fn merged(&self, other: &Self) -> Self {
        Aabb {
            mins: self.mins.inf(&other.mins),
            maxs: self.maxs.sup(&other.maxs),
        }
    }

    /// Does this AABB contain the point `pt`?
    #[inline]
    pub fn contains_point(&self, pt: &Point<T, D>) -> bool {
        (0..D).all(|i| pt[i] >= self.mins[i] && pt[i] <= self.maxs[i])
    }

    /// Does this AABB fully contain `other`?
    ///
    /// Every AABB contains the empty AABB.
    #[inline]
    pub fn contains(&self, other: &Self) -> bool {
        other.is_empty()
            || (0..D).all(|i| self.mins[i] <= other.mins[i] && self.maxs[i] >= other.maxs[i])
    }

    /// Does this AABB intersect `other`?
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        na::partial_le(&self.mins, &other.maxs) && na::partial_ge(&self.maxs, &other.mins)
    }
}
