/*!
bvhpack
========

**bvhpack** builds bounding volume hierarchies by sort-tile-recursive bulk
loading. Points, boxes, triangles, or any type exposing a bounding box can be
packed into a balanced tree of bounded leaves, either as a value-owned tree or
as a reference-counted, type-erased one. Triangle meshes can be packed in place:
their index buffer is rewritten so that every node of the hierarchy covers one
contiguous range of triangles.

The dimension and the scalar type are generic parameters:

```
use bvhpack::math::Point;
use bvhpack::partitioning::Node;

let points: Vec<Point<f32, 1>> = (0..9).map(|i| Point::from([i as f32])).collect();
let root = Node::pack(points, 3).unwrap();

assert_eq!(root.children().len(), 3);
assert!(root.children().iter().all(|leaf| leaf.data().len() == 3));
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![deny(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::module_inception)]
#![allow(clippy::type_complexity)] // Complains about closures that are fairly simple.
#![deny(unused_qualifications)]

extern crate alloc;
extern crate nalgebra as na;
extern crate num_traits as num;

pub mod bounding_volume;
pub mod partitioning;
pub mod shape;
pub mod utils;

/// Scalar and linear-algebra types used throughout this crate.
pub mod math {
    pub use na::{Point, SVector as Vector};

    /// The scalar types usable as coordinates.
    ///
    /// This is implemented for `f32` and `f64`.
    pub trait Real: na::RealField + num::Float + Copy {}

    impl<T: na::RealField + num::Float + Copy> Real for T {}
}
