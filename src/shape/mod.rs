//! Shapes supported by bvhpack.

#[doc(inline)]
pub use self::shape::Shape;
pub use self::triangle::Triangle;
pub use self::trimesh::{TriMesh, TriMeshBuilderError, TriangleRef};
pub use self::trimesh_node_data::NodeData;
pub use self::trimesh_pack::TriMeshPackError;

#[doc(hidden)]
pub mod shape;
mod triangle;
mod trimesh;
mod trimesh_node_data;
mod trimesh_pack;
