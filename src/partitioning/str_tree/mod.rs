//! Bounding volume hierarchies bulk-loaded with the sort-tile-recursive (STR) algorithm.
//!
//! A tree is built bottom-up, one level at a time. Each level sorts its items along
//! every axis in turn and slices them into buckets, so that items close to each other
//! in space end up under the same node. The first level groups the input shapes into
//! leaves, and every following level groups the nodes of the previous one, until a
//! single root remains.
//!
//! Two tree representations are produced by the same packing routine:
//! - [`Node`], a value-owned tree generic over its payload type.
//! - [`SharedNode`], a reference-counted handle to a type-erased [`NodeShape`], where
//!   the payload type is only recovered (with a checked downcast) when visiting a leaf.

pub use str_build::{PackError, DEFAULT_LEAF_CAPACITY};
pub use str_node::{Node, NodeContent};
pub use str_shared::{InteriorShape, LeafShape, NodeError, NodeShape, NodeTag, SharedNode};
pub use str_traverse::{Leaves, TraversalAction};
pub use str_visitor::NodeVisitor;

mod str_build;
mod str_level;
mod str_node;
mod str_shared;
mod str_traverse;
mod str_validation;
mod str_visitor;
