//! Spatial partitioning tools.

pub use self::str_tree::{
    InteriorShape, LeafShape, Leaves, Node, NodeContent, NodeError, NodeShape, NodeTag,
    NodeVisitor, PackError, SharedNode, TraversalAction, DEFAULT_LEAF_CAPACITY,
};

pub mod str_tree;
