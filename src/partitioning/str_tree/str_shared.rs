use super::{Node, NodeContent, NodeVisitor};
use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::shape::Shape;
use alloc::rc::Rc;
use core::any::type_name;
use core::fmt;
use downcast_rs::Downcast;

/// The kind of a node of a [`SharedNode`] tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeTag {
    /// The node holds payload items.
    Leaf,
    /// The node holds child nodes.
    Interior,
}

/// Error returned when a type-erased node does not have the concrete shape its tag
/// announces.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeError {
    /// The concrete shape behind a node does not match its tag, or its payload type is
    /// not the one requested.
    #[error("Invalid node state: a node tagged `{tag:?}` is not a `{expected}`.")]
    InvalidState {
        /// The tag reported by the node.
        tag: NodeTag,
        /// The name of the concrete shape type the node was expected to be.
        expected: &'static str,
    },
}

/// The type-erased content of a [`SharedNode`].
///
/// The shapes built by this crate are [`LeafShape`] and [`InteriorShape`]. The tag
/// returned by [`NodeShape::tag`] decides which of them a node is downcast to when it
/// is visited.
pub trait NodeShape<T: Real, const D: usize>: Downcast {
    /// The bounding box of everything stored under this node.
    fn aabb(&self) -> &Aabb<T, D>;

    /// The kind of this node.
    fn tag(&self) -> NodeTag;
}

/// A leaf of a [`SharedNode`] tree, holding payload items of type `S`.
#[derive(Clone, Debug, PartialEq)]
pub struct LeafShape<S, T: Real, const D: usize> {
    aabb: Aabb<T, D>,
    data: Vec<S>,
}

impl<S: Shape<T, D>, T: Real, const D: usize> LeafShape<S, T, D> {
    /// Creates a leaf holding the given payload items.
    pub fn new(data: Vec<S>) -> Self {
        let aabb = Aabb::combine(data.iter().map(|item| item.bounding_box()));
        Self { aabb, data }
    }
}

impl<S, T: Real, const D: usize> LeafShape<S, T, D> {
    /// The payload items of this leaf.
    #[inline]
    pub fn data(&self) -> &[S] {
        &self.data
    }
}

impl<S: 'static, T: Real, const D: usize> NodeShape<T, D> for LeafShape<S, T, D> {
    #[inline]
    fn aabb(&self) -> &Aabb<T, D> {
        &self.aabb
    }

    #[inline]
    fn tag(&self) -> NodeTag {
        NodeTag::Leaf
    }
}

/// An interior node of a [`SharedNode`] tree.
#[derive(Clone, Debug)]
pub struct InteriorShape<T: Real, const D: usize> {
    aabb: Aabb<T, D>,
    children: Vec<SharedNode<T, D>>,
}

impl<T: Real, const D: usize> InteriorShape<T, D> {
    /// Creates an interior node with the given children.
    pub fn new(children: Vec<SharedNode<T, D>>) -> Self {
        let aabb = Aabb::combine(children.iter().map(|child| *child.aabb()));
        Self { aabb, children }
    }

    /// The children of this node.
    #[inline]
    pub fn children(&self) -> &[SharedNode<T, D>] {
        &self.children
    }
}

impl<T: Real, const D: usize> NodeShape<T, D> for InteriorShape<T, D> {
    #[inline]
    fn aabb(&self) -> &Aabb<T, D> {
        &self.aabb
    }

    #[inline]
    fn tag(&self) -> NodeTag {
        NodeTag::Interior
    }
}

/// A reference-counted handle to a node of a type-erased bounding volume hierarchy.
///
/// Cloning a `SharedNode` is cheap: the clone points to the same node. The type of the
/// payload items stored in the leaves is not part of the handle's type, so it has to
/// be provided again when the leaves are read (see [`SharedNode::data`] and
/// [`SharedNode::accept`]). Reading a leaf with the wrong payload type, or a node whose
/// concrete shape does not match its tag, fails with [`NodeError::InvalidState`].
pub struct SharedNode<T: Real, const D: usize> {
    inner: Rc<dyn NodeShape<T, D>>,
}

impl<T: Real, const D: usize> Clone for SharedNode<T, D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Real, const D: usize> fmt::Debug for SharedNode<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedNode")
            .field("tag", &self.tag())
            .field("aabb", self.aabb())
            .finish()
    }
}

impl<T: Real, const D: usize> SharedNode<T, D> {
    /// Wraps a node shape into a new reference-counted handle.
    pub fn from_shape(shape: impl NodeShape<T, D>) -> Self {
        Self {
            inner: Rc::new(shape),
        }
    }

    /// Creates a leaf holding the given payload items.
    pub fn leaf<S: Shape<T, D> + 'static>(data: Vec<S>) -> Self {
        Self::from_shape(LeafShape::new(data))
    }

    /// Creates an interior node with the given children.
    pub fn interior(children: Vec<Self>) -> Self {
        Self::from_shape(InteriorShape::new(children))
    }

    pub(super) fn leaf_from_parts<S: 'static>(aabb: Aabb<T, D>, data: Vec<S>) -> Self {
        Self::from_shape(LeafShape { aabb, data })
    }

    pub(super) fn interior_from_parts(aabb: Aabb<T, D>, children: Vec<Self>) -> Self {
        Self::from_shape(InteriorShape { aabb, children })
    }

    /// The type-erased shape of this node.
    #[inline]
    pub fn shape(&self) -> &dyn NodeShape<T, D> {
        &*self.inner
    }

    /// The bounding box of everything stored under this node.
    #[inline]
    pub fn aabb(&self) -> &Aabb<T, D> {
        self.shape().aabb()
    }

    /// The kind of this node.
    #[inline]
    pub fn tag(&self) -> NodeTag {
        self.shape().tag()
    }

    /// Is this node tagged as a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.tag() == NodeTag::Leaf
    }

    /// Are `a` and `b` handles to the same node?
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// The number of handles pointing to this node.
    #[inline]
    pub fn strong_count(this: &Self) -> usize {
        Rc::strong_count(&this.inner)
    }

    /// Downcasts this node to `Concrete`, provided it is tagged with `tag`.
    fn downcast<Concrete: 'static>(&self, tag: NodeTag) -> Result<&Concrete, NodeError> {
        let invalid = NodeError::InvalidState {
            tag: self.tag(),
            expected: type_name::<Concrete>(),
        };

        if self.tag() != tag {
            return Err(invalid);
        }

        self.shape()
            .as_any()
            .downcast_ref::<Concrete>()
            .ok_or(invalid)
    }

    /// The concrete leaf behind this node, with payload items of type `S`.
    pub fn as_leaf<S: 'static>(&self) -> Result<&LeafShape<S, T, D>, NodeError> {
        self.downcast(NodeTag::Leaf)
    }

    /// The concrete interior node behind this node.
    pub fn as_interior(&self) -> Result<&InteriorShape<T, D>, NodeError> {
        self.downcast(NodeTag::Interior)
    }

    /// The payload items of this leaf.
    ///
    /// Fails if this node is not a leaf holding items of type `S`.
    pub fn data<S: 'static>(&self) -> Result<&[S], NodeError> {
        self.as_leaf::<S>().map(LeafShape::data)
    }

    /// The children of this interior node.
    ///
    /// Fails if this node is not an interior node.
    pub fn children(&self) -> Result<&[Self], NodeError> {
        self.as_interior().map(InteriorShape::children)
    }

    /// Dispatches to the `visitor` method matching the tag of this node.
    ///
    /// The leaves are expected to hold payload items of type `S`.
    pub fn accept<S, V>(&self, visitor: &mut V) -> Result<V::Output, NodeError>
    where
        S: 'static,
        V: NodeVisitor<S, Self, T, D>,
    {
        match self.tag() {
            NodeTag::Leaf => {
                let leaf = self.as_leaf::<S>()?;
                Ok(visitor.visit_leaf(&leaf.aabb, &leaf.data))
            }
            NodeTag::Interior => {
                let interior = self.as_interior()?;
                Ok(visitor.visit_interior(&interior.aabb, &interior.children))
            }
        }
    }

    /// Builds a value-owned copy of this subtree.
    ///
    /// The payload items are cloned. Fails if any node of the subtree is in an invalid
    /// state, or holds payload items of another type than `S`.
    pub fn to_owned_tree<S: Clone + 'static>(&self) -> Result<Node<S, T, D>, NodeError> {
        self.accept::<S, _>(&mut OwnedTreeBuilder)?
    }
}

impl<T: Real, const D: usize> Shape<T, D> for SharedNode<T, D> {
    #[inline]
    fn bounding_box(&self) -> Aabb<T, D> {
        *self.aabb()
    }
}

struct OwnedTreeBuilder;

impl<S, T, const D: usize> NodeVisitor<S, SharedNode<T, D>, T, D> for OwnedTreeBuilder
where
    S: Clone + 'static,
    T: Real,
{
    type Output = Result<Node<S, T, D>, NodeError>;

    fn visit_leaf(&mut self, aabb: &Aabb<T, D>, data: &[S]) -> Self::Output {
        Ok(Node {
            aabb: *aabb,
            content: NodeContent::Leaf(data.to_vec()),
        })
    }

    fn visit_interior(&mut self, aabb: &Aabb<T, D>, children: &[SharedNode<T, D>]) -> Self::Output {
        let children = children
            .iter()
            .map(|child| child.accept::<S, Self>(&mut *self)?)
            .collect::<Result<_, _>>()?;

        Ok(Node {
            aabb: *aabb,
            content: NodeContent::Interior(children),
        })
    }
}

impl<S: 'static, T: Real, const D: usize> Node<S, T, D> {
    /// Converts this tree into a reference-counted, type-erased tree.
    ///
    /// The cached bounding boxes are moved as-is.
    pub fn into_shared(self) -> SharedNode<T, D> {
        match self.content {
            NodeContent::Leaf(data) => SharedNode::leaf_from_parts(self.aabb, data),
            NodeContent::Interior(children) => SharedNode::interior_from_parts(
                self.aabb,
                children.into_iter().map(Self::into_shared).collect(),
            ),
        }
    }
}
