use bvhpack::bounding_volume::Aabb;
use bvhpack::math::Point;
use bvhpack::partitioning::{
    Node, NodeError, NodeShape, NodeTag, NodeVisitor, SharedNode, TraversalAction,
};
use bvhpack::shape::Triangle;

type Tri = Triangle<f32, 3>;

fn fan(len: usize) -> Vec<Tri> {
    (0..len)
        .map(|i| {
            let angle = i as f32 * 0.1;
            Triangle::new(
                Point::origin(),
                Point::from([angle.cos(), angle.sin(), 0.0]),
                Point::from([angle.cos(), angle.sin(), 1.0 + i as f32]),
            )
        })
        .collect()
}

/// Collects the payload items in depth-first order, and the depth of every leaf.
#[derive(Default)]
struct Collect {
    depth: usize,
    items: Vec<Tri>,
    leaf_depths: Vec<usize>,
}

impl NodeVisitor<Tri, SharedNode<f32, 3>, f32, 3> for Collect {
    type Output = Result<(), NodeError>;

    fn visit_leaf(&mut self, _: &Aabb<f32, 3>, data: &[Tri]) -> Self::Output {
        self.items.extend_from_slice(data);
        self.leaf_depths.push(self.depth);
        Ok(())
    }

    fn visit_interior(
        &mut self,
        _: &Aabb<f32, 3>,
        children: &[SharedNode<f32, 3>],
    ) -> Self::Output {
        self.depth += 1;
        for child in children {
            child.accept::<Tri, Self>(self)??;
        }
        self.depth -= 1;
        Ok(())
    }
}

#[test]
fn shared_tree_visits_every_triangle() {
    let triangles = fan(150);
    let root = SharedNode::pack(triangles.clone(), 6).unwrap();
    root.assert_well_formed::<Tri>();

    let mut collect = Collect::default();
    root.accept::<Tri, _>(&mut collect).unwrap().unwrap();

    assert_eq!(collect.items.len(), triangles.len());
    assert!(collect
        .leaf_depths
        .iter()
        .all(|depth| *depth == collect.leaf_depths[0]));

    // The visitor and the owned tree agree on the leaf order.
    let owned = Node::pack(triangles, 6).unwrap();
    let owned_items: Vec<_> = owned
        .leaves()
        .flat_map(|leaf| leaf.data().iter().copied())
        .collect();
    assert_eq!(collect.items, owned_items);
}

#[test]
fn subtrees_can_be_shared_between_parents() {
    let left = SharedNode::pack(fan(10), 2).unwrap();
    let right = SharedNode::leaf(fan(3));

    let a = SharedNode::interior(vec![left.clone(), right.clone()]);
    let b = SharedNode::interior(vec![right.clone(), left.clone()]);
    assert_eq!(SharedNode::strong_count(&left), 3);
    assert_eq!(a.aabb(), b.aabb());

    let mut visited = 0;
    b.traverse(|node| {
        if SharedNode::ptr_eq(node, &left) {
            TraversalAction::Prune
        } else {
            visited += 1;
            TraversalAction::Continue
        }
    })
    .unwrap();
    // `b` and `right` only.
    assert_eq!(visited, 2);
}

/// A leaf storing its triangles in a boxed slice instead of a `LeafShape`.
struct BoxedLeaf {
    aabb: Aabb<f32, 3>,
    triangles: Box<[Tri]>,
}

impl NodeShape<f32, 3> for BoxedLeaf {
    fn aabb(&self) -> &Aabb<f32, 3> {
        &self.aabb
    }

    fn tag(&self) -> NodeTag {
        NodeTag::Leaf
    }
}

#[test]
fn foreign_node_shapes_are_rejected_by_dispatch() {
    let triangles = fan(4);
    let aabb = Aabb::combine(triangles.iter().map(|tri| tri.local_aabb()));
    let node = SharedNode::from_shape(BoxedLeaf {
        aabb,
        triangles: triangles.clone().into_boxed_slice(),
    });

    assert!(node.is_leaf());
    let err = node.data::<Tri>().unwrap_err();
    assert!(matches!(
        err,
        NodeError::InvalidState {
            tag: NodeTag::Leaf,
            ..
        }
    ));
    assert!(err.to_string().contains("Leaf"));

    // The concrete shape is still reachable through an explicit downcast.
    let boxed = node
        .shape()
        .as_any()
        .downcast_ref::<BoxedLeaf>()
        .unwrap();
    assert_eq!(&*boxed.triangles, &triangles[..]);
}
