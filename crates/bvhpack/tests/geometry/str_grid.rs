use bvhpack::bounding_volume::Aabb;
use bvhpack::math::{Point, Vector};
use bvhpack::partitioning::{Node, PackError, TraversalAction, DEFAULT_LEAF_CAPACITY};
use bvhpack::shape::Shape;

/// A sphere, packed through its bounding box only.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Ball {
    center: Point<f64, 3>,
    radius: f64,
}

impl Shape<f64, 3> for Ball {
    fn bounding_box(&self) -> Aabb<f64, 3> {
        let half_extents = Vector::<f64, 3>::repeat(self.radius);
        Aabb::new(self.center - half_extents, self.center + half_extents)
    }
}

fn random_balls(len: usize) -> Vec<Ball> {
    let mut rng = oorandom::Rand64::new(42);
    (0..len)
        .map(|_| Ball {
            center: Point::from([
                rng.rand_float() * 50.0,
                rng.rand_float() * 50.0,
                rng.rand_float() * 50.0,
            ]),
            radius: rng.rand_float() + 0.1,
        })
        .collect()
}

#[test]
fn nine_points_pack_into_three_leaves() {
    let points: Vec<Point<f32, 1>> = (0..9).rev().map(|i| Point::from([i as f32])).collect();
    let root = Node::pack(points, 3).unwrap();

    assert_eq!(root.children().len(), 3);
    assert!(root.children().iter().all(|leaf| leaf.data().len() == 3));
    assert_eq!(root.aabb().mins, Point::from([0.0]));
    assert_eq!(root.aabb().maxs, Point::from([8.0]));
}

#[test]
fn grid_root_covers_all_points() {
    let grid: Vec<Point<f64, 2>> = (0..3)
        .flat_map(|x| (0..3).map(move |y| Point::from([x as f64, y as f64])))
        .collect();

    for capacity in [1, 3] {
        let root = Node::pack(grid.clone(), capacity).unwrap();
        root.assert_well_formed();
        assert_eq!(root.num_items(), 9);
        assert_eq!(
            *root.aabb(),
            Aabb::new(Point::from([0.0, 0.0]), Point::from([2.0, 2.0]))
        );
    }
}

#[test]
fn empty_input_is_rejected() {
    assert_eq!(
        Node::pack(Vec::<Ball>::new(), DEFAULT_LEAF_CAPACITY),
        Err(PackError::EmptyInput)
    );
}

#[test]
fn custom_shapes_are_packed_by_bounding_box() {
    let balls = random_balls(1000);
    let root = Node::pack(balls.clone(), DEFAULT_LEAF_CAPACITY).unwrap();
    root.assert_well_formed();

    assert_eq!(root.num_items(), balls.len());
    assert_eq!(
        *root.aabb(),
        Aabb::combine(balls.iter().map(|ball| ball.bounding_box()))
    );

    // floor(cbrt(1000 / 8)) = 5 slices per axis.
    assert_eq!(root.num_leaves(), 125);
    assert!(root
        .leaves()
        .all(|leaf| leaf.data().len() == DEFAULT_LEAF_CAPACITY));

    // Every leaf only holds balls that it bounds.
    for leaf in root.leaves() {
        for ball in leaf.data() {
            assert!(leaf.aabb().contains(&ball.bounding_box()));
        }
    }
}

#[test]
fn pruned_traversal_finds_the_same_balls_as_a_linear_scan() {
    let balls = random_balls(500);
    let root = Node::pack(balls.clone(), 4).unwrap();
    let region = Aabb::new(
        Point::from([10.0, 10.0, 10.0]),
        Point::from([30.0, 25.0, 40.0]),
    );

    let mut found = vec![];
    root.traverse(|node| {
        if !node.aabb().intersects(&region) {
            return TraversalAction::Prune;
        }

        found.extend(
            node.data()
                .iter()
                .filter(|ball| ball.bounding_box().intersects(&region))
                .copied(),
        );
        TraversalAction::Continue
    });

    let mut expected: Vec<_> = balls
        .into_iter()
        .filter(|ball| ball.bounding_box().intersects(&region))
        .collect();
    assert!(!expected.is_empty());

    let by_center = |a: &Ball, b: &Ball| {
        a.center
            .coords
            .as_slice()
            .partial_cmp(b.center.coords.as_slice())
            .unwrap()
    };
    found.sort_by(by_center);
    expected.sort_by(by_center);
    assert_eq!(found, expected);
}
