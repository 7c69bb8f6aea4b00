use bvhpack::bounding_volume::Aabb;
use bvhpack::shape::{NodeData, TriMesh, TriMeshBuilderError};
use bvhpack::utils::Array2;
use nalgebra::DMatrix;

/// A random soup of disjoint triangles in the unit cube.
fn random_soup(num_triangles: usize) -> (DMatrix<f32>, DMatrix<u32>) {
    let mut rng = oorandom::Rand32::new(1234);
    let points = DMatrix::from_fn(num_triangles * 3, 3, |_, _| rng.rand_float());
    let indices = DMatrix::from_fn(num_triangles, 3, |i, j| (3 * i + j) as u32);
    (points, indices)
}

fn sorted_rows<I: Array2<Item = u32>>(indices: &I) -> Vec<[u32; 3]> {
    let mut rows: Vec<_> = (0..indices.nrows())
        .map(|i| [indices.get(i, 0), indices.get(i, 1), indices.get(i, 2)])
        .collect();
    rows.sort_unstable();
    rows
}

/// Checks that every node covers exactly the triangles of its children, and that its
/// bounding box is the one of these triangles.
fn check_node<I: Array2<Item = u32>>(
    mesh: &TriMesh<f32, 3, DMatrix<f32>, I>,
    node: &NodeData<f32, 3>,
) {
    let aabb = Aabb::combine(mesh.node_triangles(node).map(|tri| tri.local_aabb()));
    assert_eq!(*node.aabb(), aabb);

    if let Some(first) = node.children().first() {
        assert_eq!(node.start(), first.start());
    }

    let mut cursor = node.start();
    for child in node.children() {
        assert_eq!(child.start(), cursor);
        cursor = child.end();
        check_node(mesh, child);
    }

    if !node.is_leaf() {
        assert_eq!(cursor, node.end());
    }
}

#[test]
fn packing_permutes_the_index_buffer() {
    let (points, indices) = random_soup(1000);
    let expected = sorted_rows(&indices);

    let mut mesh = TriMesh::<f32, 3, _, _>::new(points, indices).unwrap();
    mesh.pack(8).unwrap();

    assert_eq!(sorted_rows(mesh.indices()), expected);

    let root = mesh.root().unwrap();
    assert_eq!(root.range(), 0..1000);
    check_node(&mesh, root);
}

#[test]
fn matrix_and_row_buffers_are_packed_identically() {
    let (points, indices) = random_soup(300);
    let rows: Vec<[u32; 3]> = (0..indices.nrows())
        .map(|i| [indices[(i, 0)], indices[(i, 1)], indices[(i, 2)]])
        .collect();

    let mut matrix_mesh = TriMesh::<f32, 3, _, _>::new(points.clone(), indices).unwrap();
    let mut row_mesh = TriMesh::<f32, 3, _, _>::new(points, rows).unwrap();
    matrix_mesh.pack(4).unwrap();
    row_mesh.pack(4).unwrap();

    assert_eq!(matrix_mesh.root(), row_mesh.root());
    for i in 0..300 {
        assert_eq!(
            matrix_mesh.triangle_indices(i),
            row_mesh.triangle_indices(i)
        );
    }
    check_node(&row_mesh, row_mesh.root().unwrap());
}

#[test]
fn repacking_keeps_the_same_triangles() {
    let (points, indices) = random_soup(200);
    let expected = sorted_rows(&indices);
    let mut mesh = TriMesh::<f32, 3, _, _>::new(points, indices).unwrap();

    mesh.pack(16).unwrap();
    let first_root = mesh.root().cloned();
    mesh.pack(16).unwrap();

    // Packing an already packed mesh gives the same hierarchy.
    assert_eq!(mesh.root().cloned(), first_root);
    assert_eq!(sorted_rows(mesh.indices()), expected);

    let (points, indices) = mesh.into_buffers();
    assert_eq!(points.nrows(), 600);
    assert_eq!(indices.nrows(), 200);
}

#[test]
fn point_buffers_must_match_the_mesh_dimension() {
    let (points, indices) = random_soup(10);
    assert_eq!(
        TriMesh::<f32, 2, _, _>::new(points, indices).unwrap_err(),
        TriMeshBuilderError::DimensionMismatch {
            expected: 2,
            found: 3
        }
    );
}
