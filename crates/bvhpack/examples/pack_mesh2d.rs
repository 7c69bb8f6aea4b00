use bvhpack::shape::{NodeData, TriMesh};
use std::borrow::Cow;

const GRID_SIZE: u32 = 6;
const LEAF_CAPACITY: usize = 4;

#[derive(Clone)]
struct PrintedNode<'a>(&'a NodeData<f32, 2>);

impl ptree::TreeItem for PrintedNode<'_> {
    type Child = Self;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        let aabb = self.0.aabb();
        write!(
            f,
            "{}{:?} [{:>4.1}, {:>4.1}] -> [{:>4.1}, {:>4.1}]",
            if self.0.is_leaf() { "*" } else { " " },
            self.0.range(),
            aabb.mins.x,
            aabb.mins.y,
            aabb.maxs.x,
            aabb.maxs.y,
        )
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Owned(self.0.children().iter().map(PrintedNode).collect())
    }
}

fn main() {
    /*
     * Build a square grid, two triangles per cell.
     */
    let mut points = vec![];
    for y in 0..=GRID_SIZE {
        for x in 0..=GRID_SIZE {
            points.push([x as f32, y as f32]);
        }
    }

    let mut indices = vec![];
    for y in 0..GRID_SIZE {
        for x in 0..GRID_SIZE {
            let i = y * (GRID_SIZE + 1) + x;
            indices.push([i, i + 1, i + GRID_SIZE + 2]);
            indices.push([i, i + GRID_SIZE + 2, i + GRID_SIZE + 1]);
        }
    }

    let mut mesh = TriMesh::<f32, 2, _, _>::new(points, indices).unwrap();

    /*
     * Pack the mesh: the index buffer gets reordered along the tree.
     */
    mesh.pack(LEAF_CAPACITY).unwrap();
    let root = mesh.root().unwrap();

    println!(
        "Packed {} triangles into {} nodes:",
        mesh.num_triangles(),
        root.num_nodes()
    );
    ptree::print_tree(&PrintedNode(root)).unwrap();

    for (i, leaf) in root.children().iter().take(2).enumerate() {
        println!("Triangles of the child {}:", i);
        for tri in mesh.node_triangles(leaf) {
            println!("    {:?} {:?} {:?}", tri.a.coords, tri.b.coords, tri.c.coords);
        }
    }
}
