use bvhpack::math::Point;
use bvhpack::partitioning::{Node, SharedNode, DEFAULT_LEAF_CAPACITY};
use bvhpack::shape::TriMesh;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion, Throughput};

fn gen_random_points(count: usize) -> Vec<Point<f32, 3>> {
    let mut rng = oorandom::Rand32::new(0);
    (0..count)
        .map(|_| Point::from([rng.rand_float(), rng.rand_float(), rng.rand_float()]))
        .collect()
}

fn gen_grid_mesh(n: u32) -> (Vec<[f32; 2]>, Vec<[u32; 3]>) {
    let mut points = Vec::with_capacity(((n + 1) * (n + 1)) as usize);
    for y in 0..=n {
        for x in 0..=n {
            points.push([x as f32, y as f32]);
        }
    }

    let mut indices = Vec::with_capacity((2 * n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            let i = y * (n + 1) + x;
            indices.push([i, i + 1, i + n + 2]);
            indices.push([i, i + n + 2, i + n + 1]);
        }
    }

    (points, indices)
}

fn bench_pack_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("str_pack_points3");
    for &count in &[1_000usize, 10_000, 100_000] {
        let points = gen_random_points(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("owned_n{}", count), |b| {
            b.iter_batched(
                || points.clone(),
                |points| black_box(Node::pack(points, DEFAULT_LEAF_CAPACITY)),
                BatchSize::LargeInput,
            )
        });
        group.bench_function(format!("shared_n{}", count), |b| {
            b.iter_batched(
                || points.clone(),
                |points| black_box(SharedNode::pack(points, DEFAULT_LEAF_CAPACITY)),
                BatchSize::LargeInput,
            )
        });
        #[cfg(feature = "parallel")]
        group.bench_function(format!("parallel_n{}", count), |b| {
            b.iter_batched(
                || points.clone(),
                |points| black_box(Node::par_pack(points, DEFAULT_LEAF_CAPACITY)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_pack_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("str_pack_mesh2");
    for &n in &[32u32, 128] {
        let (points, indices) = gen_grid_mesh(n);
        group.throughput(Throughput::Elements(indices.len() as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter_batched(
                || TriMesh::<f32, 2, _, _>::new(points.clone(), indices.clone()).unwrap(),
                |mut mesh| {
                    let _ = mesh.pack(DEFAULT_LEAF_CAPACITY);
                    black_box(mesh)
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_pack_points, bench_pack_mesh);
criterion_main!(benches);
