use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use apollota::{
    Ball, Sphere, SpheresHierarchy, Triangulation, TriangulationParams, compute_surface_contacts,
};

/// Random spheres in a box scaled to keep density roughly constant
fn random_spheres(n: usize, seed: u64) -> Vec<Sphere> {
    let box_size = 16.0 * (n as f64 / 100.0).cbrt().max(1.0);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Sphere::from_coords(
                rng.gen_range(0.0..box_size),
                rng.gen_range(0.0..box_size),
                rng.gen_range(0.0..box_size),
                rng.gen_range(0.5..2.0),
            )
        })
        .collect()
}

fn bench_hierarchy(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchy");

    for n in [100usize, 1000] {
        let spheres = random_spheres(n, 1);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("build", n), &spheres, |b, spheres| {
            b.iter(|| SpheresHierarchy::new(black_box(spheres.clone()), 3.5, 16));
        });

        let hierarchy = SpheresHierarchy::new(spheres.clone(), 3.5, 16);
        group.bench_with_input(
            BenchmarkId::new("query_all", n),
            &spheres,
            |b, spheres| {
                b.iter(|| {
                    for probe in spheres {
                        black_box(hierarchy.find_all_collisions(black_box(probe)));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_triangulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("triangulation");
    let params = TriangulationParams::default();

    for n in [50usize, 200] {
        let spheres = random_spheres(n, 2);

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("construct", n), &spheres, |b, spheres| {
            b.iter(|| Triangulation::construct(black_box(spheres), black_box(&params)));
        });
    }

    group.finish();
}

fn bench_surface_contacts(c: &mut Criterion) {
    let spheres = random_spheres(50, 3);
    let balls: Vec<Ball> = spheres
        .iter()
        .map(|s| Ball::new(s.center.x, s.center.y, s.center.z, s.r))
        .collect();
    let params = TriangulationParams::default();

    let mut group = c.benchmark_group("surface_contacts");
    group.throughput(Throughput::Elements(balls.len() as u64));

    for depth in [2u32, 3] {
        group.bench_with_input(
            BenchmarkId::new("compute", depth),
            &depth,
            |b, &depth| {
                b.iter(|| {
                    compute_surface_contacts(
                        black_box(&balls),
                        black_box(1.4),
                        depth,
                        black_box(&params),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_hierarchy,
    bench_triangulation,
    bench_surface_contacts
);
criterion_main!(benches);
