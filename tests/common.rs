#![allow(dead_code)]

use apollota::Sphere;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded random spheres inside a cubic box.
pub fn random_spheres(n: usize, seed: u64, box_size: f64, r_min: f64, r_max: f64) -> Vec<Sphere> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Sphere::from_coords(
                rng.gen_range(0.0..box_size),
                rng.gen_range(0.0..box_size),
                rng.gen_range(0.0..box_size),
                rng.gen_range(r_min..r_max),
            )
        })
        .collect()
}

/// Equal spheres at the corners of a regular tetrahedron centered at the
/// origin.
pub fn tetrahedron_spheres(edge: f64, r: f64) -> Vec<Sphere> {
    let s = edge / (2.0 * 2.0f64.sqrt());
    vec![
        Sphere::from_coords(s, s, s, r),
        Sphere::from_coords(s, -s, -s, r),
        Sphere::from_coords(-s, s, -s, r),
        Sphere::from_coords(-s, -s, s, r),
    ]
}

/// O(N) reference overlap scan.
pub fn brute_force_collisions(spheres: &[Sphere], probe: &Sphere) -> Vec<usize> {
    spheres
        .iter()
        .enumerate()
        .filter(|(_, s)| apollota::geometry::sphere_intersects_sphere(probe, s))
        .map(|(i, _)| i)
        .collect()
}
