//! Subdivided icosahedron for uniform sphere surface sampling.

use std::collections::HashMap;

use nalgebra::Point3;

/// A triangulated mesh approximating a sphere surface via icosahedron
/// subdivision.
///
/// The mesh carries its center and radius so one fixed topology can be
/// re-fitted onto any target sphere without rebuilding. Refinement is a
/// pure function from the mesh at depth d to a new mesh at depth d+1:
/// triangle `i` always expands into triangles `4i..4i+3` in the same
/// relative positions, and shared-edge midpoints are deduplicated so
/// adjacent triangles reference identical vertices.
///
/// Vertex counts by depth: 12, 42, 162, 642, 2562. Triangle counts: 20,
/// 80, 320, 1280, 5120.
#[derive(Debug, Clone, PartialEq)]
pub struct SubdividedIcosahedron {
    vertices: Vec<Point3<f64>>,
    triples: Vec<[usize; 3]>,
    center: Point3<f64>,
    radius: f64,
}

impl SubdividedIcosahedron {
    /// Create a subdivided icosahedron of the given depth, inscribed in the
    /// unit sphere at the origin. Depth 0 is the regular icosahedron.
    #[must_use]
    #[allow(clippy::manual_midpoint)] // This is golden ratio, not midpoint
    pub fn new(depth: u32) -> Self {
        let t = (1.0 + 5.0_f64.sqrt()) / 2.0; // Golden ratio φ = (1+√5)/2

        // 12 vertices of a regular icosahedron
        let vertices: Vec<Point3<f64>> = [
            (t, 1.0, 0.0),
            (-t, 1.0, 0.0),
            (t, -1.0, 0.0),
            (-t, -1.0, 0.0),
            (1.0, 0.0, t),
            (1.0, 0.0, -t),
            (-1.0, 0.0, t),
            (-1.0, 0.0, -t),
            (0.0, t, 1.0),
            (0.0, -t, 1.0),
            (0.0, t, -1.0),
            (0.0, -t, -1.0),
        ]
        .into_iter()
        .map(|(x, y, z)| unit_point(Point3::new(x, y, z)))
        .collect();

        // 20 triangular faces of the icosahedron
        let triples: Vec<[usize; 3]> = vec![
            [0, 8, 4],
            [1, 10, 7],
            [2, 9, 11],
            [7, 3, 1],
            [0, 5, 10],
            [3, 9, 6],
            [3, 11, 9],
            [8, 6, 4],
            [2, 4, 9],
            [3, 7, 11],
            [4, 2, 0],
            [9, 4, 6],
            [2, 11, 5],
            [0, 10, 8],
            [5, 0, 2],
            [10, 5, 7],
            [1, 6, 8],
            [1, 8, 10],
            [6, 1, 3],
            [11, 7, 5],
        ];

        let mut mesh = Self {
            vertices,
            triples,
            center: Point3::origin(),
            radius: 1.0,
        };
        for _ in 0..depth {
            mesh = mesh.grow();
        }
        mesh
    }

    /// One subdivision level, as a new mesh; `self` is untouched.
    ///
    /// Each triangle splits into 4 children via edge-midpoint insertion;
    /// midpoints are shared across edges through a key map and re-projected
    /// onto the mesh sphere before storage.
    #[must_use]
    pub fn grow(&self) -> Self {
        let mut vertices = self.vertices.clone();
        let mut triples = Vec::with_capacity(self.triples.len() * 4);
        let mut edge_midpoints: HashMap<(usize, usize), usize> = HashMap::new();

        for triple in &self.triples {
            let mut mid = [0usize; 3];

            // Find/create midpoint for each edge
            for (j, &(a, b)) in [
                (triple[1], triple[2]),
                (triple[0], triple[2]),
                (triple[0], triple[1]),
            ]
            .iter()
            .enumerate()
            {
                let key = if a < b { (a, b) } else { (b, a) };
                mid[j] = *edge_midpoints.entry(key).or_insert_with(|| {
                    let half = Point3::new(
                        (vertices[a].x + vertices[b].x) * 0.5,
                        (vertices[a].y + vertices[b].y) * 0.5,
                        (vertices[a].z + vertices[b].z) * 0.5,
                    );
                    vertices.push(self.project(half));
                    vertices.len() - 1
                });
            }

            // Split into 4 triangles, children of triangle i at 4i..4i+3
            triples.push([triple[0], mid[1], mid[2]]);
            triples.push([triple[1], mid[0], mid[2]]);
            triples.push([triple[2], mid[0], mid[1]]);
            triples.push([mid[0], mid[1], mid[2]]);
        }

        Self {
            vertices,
            triples,
            center: self.center,
            radius: self.radius,
        }
    }

    /// Rigidly translate and scale all vertices onto a new sphere,
    /// preserving topology.
    #[must_use]
    pub fn fit_into_sphere(&self, center: Point3<f64>, radius: f64) -> Self {
        let scale = radius / self.radius;
        let vertices = self
            .vertices
            .iter()
            .map(|v| center + (v - self.center) * scale)
            .collect();
        Self {
            vertices,
            triples: self.triples.clone(),
            center,
            radius,
        }
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn triples(&self) -> &[[usize; 3]] {
        &self.triples
    }

    pub const fn center(&self) -> Point3<f64> {
        self.center
    }

    pub const fn radius(&self) -> f64 {
        self.radius
    }

    fn project(&self, p: Point3<f64>) -> Point3<f64> {
        let v = p - self.center;
        let len = v.norm();
        if len <= 0.0 {
            return p;
        }
        self.center + v * (self.radius / len)
    }
}

/// Normalize point to unit sphere.
fn unit_point(p: Point3<f64>) -> Point3<f64> {
    let len = p.z.mul_add(p.z, p.x.mul_add(p.x, p.y * p.y)).sqrt();
    Point3::new(p.x / len, p.y / len, p.z / len)
}
