use std::collections::{HashMap, VecDeque};

use log::debug;
use nalgebra::Point3;

use crate::error::Error;
use crate::geometry::{
    distance_from_point_to_point, sphere_contains_sphere, sphere_equals_sphere,
};
use crate::spheres_hierarchy::SpheresHierarchy;
use crate::tangent::tangent_spheres_of_quadruple;
use crate::types::{Quadruple, Sphere, Triple, ValuedId};

/// Canonical quadruple -> tangent sphere satisfying the empty-sphere property
pub type QuadruplesMap = HashMap<Quadruple, Sphere>;

/// Tunable construction parameters, forwarded to the bounding hierarchy
#[derive(Debug, Clone)]
pub struct TriangulationParams {
    /// Leaf clustering radius of the bounding-sphere hierarchy
    pub init_radius: f64,
    /// Hierarchy level-size floor: levels stop once this small
    pub min_level_size: usize,
}

impl Default for TriangulationParams {
    fn default() -> Self {
        Self {
            init_radius: 3.5,
            min_level_size: 16,
        }
    }
}

/// The Apollonius diagram of a sphere set, as the map from sphere-id
/// quadruples to their empty tangent spheres.
///
/// A quadruple is admitted iff at least one of its tangent spheres is
/// penetrated by no other sphere of the working set; when both algebraic
/// solutions qualify, the smaller-radius one is retained. The
/// `vertices_vector` holds the same entries ordered ascending by quadruple,
/// for use wherever iteration order must be stable.
#[derive(Debug, Clone)]
pub struct Triangulation {
    quadruples_map: QuadruplesMap,
    vertices_vector: Vec<(Quadruple, Sphere)>,
}

impl Triangulation {
    /// Construct the diagram for the given spheres.
    ///
    /// Pure function of its inputs: same spheres and parameters always
    /// produce the same result. Degenerate candidate quadruples (no
    /// numerically stable tangent solution) are excluded deterministically
    /// rather than reported; fewer than 4 input spheres is an error.
    pub fn construct(spheres: &[Sphere], params: &TriangulationParams) -> Result<Self, Error> {
        if spheres.len() < 4 {
            return Err(Error::InsufficientInput(spheres.len()));
        }

        let hierarchy = SpheresHierarchy::new(
            spheres.to_vec(),
            params.init_radius,
            params.min_level_size,
        );

        let mut search = QuadruplesSearch {
            spheres,
            hierarchy: &hierarchy,
            quadruples_map: HashMap::new(),
            face_incidence: HashMap::new(),
            open_faces: VecDeque::new(),
            covered: vec![false; spheres.len()],
        };

        // Hidden spheres can never yield an empty tangent sphere; skip them
        // as seeds up front. For exact duplicates the lower id survives.
        for (id, s) in spheres.iter().enumerate() {
            for other in hierarchy.find_all_collisions(s) {
                if other != id
                    && sphere_contains_sphere(&spheres[other], s)
                    && (!sphere_equals_sphere(&spheres[other], s) || id > other)
                {
                    search.covered[id] = true;
                    break;
                }
            }
        }

        // Expansion from one seed covers one connected component of the
        // diagram; re-seeding from uncovered spheres picks up the rest.
        for seed in 0..spheres.len() {
            if search.covered[seed] {
                continue;
            }
            if let Some((quadruple, tangent)) = search.find_first_quadruple(seed) {
                search.admit(quadruple, tangent);
                search.propagate();
            }
        }

        debug!(
            "triangulation finished: {} quadruples from {} spheres",
            search.quadruples_map.len(),
            spheres.len()
        );

        let mut vertices_vector: Vec<(Quadruple, Sphere)> = search
            .quadruples_map
            .iter()
            .map(|(q, s)| (*q, *s))
            .collect();
        vertices_vector.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self {
            quadruples_map: search.quadruples_map,
            vertices_vector,
        })
    }

    pub fn quadruples_map(&self) -> &QuadruplesMap {
        &self.quadruples_map
    }

    /// Entries of the quadruples map ordered ascending by quadruple
    pub fn vertices_vector(&self) -> &[(Quadruple, Sphere)] {
        &self.vertices_vector
    }
}

/// Working state of the face-propagation search
struct QuadruplesSearch<'a> {
    spheres: &'a [Sphere],
    hierarchy: &'a SpheresHierarchy,
    quadruples_map: QuadruplesMap,
    /// How many admitted quadruples use each face (capped at 2)
    face_incidence: HashMap<Triple, u8>,
    /// Faces awaiting a neighbor search, with the member opposite the face
    /// in the quadruple that produced them
    open_faces: VecDeque<(Triple, usize)>,
    covered: Vec<bool>,
}

impl QuadruplesSearch<'_> {
    /// Smallest-radius tangent sphere of the quadruple that no non-member
    /// sphere penetrates, if one exists.
    fn find_empty_tangent(&self, quadruple: &Quadruple) -> Option<Sphere> {
        let ids = quadruple.ids();
        let members = [
            self.spheres[ids[0]],
            self.spheres[ids[1]],
            self.spheres[ids[2]],
            self.spheres[ids[3]],
        ];
        let solutions = tangent_spheres_of_quadruple(&members).ok()?;

        let mut best: Option<Sphere> = None;
        for tangent in solutions {
            if self.hierarchy.find_any_collision(&tangent, &ids).is_some() {
                continue;
            }
            best = match best {
                Some(kept) if kept.r <= tangent.r => Some(kept),
                _ => Some(tangent),
            };
        }
        best
    }

    /// Scan for any admissible quadruple containing `seed`, trying triples
    /// of progressively farther candidates in deterministic order. The
    /// scan is local: a seed whose quadruples only involve distant spheres
    /// is left for face propagation from another component to reach.
    fn find_first_quadruple(&self, seed: usize) -> Option<(Quadruple, Sphere)> {
        const SEED_CANDIDATES_LIMIT: usize = 64;

        let center = self.spheres[seed].center;
        let mut candidates: Vec<ValuedId> = (0..self.spheres.len())
            .filter(|&id| id != seed)
            .map(|id| {
                ValuedId::new(
                    distance_from_point_to_point(&center, &self.spheres[id].center),
                    id,
                )
            })
            .collect();
        candidates.sort();
        candidates.truncate(SEED_CANDIDATES_LIMIT);

        let len = candidates.len();
        let mut prev = 0;
        let mut m = len.min(8);
        loop {
            for i in 0..m {
                for j in (i + 1)..m {
                    for k in (j + 1)..m {
                        if k < prev {
                            continue;
                        }
                        let quadruple = Quadruple::new([
                            seed,
                            candidates[i].index,
                            candidates[j].index,
                            candidates[k].index,
                        ]);
                        if let Some(tangent) = self.find_empty_tangent(&quadruple) {
                            return Some((quadruple, tangent));
                        }
                    }
                }
            }
            if m == len {
                return None;
            }
            prev = m;
            m = (m * 2).min(len);
        }
    }

    fn admit(&mut self, quadruple: Quadruple, tangent: Sphere) {
        if self.quadruples_map.contains_key(&quadruple) {
            return;
        }
        self.quadruples_map.insert(quadruple, tangent);

        for pos in 0..4 {
            self.covered[quadruple.get(pos)] = true;
            let face = quadruple.exclude(pos);
            let count = self.face_incidence.entry(face).or_insert(0);
            *count += 1;
            if *count < 2 {
                self.open_faces.push_back((face, quadruple.get(pos)));
            }
        }
    }

    /// Breadth-first face expansion: for every open face, find the sphere
    /// on its far side whose quadruple passes the empty-sphere test.
    fn propagate(&mut self) {
        while let Some((face, opposite)) = self.open_faces.pop_front() {
            if self.face_incidence.get(&face).copied().unwrap_or(0) >= 2 {
                continue;
            }

            let centroid = Point3::from(
                (self.spheres[face.get(0)].center.coords
                    + self.spheres[face.get(1)].center.coords
                    + self.spheres[face.get(2)].center.coords)
                    / 3.0,
            );
            let mut candidates: Vec<ValuedId> = (0..self.spheres.len())
                .filter(|&id| id != opposite && !face.contains(id))
                .map(|id| {
                    ValuedId::new(
                        distance_from_point_to_point(&centroid, &self.spheres[id].center),
                        id,
                    )
                })
                .collect();
            candidates.sort();

            for candidate in candidates {
                let quadruple = Quadruple::new([
                    face.get(0),
                    face.get(1),
                    face.get(2),
                    candidate.index,
                ]);
                if self.quadruples_map.contains_key(&quadruple) {
                    continue;
                }
                if let Some(tangent) = self.find_empty_tangent(&quadruple) {
                    self.admit(quadruple, tangent);
                    break;
                }
            }
        }
    }
}

/// Large synthetic spheres placed at the corners of the input's bounding
/// box expanded by `shift`, bounding otherwise-unbounded diagram regions.
///
/// Appended after the real spheres by callers, so real ids stay `0..n` and
/// boundary ids are exactly `n..n+8`. Boundary spheres must never be the
/// subject of reported results.
pub fn construct_artificial_boundary(spheres: &[Sphere], shift: f64) -> Vec<Sphere> {
    let Some(first) = spheres.first() else {
        return Vec::new();
    };

    let mut min = first.center;
    let mut max = first.center;
    let mut r_max: f64 = first.r;
    for s in spheres {
        min.x = min.x.min(s.center.x - s.r);
        min.y = min.y.min(s.center.y - s.r);
        min.z = min.z.min(s.center.z - s.r);
        max.x = max.x.max(s.center.x + s.r);
        max.y = max.y.max(s.center.y + s.r);
        max.z = max.z.max(s.center.z + s.r);
        r_max = r_max.max(s.r);
    }
    min.x -= shift;
    min.y -= shift;
    min.z -= shift;
    max.x += shift;
    max.y += shift;
    max.z += shift;

    let mut result = Vec::with_capacity(8);
    for &x in &[min.x, max.x] {
        for &y in &[min.y, max.y] {
            for &z in &[min.z, max.z] {
                result.push(Sphere::from_coords(x, y, z, r_max));
            }
        }
    }
    result
}
