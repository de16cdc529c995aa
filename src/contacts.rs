//! Partition of a sphere's probe-expanded surface among its diagram
//! neighbors, by nearest additively-weighted influence.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;
use nalgebra::Point3;
use rayon::prelude::*;

use crate::error::Error;
use crate::geometry::{
    intersect_vector_with_hyperboloid, minimal_distance_from_point_to_sphere, triangle_area,
};
use crate::subdivided_icosahedron::SubdividedIcosahedron;
use crate::triangulation::{
    Triangulation, TriangulationParams, construct_artificial_boundary,
};
use crate::triangulation_queries::collect_neighbors_map_from_quadruples_map;
use crate::types::{Ball, Sphere};

/// Accumulated contact areas keyed by sphere id.
///
/// The entry under the subject's own id is the probe-exposed remainder:
/// the part of the expanded surface that no neighbor influences. Neighbors
/// that never win a mesh vertex get no entry.
pub type ContactAreas = BTreeMap<usize, f64>;

/// Compute how much of the surface of sphere `self_id`, expanded by
/// `probe`, lies nearer to each neighbor than to the sphere itself or to
/// any other neighbor.
///
/// The mesh is fitted onto the expanded sphere; each mesh vertex is
/// assigned the influence of whichever sphere minimizes the
/// additively-weighted distance (ties to the lowest id), and each mesh
/// triangle contributes its planar area to the influence ids of its
/// corners, split along analytic hyperboloid boundaries where corners
/// disagree. The flat-triangle approximation error shrinks with the mesh
/// subdivision depth.
pub fn construct_spherical_contacts(
    spheres: &[Sphere],
    self_id: usize,
    probe: f64,
    neighbor_ids: &[usize],
    mesh: &SubdividedIcosahedron,
) -> Result<ContactAreas, Error> {
    if self_id >= spheres.len() {
        return Err(Error::InvalidIndex {
            id: self_id,
            len: spheres.len(),
        });
    }
    let mut seen = BTreeSet::new();
    for &id in neighbor_ids {
        if id >= spheres.len() {
            return Err(Error::InvalidIndex {
                id,
                len: spheres.len(),
            });
        }
        if id == self_id {
            return Err(Error::IncompatibleInput(format!(
                "neighbor set contains the subject sphere {self_id}"
            )));
        }
        if !seen.insert(id) {
            return Err(Error::IncompatibleInput(format!(
                "neighbor set contains duplicate id {id}"
            )));
        }
    }

    let subject = &spheres[self_id];
    let fitted = mesh.fit_into_sphere(subject.center, subject.r + probe);

    // Sorted visiting order makes the strict-minimum rule tie to lowest id
    let ordered_ids: Vec<usize> = seen.into_iter().collect();

    let influences: Vec<usize> = fitted
        .vertices()
        .iter()
        .map(|p| {
            let mut best_id = self_id;
            let mut best = minimal_distance_from_point_to_sphere(p, subject);
            for &id in &ordered_ids {
                let d = minimal_distance_from_point_to_sphere(p, &spheres[id]);
                if d < best {
                    best = d;
                    best_id = id;
                }
            }
            best_id
        })
        .collect();

    let mut areas = ContactAreas::new();
    let mut credit = |id: usize, a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>| {
        *areas.entry(id).or_insert(0.0) += triangle_area(a, b, c);
    };

    // Boundary point between the influence regions of two spheres along a
    // mesh edge; the edge midpoint stands in if the analytic crossing is
    // numerically lost.
    let boundary = |from: &Point3<f64>, to: &Point3<f64>, id_from: usize, id_to: usize| {
        intersect_vector_with_hyperboloid(from, to, &spheres[id_from], &spheres[id_to])
            .unwrap_or_else(|| nalgebra::center(from, to))
    };

    for triple in fitted.triples() {
        let p = [
            fitted.vertices()[triple[0]],
            fitted.vertices()[triple[1]],
            fitted.vertices()[triple[2]],
        ];
        let g = [
            influences[triple[0]],
            influences[triple[1]],
            influences[triple[2]],
        ];

        if g[0] == g[1] && g[1] == g[2] {
            credit(g[0], &p[0], &p[1], &p[2]);
        } else if g[0] != g[1] && g[1] != g[2] && g[0] != g[2] {
            // Three regions: split along the three pairwise boundaries
            // fanned around their centroid, two fragments per corner
            let c01 = boundary(&p[0], &p[1], g[0], g[1]);
            let c12 = boundary(&p[1], &p[2], g[1], g[2]);
            let c20 = boundary(&p[2], &p[0], g[2], g[0]);
            let middle = Point3::from((c01.coords + c12.coords + c20.coords) / 3.0);

            credit(g[0], &p[0], &c01, &middle);
            credit(g[0], &p[0], &middle, &c20);
            credit(g[1], &p[1], &c12, &middle);
            credit(g[1], &p[1], &middle, &c01);
            credit(g[2], &p[2], &c20, &middle);
            credit(g[2], &p[2], &middle, &c12);
        } else {
            // Two corners agree; cut off the minority corner
            let minority = if g[0] == g[1] {
                2
            } else if g[0] == g[2] {
                1
            } else {
                0
            };
            let a = (minority + 1) % 3;
            let b = (minority + 2) % 3;

            let ca = boundary(&p[a], &p[minority], g[a], g[minority]);
            let cb = boundary(&p[b], &p[minority], g[b], g[minority]);

            credit(g[minority], &p[minority], &ca, &cb);
            credit(g[a], &p[a], &p[b], &cb);
            credit(g[a], &p[a], &cb, &ca);
        }
    }

    trace!(
        "contacts for sphere {self_id}: {} influenced ids over {} triangles",
        areas.len(),
        fitted.triples().len()
    );

    Ok(areas)
}

/// Contact areas for every sphere id, fanned out in parallel.
///
/// Each per-sphere computation is an independent pure function, so the
/// batch is a plain data-parallel map sharing one mesh built once at
/// `depth` and re-fitted per sphere.
pub fn compute_contact_areas(
    spheres: &[Sphere],
    probe: f64,
    neighbors_map: &BTreeMap<usize, BTreeSet<usize>>,
    depth: u32,
) -> Result<Vec<ContactAreas>, Error> {
    let mesh = SubdividedIcosahedron::new(depth);
    (0..spheres.len())
        .into_par_iter()
        .map(|id| {
            let neighbor_ids: Vec<usize> = neighbors_map
                .get(&id)
                .map(|set| set.iter().copied().collect())
                .unwrap_or_default();
            construct_spherical_contacts(spheres, id, probe, &neighbor_ids, &mesh)
        })
        .collect()
}

/// Full pipeline from input balls to per-ball contact areas.
///
/// The balls are augmented with artificial boundary spheres (shift twice
/// the probe radius), triangulated, and the diagram neighbor graph drives
/// one contact construction per real ball, in parallel. Boundary spheres
/// influence the surface partition but are dropped from the reported maps;
/// each ball's map keeps its own-id entry as the probe-exposed remainder.
pub fn compute_surface_contacts(
    balls: &[Ball],
    probe: f64,
    depth: u32,
    params: &TriangulationParams,
) -> Result<Vec<ContactAreas>, Error> {
    let real_count = balls.len();
    let mut spheres: Vec<Sphere> = balls.iter().map(|b| Sphere::from_ball(b, 0.0)).collect();
    let boundary = construct_artificial_boundary(&spheres, 2.0 * probe);
    spheres.extend(boundary);

    let triangulation = Triangulation::construct(&spheres, params)?;
    let neighbors_map = collect_neighbors_map_from_quadruples_map(triangulation.quadruples_map());

    let mesh = SubdividedIcosahedron::new(depth);
    (0..real_count)
        .into_par_iter()
        .map(|id| {
            let neighbor_ids: Vec<usize> = neighbors_map
                .get(&id)
                .map(|set| set.iter().copied().collect())
                .unwrap_or_default();
            let mut areas =
                construct_spherical_contacts(&spheres, id, probe, &neighbor_ids, &mesh)?;
            areas.retain(|&other, _| other < real_count);
            Ok(areas)
        })
        .collect()
}
