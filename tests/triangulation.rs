mod common;

use apollota::geometry::float_cmp;
use apollota::triangulation_queries::{
    collect_ids_graph_from_ids_map, collect_neighbors_map_from_quadruples_map,
};
use apollota::{
    Error, Quadruple, Triangulation, TriangulationParams, construct_artificial_boundary,
};
use approx::assert_relative_eq;
use common::{random_spheres, tetrahedron_spheres};

#[test]
fn four_isolated_spheres_with_boundary() {
    let mut spheres = tetrahedron_spheres(20.0, 1.0);
    let real_count = spheres.len();
    spheres.extend(construct_artificial_boundary(&spheres, 2.8));

    let result = Triangulation::construct(&spheres, &TriangulationParams::default()).unwrap();

    let real_quadruples: Vec<_> = result
        .vertices_vector()
        .iter()
        .filter(|(q, _)| (0..4).all(|i| q.get(i) < real_count))
        .collect();

    // Exactly one all-real quadruple: the four input spheres themselves
    assert_eq!(real_quadruples.len(), 1);
    let &(quadruple, tangent) = real_quadruples[0];
    assert_eq!(quadruple, Quadruple::new([0, 1, 2, 3]));

    // Its tangent sphere radius is the tetrahedron circumradius minus the
    // sphere radius: edge * sqrt(3/8) - 1
    let expected = 20.0 * (3.0f64 / 8.0).sqrt() - 1.0;
    assert_relative_eq!(tangent.r, expected, epsilon = 1e-6);

    // Boundary-involving quadruples close the otherwise-unbounded regions
    assert!(
        result
            .vertices_vector()
            .iter()
            .any(|(q, _)| (0..4).any(|i| q.get(i) >= real_count))
    );
}

#[test]
fn empty_sphere_invariant_holds_on_random_input() {
    let spheres = random_spheres(40, 42, 14.0, 0.5, 2.0);
    let result = Triangulation::construct(&spheres, &TriangulationParams::default()).unwrap();
    assert!(!result.quadruples_map().is_empty());

    for (quadruple, tangent) in result.vertices_vector() {
        // Tangency with all four members
        for i in 0..4 {
            let member = &spheres[quadruple.get(i)];
            let d = (member.center - tangent.center).norm();
            assert_relative_eq!(d, tangent.r + member.r, epsilon = 1e-6, max_relative = 1e-5);
        }
        // No non-member sphere penetrates the tangent sphere
        for (id, other) in spheres.iter().enumerate() {
            if quadruple.contains(id) {
                continue;
            }
            let d = (other.center - tangent.center).norm();
            assert!(
                !float_cmp::lt(d, tangent.r + other.r - 1e-6),
                "sphere {id} penetrates the tangent sphere of {quadruple:?}"
            );
        }
    }
}

#[test]
fn neighbors_map_is_symmetric() {
    let spheres = random_spheres(30, 5, 12.0, 0.5, 2.0);
    let result = Triangulation::construct(&spheres, &TriangulationParams::default()).unwrap();

    let neighbors = collect_neighbors_map_from_quadruples_map(result.quadruples_map());
    for (&id, others) in &neighbors {
        for other in others {
            assert!(
                neighbors[other].contains(&id),
                "asymmetric edge {id} -> {other}"
            );
        }
    }

    let graph = collect_ids_graph_from_ids_map(&neighbors, spheres.len());
    for (id, adjacent) in graph.iter().enumerate() {
        for &other in adjacent {
            assert!(graph[other].contains(&id));
        }
    }
}

#[test]
fn same_input_gives_identical_output() {
    let spheres = random_spheres(25, 9, 10.0, 0.5, 1.5);
    let params = TriangulationParams::default();

    let a = Triangulation::construct(&spheres, &params).unwrap();
    let b = Triangulation::construct(&spheres, &params).unwrap();
    assert_eq!(a.vertices_vector(), b.vertices_vector());
}

#[test]
fn fewer_than_four_spheres_is_rejected() {
    let spheres = tetrahedron_spheres(6.0, 1.0)[..3].to_vec();
    assert!(matches!(
        Triangulation::construct(&spheres, &TriangulationParams::default()),
        Err(Error::InsufficientInput(3))
    ));
}

#[test]
fn coincident_spheres_are_excluded_not_fatal() {
    // Two coincident spheres plus a well-separated tetrahedron: the run
    // succeeds and no quadruple uses both duplicates through a degenerate
    // tangency system.
    let mut spheres = tetrahedron_spheres(8.0, 1.0);
    spheres.push(apollota::Sphere::from_coords(20.0, 0.0, 0.0, 1.0));
    spheres.push(apollota::Sphere::from_coords(20.0, 0.0, 0.0, 1.0));

    let result = Triangulation::construct(&spheres, &TriangulationParams::default()).unwrap();
    assert!(
        result
            .vertices_vector()
            .iter()
            .any(|(q, _)| *q == Quadruple::new([0, 1, 2, 3]))
    );
}
