use std::f64::consts::PI;

use apollota::{
    Sphere, SubdividedIcosahedron, TriangulationParams, compute_surface_contacts,
    construct_spherical_contacts,
};
use approx::assert_relative_eq;

/// Two unit spheres with centers 1.8 apart, probe 1.4: the influence
/// boundary on either probe-expanded surface (radius 2.4) is the plane
/// x = 0.9, so the contact is a spherical cap of area 2*pi*R*h with
/// h = R - 0.9.
const CAP_AREA: f64 = 2.0 * PI * 2.4 * (2.4 - 0.9);

fn touching_pair() -> Vec<Sphere> {
    vec![
        Sphere::from_coords(0.0, 0.0, 0.0, 1.0),
        Sphere::from_coords(1.8, 0.0, 0.0, 1.0),
    ]
}

#[test]
fn touching_pair_contact_matches_cap_area() {
    let spheres = touching_pair();

    let depth3 = SubdividedIcosahedron::new(3);
    let areas3 = construct_spherical_contacts(&spheres, 0, 1.4, &[1], &depth3).unwrap();
    assert_relative_eq!(areas3[&1], CAP_AREA, max_relative = 0.05);

    let depth4 = SubdividedIcosahedron::new(4);
    let areas4 = construct_spherical_contacts(&spheres, 0, 1.4, &[1], &depth4).unwrap();
    assert_relative_eq!(areas4[&1], CAP_AREA, max_relative = 0.01);
}

#[test]
fn touching_pair_contact_is_symmetric() {
    let spheres = touching_pair();

    let mut previous_diff = f64::INFINITY;
    for (depth, tolerance) in [(3u32, 0.05), (4, 0.01)] {
        let mesh = SubdividedIcosahedron::new(depth);
        let from_a = construct_spherical_contacts(&spheres, 0, 1.4, &[1], &mesh).unwrap();
        let from_b = construct_spherical_contacts(&spheres, 1, 1.4, &[0], &mesh).unwrap();

        let a_to_b = from_a[&1];
        let b_to_a = from_b[&0];
        assert_relative_eq!(a_to_b, b_to_a, max_relative = tolerance);

        let diff = (a_to_b - b_to_a).abs();
        assert!(diff <= previous_diff + 1e-9, "symmetry error grew at depth {depth}");
        previous_diff = diff;
    }
}

#[test]
fn empty_neighbor_list_credits_whole_surface_to_self() {
    let spheres = vec![Sphere::from_coords(2.0, -1.0, 3.0, 1.3)];
    let mesh = SubdividedIcosahedron::new(3);

    let areas = construct_spherical_contacts(&spheres, 0, 1.4, &[], &mesh).unwrap();

    assert_eq!(areas.keys().copied().collect::<Vec<_>>(), vec![0]);
    let r = 1.3 + 1.4;
    assert_relative_eq!(areas[&0], 4.0 * PI * r * r, max_relative = 0.02);
}

#[test]
fn non_bordering_neighbor_receives_zero_contact() {
    let spheres = vec![
        Sphere::from_coords(0.0, 0.0, 0.0, 1.0),
        Sphere::from_coords(1.8, 0.0, 0.0, 1.0),
        Sphere::from_coords(30.0, 0.0, 0.0, 1.0),
    ];
    let mesh = SubdividedIcosahedron::new(3);

    let areas = construct_spherical_contacts(&spheres, 0, 1.4, &[1, 2], &mesh).unwrap();

    assert!(areas[&1] > 0.0);
    assert_eq!(areas.get(&2), None);
}

#[test]
fn pipeline_reports_only_real_neighbors() {
    let balls = vec![
        apollota::Ball::new(0.0, 0.0, 0.0, 1.0),
        apollota::Ball::new(1.8, 0.0, 0.0, 1.0),
        apollota::Ball::new(0.9, 1.6, 0.0, 1.0),
        apollota::Ball::new(0.9, 0.5, 1.5, 1.0),
    ];

    let areas =
        compute_surface_contacts(&balls, 1.4, 3, &TriangulationParams::default()).unwrap();

    assert_eq!(areas.len(), 4);
    for (id, map) in areas.iter().enumerate() {
        // Artificial boundary ids never show up in reported maps
        assert!(map.keys().all(|&other| other < balls.len()));
        assert!(map.contains_key(&id), "self entry missing for ball {id}");
    }
    // The tight cluster produces mutual contacts
    assert!(areas[0][&1] > 0.0);
    assert!(areas[1][&0] > 0.0);
}
