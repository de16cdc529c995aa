//! Apollonius diagram (additively-weighted Voronoi tessellation) of spheres.
//!
//! This library constructs the quasi-triangulation of a sphere set (the
//! map from sphere-id quadruples to tangent spheres satisfying the
//! empty-sphere property) and derives per-sphere contact surface areas
//! from it by partitioning each sphere's probe-expanded surface among its
//! diagram neighbors.
//!
//! # Example
//!
//! ```
//! use apollota::{Ball, TriangulationParams, compute_surface_contacts};
//!
//! let balls = vec![
//!     Ball::new(0.0, 0.0, 0.0, 1.0),
//!     Ball::new(3.0, 0.0, 0.0, 1.0),
//!     Ball::new(1.5, 2.6, 0.0, 1.0),
//!     Ball::new(1.5, 0.9, 2.4, 1.0),
//! ];
//!
//! let areas = compute_surface_contacts(&balls, 1.4, 2, &TriangulationParams::default())
//!     .expect("enough balls for a triangulation");
//!
//! assert_eq!(areas.len(), 4);
//! // Ball 0 shares part of its probe-expanded surface with ball 1
//! assert!(areas[0].get(&1).copied().unwrap_or(0.0) > 0.0);
//! ```

mod contacts;
mod error;
pub mod geometry;
mod spheres_hierarchy;
mod subdivided_icosahedron;
mod tangent;
mod triangulation;
pub mod triangulation_queries;
mod types;

pub use contacts::{
    ContactAreas, compute_contact_areas, compute_surface_contacts, construct_spherical_contacts,
};
pub use error::Error;
pub use spheres_hierarchy::SpheresHierarchy;
pub use subdivided_icosahedron::SubdividedIcosahedron;
pub use tangent::tangent_spheres_of_quadruple;
pub use triangulation::{
    QuadruplesMap, Triangulation, TriangulationParams, construct_artificial_boundary,
};
pub use types::{Ball, Pair, Quadruple, Sphere, Triple};
