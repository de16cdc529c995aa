//! Tangent sphere of four spheres (the weighted analogue of a circumsphere).

use nalgebra::{Matrix3, Point3, Vector3};

use crate::error::Error;
use crate::geometry::EPSILON;
use crate::types::Sphere;

/// Solve for all spheres tangent to the four given spheres from outside.
///
/// The tangency system `|x - c_i| = r + r_i` is linearized pairwise against
/// the first sphere, leaving a 3x3 linear system with the unknown radius as
/// a free parameter; substituting the parametric center back into the first
/// tangency equation gives a quadratic in the radius. Up to two real
/// solutions with non-negative radius exist; both are returned.
///
/// A singular linear system (coplanar degeneracies, coincident centers) or
/// a negative discriminant yields `Error::DegenerateConfiguration`. The
/// engine treats that as exclusion of the candidate quadruple, not a
/// failure of the whole run.
pub fn tangent_spheres_of_quadruple(spheres: &[Sphere; 4]) -> Result<Vec<Sphere>, Error> {
    let c0 = spheres[0].center;
    let r0 = spheres[0].r;

    // Rows of the linearized system: 2*(c0 - c_i) * x = w_i + v_i * r
    let mut rows = [Vector3::zeros(); 3];
    let mut w = Vector3::zeros();
    let mut v = Vector3::zeros();
    for i in 0..3 {
        let s = &spheres[i + 1];
        rows[i] = 2.0 * (c0.coords - s.center.coords);
        w[i] = c0.coords.norm_squared() - s.center.coords.norm_squared() + s.r * s.r - r0 * r0;
        v[i] = 2.0 * (s.r - r0);
    }

    let m = Matrix3::from_rows(&[rows[0].transpose(), rows[1].transpose(), rows[2].transpose()]);
    let inv = m
        .try_inverse()
        .ok_or(Error::DegenerateConfiguration("singular tangency system"))?;

    // Center as a function of radius: x(r) = p + q*r
    let p = inv * w;
    let q = inv * v;

    // Substitute into |x - c0|^2 = (r + r0)^2
    let u = p - c0.coords;
    let qa = q.norm_squared() - 1.0;
    let qb = 2.0 * (u.dot(&q) - r0);
    let qc = u.norm_squared() - r0 * r0;

    let mut radii: Vec<f64> = Vec::with_capacity(2);
    if qa.abs() <= EPSILON {
        if qb.abs() <= EPSILON {
            return Err(Error::DegenerateConfiguration("flat tangency system"));
        }
        radii.push(-qc / qb);
    } else {
        let discriminant = qb.mul_add(qb, -4.0 * qa * qc);
        if discriminant < 0.0 {
            return Err(Error::DegenerateConfiguration("no real tangent sphere"));
        }
        let sq = discriminant.sqrt();
        radii.push((-qb - sq) / (2.0 * qa));
        radii.push((-qb + sq) / (2.0 * qa));
    }

    let mut result = Vec::with_capacity(2);
    for r in radii {
        if !r.is_finite() || r < 0.0 {
            continue;
        }
        let center = Point3::from(p + q * r);
        let candidate = Sphere::new(center, r);
        if tangency_holds(&candidate, spheres) {
            result.push(candidate);
        }
    }

    if result.is_empty() {
        return Err(Error::DegenerateConfiguration("no valid tangent sphere"));
    }
    Ok(result)
}

/// Verify a solved sphere actually touches all four members; guards against
/// ill-conditioned systems whose algebraic roots drift off the surfaces.
fn tangency_holds(candidate: &Sphere, spheres: &[Sphere; 4]) -> bool {
    spheres.iter().all(|s| {
        let d = (s.center - candidate.center).norm();
        let expected = candidate.r + s.r;
        (d - expected).abs() <= 1e-6 * (1.0 + expected)
    })
}
