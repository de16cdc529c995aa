use nalgebra::Point3;

use crate::types::Sphere;

/// Tolerance for floating-point comparisons.
/// The tessellation requires one consistent epsilon across all comparisons
/// to keep geometric decisions mutually consistent.
pub const EPSILON: f64 = 1e-10;

/// Epsilon-based floating point comparisons.
/// These exist because the engine requires consistent "fuzzy" comparisons
/// to handle geometric degeneracies robustly.
pub mod float_cmp {
    use super::EPSILON;

    #[inline]
    pub const fn eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPSILON
    }

    #[inline]
    pub const fn lt(a: f64, b: f64) -> bool {
        a + EPSILON < b
    }

    #[inline]
    pub const fn gt(a: f64, b: f64) -> bool {
        a - EPSILON > b
    }

    #[inline]
    pub const fn le(a: f64, b: f64) -> bool {
        a < b + EPSILON
    }

    #[inline]
    pub const fn ge(a: f64, b: f64) -> bool {
        a + EPSILON > b
    }
}

use float_cmp::{eq, ge, le, lt};

#[inline]
pub fn point_equals(a: &Point3<f64>, b: &Point3<f64>) -> bool {
    eq(a.x, b.x) && eq(a.y, b.y) && eq(a.z, b.z)
}

#[inline]
pub fn distance_from_point_to_point(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (b - a).norm()
}

/// Additively-weighted distance from a point to a sphere surface.
/// Negative inside the sphere.
#[inline]
pub fn minimal_distance_from_point_to_sphere(p: &Point3<f64>, s: &Sphere) -> f64 {
    (p - s.center).norm() - s.r
}

/// Check if two spheres intersect (overlap)
#[inline]
pub fn sphere_intersects_sphere(a: &Sphere, b: &Sphere) -> bool {
    let sum_r = a.r + b.r;
    lt((b.center - a.center).norm_squared(), sum_r * sum_r)
}

/// Check if two sphere surfaces touch without overlapping
#[inline]
pub fn sphere_touches_sphere(a: &Sphere, b: &Sphere) -> bool {
    eq((b.center - a.center).norm(), a.r + b.r)
}

/// Check if spheres are equal
#[inline]
pub fn sphere_equals_sphere(a: &Sphere, b: &Sphere) -> bool {
    eq(a.r, b.r) && point_equals(&a.center, &b.center)
}

/// Check if sphere `a` contains sphere `b`
#[inline]
pub fn sphere_contains_sphere(a: &Sphere, b: &Sphere) -> bool {
    let diff_r = a.r - b.r;
    ge(a.r, b.r) && le((b.center - a.center).norm_squared(), diff_r * diff_r)
}

/// Triangle area from three points
#[inline]
pub fn triangle_area(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    (b - a).cross(&(c - a)).norm() / 2.0
}

/// Intersect the segment [a, b] with the hyperboloid of points equidistant
/// (in the additively-weighted sense) from spheres `s1` and `s2`.
///
/// Returns the crossing point, or `None` when the segment does not cross
/// the boundary. With `k = s1.r - s2.r` the locus `|x-c1| - |x-c2| = k`
/// reduces after squaring to a linear equation in the segment parameter for
/// `k = 0` (the radical plane) and to a quadratic otherwise; roots are
/// validated against the unsquared equation to reject the wrong hyperboloid
/// sheet.
#[allow(clippy::similar_names)]
pub fn intersect_vector_with_hyperboloid(
    a: &Point3<f64>,
    b: &Point3<f64>,
    s1: &Sphere,
    s2: &Sphere,
) -> Option<Point3<f64>> {
    let d = b - a;
    let dd = d.norm_squared();
    if dd <= 0.0 {
        return None;
    }

    let u1 = a - s1.center;
    let u2 = a - s2.center;
    let k = s1.r - s2.r;

    // |x(t)-c1|^2 = a1 + b1*t + dd*t^2, same for c2
    let a1 = u1.norm_squared();
    let b1 = 2.0 * u1.dot(&d);
    let a2 = u2.norm_squared();
    let b2 = 2.0 * u2.dot(&d);

    let accept = |t: f64| -> Option<Point3<f64>> {
        if !(-EPSILON..=1.0 + EPSILON).contains(&t) {
            return None;
        }
        let t = t.clamp(0.0, 1.0);
        let x = a + d * t;
        let f = minimal_distance_from_point_to_sphere(&x, s1)
            - minimal_distance_from_point_to_sphere(&x, s2);
        // Scale-aware residual check rejects roots from the wrong sheet
        if f.abs() <= 1e-6 * (1.0 + dd.sqrt()) {
            Some(x)
        } else {
            None
        }
    };

    if eq(k, 0.0) {
        // Radical plane: a1 + b1*t = a2 + b2*t
        let denom = b1 - b2;
        if eq(denom, 0.0) {
            return None;
        }
        return accept((a2 - a1) / denom);
    }

    // (p + q*t)^2 = 4*k^2 * (a2 + b2*t + dd*t^2)
    let p = a1 - a2 - k * k;
    let q = b1 - b2;
    let kk4 = 4.0 * k * k;
    let qa = q.mul_add(q, -kk4 * dd);
    let qb = 2.0f64.mul_add(p * q, -kk4 * b2);
    let qc = p.mul_add(p, -kk4 * a2);

    if eq(qa, 0.0) {
        if eq(qb, 0.0) {
            return None;
        }
        return accept(-qc / qb);
    }

    let discriminant = qb.mul_add(qb, -4.0 * qa * qc);
    if discriminant < 0.0 {
        return None;
    }
    let sq = discriminant.sqrt();
    let t1 = (-qb - sq) / (2.0 * qa);
    let t2 = (-qb + sq) / (2.0 * qa);
    let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
    accept(lo).or_else(|| accept(hi))
}
