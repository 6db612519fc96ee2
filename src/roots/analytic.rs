use std::f64::consts::FRAC_PI_3;

use super::{improve_sorted_roots, most_distant_from_mean, polish::polish_root};
use crate::util::float::{is_small_ratio, leading_is_negligible, safe_divide};

/// Root of `c0 + c1 x`.
///
/// Nothing is appended if `c1` is negligible relative to `c0`, so there is
/// never a spurious root near infinity.
pub fn append_linear_root(c0: f64, c1: f64, values: &mut Vec<f64>) {
    if let Some(x) = safe_divide(-c0, c1) {
        values.push(x);
    }
}

/// Real roots of `c[0] + c[1] x + c[2] x^2`.
///
/// A double root is reported once. Callers must not rely on the order of the
/// appended values.
pub fn append_quadratic_roots(c: &[f64; 3], values: &mut Vec<f64>) {
    if leading_is_negligible(c) {
        log::trace!("quadratic degrades to linear {{coffs: {c:?}}}");
        append_linear_root(c[0], c[1], values);
        return;
    }

    // normal form: x^2 + 2px + q = 0
    let p = 0.5 * c[1] / c[2];
    let q = c[0] / c[2];
    let sq_p = p * p;
    let d = sq_p - q;

    if is_small_ratio(d, sq_p.max(q.abs())) {
        values.push(-p);
    } else if d > 0.0 {
        let sqrt_d = d.sqrt();
        values.push(-sqrt_d - p);
        values.push(sqrt_d - p);
    }
}

/// Real roots of `c0 + c1 x + c2 x^2`, sorted ascending.
///
/// ```
/// use geom_roots::roots::solve_quadratic;
///
/// let roots = solve_quadratic(-2.0, 0.0, 1.0);
/// assert!((roots[0] + 2f64.sqrt()).abs() < 1E-15);
/// assert!((roots[1] - 2f64.sqrt()).abs() < 1E-15);
/// ```
#[must_use]
pub fn solve_quadratic(c0: f64, c1: f64, c2: f64) -> Vec<f64> {
    let mut roots = Vec::with_capacity(2);
    append_quadratic_roots(&[c0, c1, c2], &mut roots);
    roots.sort_by(f64::total_cmp);
    roots
}

/// Real roots of `c[0] + c[1] x + c[2] x^2 + c[3] x^3`, in the order the
/// closed form produces them.
///
/// Multiple roots are reported with their multiplicity.
pub fn append_cubic_roots_unsorted(c: &[f64; 4], values: &mut Vec<f64>) {
    if leading_is_negligible(c) {
        log::trace!("cubic degrades to quadratic {{coffs: {c:?}}}");
        append_quadratic_roots(&[c[0], c[1], c[2]], values);
        return;
    }

    // normal form: x^3 + Ax^2 + Bx + C = 0
    append_normal_cubic_roots(c[2] / c[3], c[1] / c[3], c[0] / c[3], values);
}

/// Real roots of `x^3 + ax^2 + bx + cc`, unsorted.
///
/// A monic cubic skips the negligible leading coefficient test, which would
/// misfire on large roots.
fn append_normal_cubic_roots(a: f64, b: f64, cc: f64, values: &mut Vec<f64>) {
    // substitute x = y - a/3 to eliminate the quadratic term: y^3 + 3py + 2q = 0
    let sq_a = a * a;
    let p = (-sq_a / 3.0 + b) / 3.0;
    let q_terms = [2.0 / 27.0 * a * sq_a, -a * b / 3.0, cc];
    let q = 0.5 * q_terms.iter().sum::<f64>();
    let q_scale = 0.5 * q_terms.iter().copied().map(f64::abs).sum::<f64>();

    let cb_p = p * p * p;
    let sq_q = q * q;
    let d = sq_q + cb_p;
    let origin = -a / 3.0;

    if is_small_ratio(d, sq_q.max(cb_p.abs())) {
        if is_small_ratio(q, q_scale) {
            // one triple root
            values.extend([origin; 3]);
        } else {
            // one single and one double root
            let u = (-q).cbrt();
            if u < 0.0 {
                values.extend([origin + 2.0 * u, origin - u, origin - u]);
            } else {
                values.extend([origin - u, origin - u, origin + 2.0 * u]);
            }
        }
    } else if d < 0.0 {
        // three distinct real roots
        let phi = (-q / (-cb_p).sqrt()).clamp(-1.0, 1.0).acos() / 3.0;
        let t = 2.0 * (-p).sqrt();
        values.extend([
            origin + t * phi.cos(),
            origin - t * (phi + FRAC_PI_3).cos(),
            origin - t * (phi - FRAC_PI_3).cos(),
        ]);
    } else {
        // one real root; the cube root is taken on the side where sqrt(D)
        // and q add with the same sign, the other term follows from uv = -p
        let sqrt_d = d.sqrt();
        let (u, v) = if q > 0.0 {
            let v = -(sqrt_d + q).cbrt();
            (-p / v, v)
        } else {
            let u = (sqrt_d - q).cbrt();
            (u, -p / u)
        };
        values.push(origin + u + v);
    }
}

/// Real roots of `c[0] + c[1] x + c[2] x^2 + c[3] x^3`.
///
/// The appended values are sorted ascending; multiple roots are repeated.
pub fn append_cubic_roots(c: &[f64; 4], values: &mut Vec<f64>) {
    let start = values.len();
    append_cubic_roots_unsorted(c, values);
    values[start..].sort_by(f64::total_cmp);
}

/// Real roots of a cubic, sorted ascending.
#[must_use]
pub fn cubic_roots(c: &[f64; 4]) -> Vec<f64> {
    let mut roots = Vec::with_capacity(3);
    append_cubic_roots(c, &mut roots);
    roots
}

/// Real roots of `c[0] + c[1] x + ... + c[4] x^4`, sorted ascending and
/// polished with [`improve_sorted_roots`].
///
/// Uses Ferrari's method with a resolvent cubic. If the quadratic factors
/// built from the resolvent root are not real, fewer roots than the true
/// count may be reported; this is not an error.
pub fn append_quartic_roots(c: &[f64; 5], values: &mut Vec<f64>) {
    if leading_is_negligible(c) {
        log::trace!("quartic degrades to cubic {{coffs: {c:?}}}");
        append_cubic_roots(&[c[0], c[1], c[2], c[3]], values);
        return;
    }

    // normal form: x^4 + Ax^3 + Bx^2 + Cx + D = 0
    let a = c[3] / c[4];
    let b = c[2] / c[4];
    let cc = c[1] / c[4];
    let d = c[0] / c[4];

    // substitute x = y - A/4 to eliminate the cubic term: y^4 + py^2 + qy + r = 0
    let sq_a = a * a;
    let p = -3.0 / 8.0 * sq_a + b;
    let q = sq_a * a / 8.0 - a * b / 2.0 + cc;
    let r_terms = [-3.0 / 256.0 * sq_a * sq_a, sq_a * b / 16.0, -a * cc / 4.0, d];
    let r = r_terms.iter().sum::<f64>();
    let r_scale = r_terms.iter().copied().map(f64::abs).sum::<f64>();

    let mut depressed = Vec::with_capacity(4);
    if is_small_ratio(r, r_scale) {
        // no absolute term: y (y^3 + py + q) = 0
        append_normal_cubic_roots(0.0, p, q, &mut depressed);
        depressed.push(0.0);
    } else {
        append_resolvent_factor_roots(p, q, r, &mut depressed);
    }

    let start = values.len();
    let sub = a / 4.0;
    values.extend(depressed.iter().map(|y| y - sub));
    values[start..].sort_by(f64::total_cmp);
    improve_sorted_roots(c, &mut values[start..]);
}

/// Real roots of a quartic, sorted ascending.
#[must_use]
pub fn quartic_roots(c: &[f64; 5]) -> Vec<f64> {
    let mut roots = Vec::with_capacity(4);
    append_quartic_roots(c, &mut roots);
    roots
}

/// Solve `y^4 + py^2 + qy + r = 0` by splitting it into two quadratics.
fn append_resolvent_factor_roots(p: f64, q: f64, r: f64, roots: &mut Vec<f64>) {
    let resolvent_coffs = [0.5 * r * p - 0.125 * q * q, -r, -0.5 * p, 1.0];
    let mut resolvent = Vec::with_capacity(3);
    append_normal_cubic_roots(
        resolvent_coffs[2],
        resolvent_coffs[1],
        resolvent_coffs[0],
        &mut resolvent,
    );

    // any real resolvent root works in exact arithmetic, this one is the
    // least sensitive to rounding
    let Some(z) = most_distant_from_mean(&resolvent) else {
        return;
    };
    // the factors below amplify any error in z
    let z = polish_root(&resolvent_coffs, z).unwrap_or(z);

    let sq_z = z * z;
    let two_z = 2.0 * z;
    let (Some(u), Some(v)) = (
        sqrt_or_zero(sq_z - r, sq_z.max(r.abs())),
        sqrt_or_zero(two_z - p, two_z.abs().max(p.abs())),
    ) else {
        log::trace!("resolvent root gives complex factors {{z: {z}, p: {p}, q: {q}, r: {r}}}");
        return;
    };
    let v = if q < 0.0 { -v } else { v };

    append_quadratic_roots(&[z - u, v, 1.0], roots);
    append_quadratic_roots(&[z + u, -v, 1.0], roots);
}

/// Square root of `x`, computed as a difference of terms of size `scale`.
/// Negative values that are negligible next to `scale` are rounding noise and
/// snap to zero; other negatives are refused.
fn sqrt_or_zero(x: f64, scale: f64) -> Option<f64> {
    if x >= 0.0 {
        Some(x.sqrt())
    } else if is_small_ratio(x, scale) {
        Some(0.0)
    } else {
        None
    }
}
