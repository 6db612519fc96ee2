//! Equations in `cos(theta)` and `sin(theta)`, solved through the rational
//! parametrization of the unit circle.
//!
//! With `W(t) = 1 - 2t + 2t^2`, the point `(C(t) / W(t), S(t) / W(t))` runs
//! around the unit circle, where `C(t) = 1 - 2t` and `S(t) = 2t - 2t^2`. It
//! starts at `theta = 0` for `t = 0` and reaches every angle except
//! `theta = -pi/2`, which is the limit as `t` goes to infinity. Substituting
//! and clearing `W` turns an equation of degree `n` in `cos` and `sin` into a
//! power basis polynomial of degree `2n` in `t`.

use crate::{
    power,
    roots::{
        append_cubic_roots, append_linear_root, append_quadratic_roots, append_quartic_roots,
    },
};

/// Sine numerator.
pub const S: [f64; 3] = [0.0, 2.0, -2.0];
/// Cosine numerator.
pub const C: [f64; 2] = [1.0, -2.0];
/// Common denominator.
pub const W: [f64; 3] = [1.0, -2.0, 2.0];

pub const SW: [f64; 5] = [0.0, 2.0, -6.0, 8.0, -4.0];
pub const CW: [f64; 4] = [1.0, -4.0, 6.0, -4.0];
pub const WW: [f64; 5] = [1.0, -4.0, 8.0, -8.0, 4.0];
pub const SS: [f64; 5] = [0.0, 0.0, 4.0, -8.0, 4.0];
pub const CC: [f64; 3] = [1.0, -4.0, 4.0];
pub const SC: [f64; 4] = [0.0, 2.0, -6.0, 4.0];

/// Coefficients at most this fraction of the largest one are treated as zero,
/// both when trimming the degree and when deciding whether quadratic terms
/// matter.
pub const COEFFICIENT_RELATIVE_TOLERANCE: f64 = 1.0e-12;

/// The highest supported degree in `t`.
const MAX_DEGREE: usize = 4;

fn hypot3(a: f64, b: f64, c: f64) -> f64 {
    a.hypot(b).hypot(c)
}

/// Angles `theta` for the real roots of a polynomial in `t`.
///
/// `coffs` are power basis coefficients of a polynomial of nominal degree at
/// most 4, obtained by substituting the rational parametrization. Trailing
/// coefficients that are negligible compared to the largest coefficient and
/// `reference_coefficient` are dropped. Every drop in degree means a root at
/// infinity, reported once as `-pi/2` after the finite roots.
///
/// Returns [`None`] if the polynomial is identically zero (every angle is a
/// solution) or the nominal degree is unsupported.
#[must_use]
pub fn solve_angles(
    coffs: &[f64],
    nominal_degree: usize,
    reference_coefficient: f64,
) -> Option<Vec<f64>> {
    if nominal_degree > MAX_DEGREE || coffs.len() <= nominal_degree {
        return None;
    }
    let coffs = &coffs[..=nominal_degree];
    let max_coff = coffs
        .iter()
        .fold(reference_coefficient.abs(), |acc, c| acc.max(c.abs()));
    let negligible = |c: f64| c.abs() <= COEFFICIENT_RELATIVE_TOLERANCE * max_coff;

    let mut degree = nominal_degree;
    while degree > 0 && negligible(coffs[degree]) {
        degree -= 1;
    }
    if degree == 0 && negligible(coffs[0]) {
        log::debug!("trig polynomial is identically zero {{coffs: {coffs:?}}}");
        return None;
    }

    let mut roots = Vec::with_capacity(MAX_DEGREE);
    match degree {
        1 => append_linear_root(coffs[0], coffs[1], &mut roots),
        2 => append_quadratic_roots(&[coffs[0], coffs[1], coffs[2]], &mut roots),
        3 => append_cubic_roots(&[coffs[0], coffs[1], coffs[2], coffs[3]], &mut roots),
        4 => append_quartic_roots(
            &[coffs[0], coffs[1], coffs[2], coffs[3], coffs[4]],
            &mut roots,
        ),
        // a non-zero constant has no roots
        _ => {}
    }

    let mut radians: Vec<f64> = roots
        .into_iter()
        .map(|t| power::evaluate(&S, t).atan2(power::evaluate(&C, t)))
        .collect();
    if degree < nominal_degree {
        log::trace!(
            "trig polynomial degree dropped {{nominal: {nominal_degree}, degree: {degree}}}"
        );
        radians.push(-std::f64::consts::FRAC_PI_2);
    }
    Some(radians)
}

/// Angles where the unit circle meets the conic
/// `axx x^2 + axy xy + ayy y^2 + ax x + ay y + a = 0`.
///
/// Quadratic terms that are negligible relative to the linear ones are
/// ignored, which keeps the polynomial in `t` at degree 2.
///
/// Returns [`None`] if the whole circle lies on the conic.
#[must_use]
pub fn solve_unit_circle_implicit_quadric_intersection(
    axx: f64,
    axy: f64,
    ayy: f64,
    ax: f64,
    ay: f64,
    a: f64,
) -> Option<Vec<f64>> {
    let mut coffs = [0.0; 5];
    let quadratic_scale = hypot3(axx, axy, ayy);
    let linear_scale = hypot3(ax, ay, a);
    let degree = if quadratic_scale > COEFFICIENT_RELATIVE_TOLERANCE * linear_scale {
        power::accumulate(&mut coffs, &CW, ax);
        power::accumulate(&mut coffs, &SW, ay);
        power::accumulate(&mut coffs, &WW, a);
        power::accumulate(&mut coffs, &SS, ayy);
        power::accumulate(&mut coffs, &CC, axx);
        power::accumulate(&mut coffs, &SC, axy);
        4
    } else {
        power::accumulate(&mut coffs, &C, ax);
        power::accumulate(&mut coffs, &S, ay);
        power::accumulate(&mut coffs, &W, a);
        2
    };
    solve_angles(&coffs, degree, quadratic_scale.hypot(linear_scale))
}

/// Angles where the unit circle meets the line `alpha + beta x + gamma y = 0`,
/// i.e. the solutions of `alpha + beta cos(theta) + gamma sin(theta) = 0`.
///
/// Returns [`None`] if all three coefficients are zero.
#[must_use]
pub fn solve_unit_circle_line_intersection(alpha: f64, beta: f64, gamma: f64) -> Option<Vec<f64>> {
    let mut coffs = [0.0; 3];
    power::accumulate(&mut coffs, &W, alpha);
    power::accumulate(&mut coffs, &C, beta);
    power::accumulate(&mut coffs, &S, gamma);
    solve_angles(&coffs, 2, hypot3(alpha, beta, gamma))
}

/// One intersection of an ellipse with the unit circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleEllipseHit {
    /// Angle in the ellipse parametrization `center + u cos + v sin`.
    pub ellipse_radians: f64,
    /// Angle of the intersection point on the unit circle.
    pub circle_radians: f64,
    /// `x` of the intersection point, the cosine of `circle_radians`.
    pub cos: f64,
    /// `y` of the intersection point, the sine of `circle_radians`.
    pub sin: f64,
}

/// Intersections of the unit circle with the ellipse
/// `(cx, cy) + (ux, uy) cos(phi) + (vx, vy) sin(phi)`.
///
/// The axis vectors need not be perpendicular. Returns [`None`] if the
/// ellipse coincides with the unit circle.
#[must_use]
pub fn solve_unit_circle_ellipse_intersection(
    cx: f64,
    cy: f64,
    ux: f64,
    uy: f64,
    vx: f64,
    vy: f64,
) -> Option<Vec<CircleEllipseHit>> {
    // |center + u cos + v sin|^2 - 1 as a conic in (cos, sin)
    let acc = ux.mul_add(ux, uy * uy);
    let acs = 2.0 * ux.mul_add(vx, uy * vy);
    let ass = vx.mul_add(vx, vy * vy);
    let ac = 2.0 * ux.mul_add(cx, uy * cy);
    let as_ = 2.0 * vx.mul_add(cx, vy * cy);
    let a = cx.mul_add(cx, cy * cy) - 1.0;

    let ellipse_angles =
        solve_unit_circle_implicit_quadric_intersection(acc, acs, ass, ac, as_, a)?;
    let hits = ellipse_angles
        .into_iter()
        .map(|phi| {
            let (sin_phi, cos_phi) = phi.sin_cos();
            let x = cx + ux * cos_phi + vx * sin_phi;
            let y = cy + uy * cos_phi + vy * sin_phi;
            CircleEllipseHit {
                ellipse_radians: phi,
                circle_radians: y.atan2(x),
                cos: x,
                sin: y,
            }
        })
        .collect();
    Some(hits)
}
