//! Closed forms for Bezier polynomials of order 2 to 5.

use crate::roots::{
    append_cubic_roots, append_linear_root, append_quadratic_roots, append_quartic_roots,
};

#[inline]
fn dot<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
pub(super) const fn basis2(u: f64) -> [f64; 2] {
    [1.0 - u, u]
}

#[inline]
pub(super) fn basis3(u: f64) -> [f64; 3] {
    let v = 1.0 - u;
    [v * v, 2.0 * u * v, u * u]
}

#[inline]
pub(super) fn basis4(u: f64) -> [f64; 4] {
    let v = 1.0 - u;
    let (uu, vv) = (u * u, v * v);
    [vv * v, 3.0 * u * vv, 3.0 * uu * v, uu * u]
}

#[inline]
pub(super) fn basis5(u: f64) -> [f64; 5] {
    let v = 1.0 - u;
    let (uu, vv) = (u * u, v * v);
    [vv * vv, 4.0 * u * vv * v, 6.0 * uu * vv, 4.0 * uu * u * v, uu * uu]
}

pub(super) fn evaluate2(c: &[f64; 2], u: f64) -> f64 {
    c[0].mul_add(1.0 - u, c[1] * u)
}

pub(super) fn evaluate3(c: &[f64; 3], u: f64) -> f64 {
    dot(c, &basis3(u))
}

pub(super) fn evaluate4(c: &[f64; 4], u: f64) -> f64 {
    dot(c, &basis4(u))
}

pub(super) fn evaluate5(c: &[f64; 5], u: f64) -> f64 {
    dot(c, &basis5(u))
}

pub(super) fn derivative2(c: &[f64; 2], _u: f64) -> f64 {
    c[1] - c[0]
}

pub(super) fn derivative3(c: &[f64; 3], u: f64) -> f64 {
    2.0 * dot(&[c[1] - c[0], c[2] - c[1]], &basis2(u))
}

pub(super) fn derivative4(c: &[f64; 4], u: f64) -> f64 {
    3.0 * dot(&[c[1] - c[0], c[2] - c[1], c[3] - c[2]], &basis3(u))
}

pub(super) fn derivative5(c: &[f64; 5], u: f64) -> f64 {
    4.0 * dot(
        &[c[1] - c[0], c[2] - c[1], c[3] - c[2], c[4] - c[3]],
        &basis4(u),
    )
}

// Each root finder converts to the power basis, `a(k) = C(n, k) * (k-th
// forward difference of b)`, and hands off to the closed-form solvers.

pub(super) fn append_roots2(b: &[f64; 2], values: &mut Vec<f64>) {
    append_linear_root(b[0], b[1] - b[0], values);
}

pub(super) fn append_roots3(b: &[f64; 3], values: &mut Vec<f64>) {
    let d1 = b[1] - b[0];
    let d2 = b[2] - 2.0 * b[1] + b[0];
    append_quadratic_roots(&[b[0], 2.0 * d1, d2], values);
}

pub(super) fn append_roots4(b: &[f64; 4], values: &mut Vec<f64>) {
    let d1 = b[1] - b[0];
    let d2 = b[2] - 2.0 * b[1] + b[0];
    let d3 = b[3] - 3.0 * b[2] + 3.0 * b[1] - b[0];
    append_cubic_roots(&[b[0], 3.0 * d1, 3.0 * d2, d3], values);
}

pub(super) fn append_roots5(b: &[f64; 5], values: &mut Vec<f64>) {
    let d1 = b[1] - b[0];
    let d2 = b[2] - 2.0 * b[1] + b[0];
    let d3 = b[3] - 3.0 * b[2] + 3.0 * b[1] - b[0];
    let d4 = b[4] - 4.0 * b[3] + 6.0 * b[2] - 4.0 * b[1] + b[0];
    append_quartic_roots(&[b[0], 4.0 * d1, 6.0 * d2, 4.0 * d3, d4], values);
}

#[cfg(test)]
mod test {
    use super::{
        append_roots2, append_roots3, append_roots4, append_roots5, basis3, basis5, derivative4,
        evaluate4, evaluate5,
    };
    use crate::{
        pascal::{bezier_basis_values, bezier_to_power},
        util::__testing::bezier_from_roots,
    };

    #[test]
    fn closed_form_basis_matches_pascal() {
        for u in [0.0, 0.25, 0.6, 1.0] {
            let expected = bezier_basis_values(3, u).unwrap();
            assert!(basis3(u).iter().zip(&expected).all(|(a, b)| (a - b).abs() < 1E-15));
            let expected = bezier_basis_values(5, u).unwrap();
            assert!(basis5(u).iter().zip(&expected).all(|(a, b)| (a - b).abs() < 1E-15));
        }
    }

    #[test]
    fn derivative_matches_power_form() {
        let b = [1.0, -2.0, 0.5, 3.0];
        let power = bezier_to_power(&b).unwrap();
        for u in [0.0, 0.3, 1.0] {
            let expected = 3.0 * power[3] * u * u + 2.0 * power[2] * u + power[1];
            assert!((derivative4(&b, u) - expected).abs() < 1E-13);
        }
    }

    #[test]
    fn closed_form_roots() {
        let mut roots = vec![];
        append_roots2(&[-1.0, 3.0], &mut roots);
        assert_eq!(roots, [0.25]);

        roots.clear();
        // (u - 0.25)(u - 0.75) = 3/16 - u + u^2
        append_roots3(&[0.1875, -0.3125, 0.1875], &mut roots);
        roots.sort_by(f64::total_cmp);
        assert!((roots[0] - 0.25).abs() < 1E-14);
        assert!((roots[1] - 0.75).abs() < 1E-14);

        roots.clear();
        let b = [-1.0, 2.0, -2.0, 1.0];
        append_roots4(&b, &mut roots);
        assert_eq!(roots.len(), 3);
        assert!(roots.iter().all(|r| evaluate4(&b, *r).abs() < 1E-12));

        roots.clear();
        let b: [f64; 5] = bezier_from_roots(&[0.1, 0.4, 0.6, 0.9], 5.0)
            .coffs()
            .try_into()
            .unwrap();
        append_roots5(&b, &mut roots);
        assert_eq!(roots.len(), 4);
        assert!(roots.iter().all(|r| evaluate5(&b, *r).abs() < 1E-10));
    }
}
