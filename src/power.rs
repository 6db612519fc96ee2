//! Utilities for coefficient arrays in the power basis, where `coffs[i]`
//! multiplies `x^i`.
//!
//! These are plain functions over slices. Functions that write take the
//! destination buffer explicitly and never resize it.

/// Evaluate a polynomial with Horner's method.
///
/// An empty slice is the zero polynomial.
///
/// ```
/// use geom_roots::power;
///
/// // 1 + 2x + 3x^2
/// assert_eq!(power::evaluate(&[1.0, 2.0, 3.0], 2.0), 17.0);
/// ```
#[must_use]
pub fn evaluate(coffs: &[f64], x: f64) -> f64 {
    coffs.iter().rev().fold(0.0, |acc, c| acc.mul_add(x, *c))
}

/// Evaluate a polynomial and its first derivative in a single Horner pass.
#[must_use]
pub fn evaluate_with_derivative(coffs: &[f64], x: f64) -> (f64, f64) {
    let mut f = 0.0_f64;
    let mut df = 0.0_f64;
    for c in coffs.iter().rev() {
        df = df.mul_add(x, f);
        f = f.mul_add(x, *c);
    }
    (f, df)
}

/// Add `scale * src` into `dest`, term by term.
///
/// `dest` must be at least as long as `src`; excess terms of `dest` are left
/// untouched.
pub fn accumulate(dest: &mut [f64], src: &[f64], scale: f64) {
    debug_assert!(
        dest.len() >= src.len(),
        "destination must have room for every source coefficient"
    );
    for (d, s) in dest.iter_mut().zip(src) {
        *d = s.mul_add(scale, *d);
    }
}

/// Set every coefficient to zero.
pub fn zero(dest: &mut [f64]) {
    dest.fill(0.0);
}

/// Index of the highest non-zero coefficient, [`None`] for the zero
/// polynomial.
///
/// Only exact zeros are skipped; deciding whether a tiny leading coefficient
/// should count is left to the caller.
#[must_use]
pub fn degree(coffs: &[f64]) -> Option<usize> {
    coffs.iter().rposition(|c| *c != 0.0)
}

/// Coefficients of the first derivative. The result is one shorter than the
/// input (empty for constants).
#[must_use]
pub fn derivative(coffs: &[f64]) -> Vec<f64> {
    coffs
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| crate::util::casting::usize_to_f64(i) * c)
        .collect()
}

/// Coefficients of `c * (x - root0) * (x - root1)`.
#[must_use]
pub fn from_roots_and_c2(root0: f64, root1: f64, c: f64) -> [f64; 3] {
    [c * root0 * root1, -c * (root0 + root1), c]
}

/// Coefficients of `c * (x - root0) * (x - root1) * (x - root2)`.
#[must_use]
pub fn from_roots_and_c3(root0: f64, root1: f64, root2: f64, c: f64) -> [f64; 4] {
    [
        -c * root0 * root1 * root2,
        c * (root0 * root1 + root1 * root2 + root0 * root2),
        -c * (root0 + root1 + root2),
        c,
    ]
}

/// Coefficients of `c * (x - root0) * (x - root1) * (x - root2) * (x - root3)`.
#[must_use]
pub fn from_roots_and_c4(root0: f64, root1: f64, root2: f64, root3: f64, c: f64) -> [f64; 5] {
    let [q0, q1, q2, q3] = from_roots_and_c3(root0, root1, root2, c);
    // multiply by (x - root3)
    [
        -root3 * q0,
        q0 - root3 * q1,
        q1 - root3 * q2,
        q2 - root3 * q3,
        q3,
    ]
}
