//! Rows of Pascal's triangle and the Bernstein basis values built from them.
//!
//! The table is built once, on first use, and is read-only afterwards. It is
//! safe to access from any number of threads.

use std::sync::OnceLock;

use num::integer::binomial;

use crate::util::casting::{u64_to_f64, usize_to_f64};

/// Largest tabulated row.
///
/// `C(56, 28) < 2^53` is the last central binomial coefficient that `f64`
/// represents exactly, so every entry up to and including this row is exact.
pub const MAX_ROW: usize = 56;

/// Largest Bezier order (number of coefficients) whose basis weights come
/// from exact table rows.
pub const MAX_ORDER: usize = MAX_ROW + 1;

static ROWS: OnceLock<Vec<Vec<f64>>> = OnceLock::new();

fn rows() -> &'static [Vec<f64>] {
    ROWS.get_or_init(|| {
        (0..=MAX_ROW as u64)
            .map(|n| (0..=n).map(|k| u64_to_f64(binomial(n, k))).collect())
            .collect()
    })
}

/// Row `n` of Pascal's triangle, `[C(n, 0), ..., C(n, n)]`.
///
/// Returns [`None`] above [`MAX_ROW`].
///
/// ```
/// use geom_roots::pascal;
///
/// assert_eq!(pascal::row(4), Some(&[1.0, 4.0, 6.0, 4.0, 1.0][..]));
/// assert_eq!(pascal::row(pascal::MAX_ROW + 1), None);
/// ```
#[must_use]
pub fn row(n: usize) -> Option<&'static [f64]> {
    rows().get(n).map(Vec::as_slice)
}

/// Row lookup for callers that have already validated the order.
pub(crate) fn row_unchecked(n: usize) -> &'static [f64] {
    debug_assert!(n <= MAX_ROW, "pascal row {n} is not tabulated");
    &rows()[n]
}

/// Values of the `order` Bernstein basis functions of degree `order - 1` at `u`.
///
/// Returns [`None`] if `order` is zero or exceeds [`MAX_ORDER`].
#[must_use]
pub fn bezier_basis_values(order: usize, u: f64) -> Option<Vec<f64>> {
    if order == 0 {
        return None;
    }
    let row = row(order - 1)?;
    let v = 1.0 - u;
    let mut values = row.to_vec();

    // u^i from the left
    let mut gi = 1.0;
    for value in values.iter_mut().skip(1) {
        gi *= u;
        *value *= gi;
    }
    // (1-u)^(n-i) from the right
    let mut gj = 1.0;
    for value in values.iter_mut().rev().skip(1) {
        gj *= v;
        *value *= gj;
    }
    Some(values)
}

/// Derivatives with respect to `u` of the `order` Bernstein basis functions.
///
/// Uses `d/du B(i, n) = n * (B(i - 1, n - 1) - B(i, n - 1))`.
///
/// Returns [`None`] if `order` is zero or exceeds [`MAX_ORDER`].
#[must_use]
pub fn bezier_basis_derivatives(order: usize, u: f64) -> Option<Vec<f64>> {
    if order == 0 || order > MAX_ORDER {
        return None;
    }
    if order == 1 {
        return Some(vec![0.0]);
    }
    let lower = bezier_basis_values(order - 1, u)?;
    let n = usize_to_f64(order - 1);
    let derivatives = (0..order)
        .map(|i| {
            let left = if i > 0 { lower[i - 1] } else { 0.0 };
            let right = lower.get(i).copied().unwrap_or(0.0);
            n * (left - right)
        })
        .collect();
    Some(derivatives)
}

/// Convert Bezier coefficients over `[0, 1]` to power basis coefficients of
/// the same polynomial.
///
/// `a(k) = C(n, k) * sum_i (-1)^(k - i) * C(k, i) * b(i)`
///
/// Returns [`None`] for an empty slice or one longer than [`MAX_ORDER`].
#[must_use]
pub fn bezier_to_power(bezier: &[f64]) -> Option<Vec<f64>> {
    if bezier.is_empty() || bezier.len() > MAX_ORDER {
        return None;
    }
    let n = bezier.len() - 1;
    let row_n = row_unchecked(n);
    let power = (0..=n)
        .map(|k| {
            let row_k = row_unchecked(k);
            let sum: f64 = (0..=k)
                .map(|i| {
                    let term = row_k[i] * bezier[i];
                    if (k - i) % 2 == 0 {
                        term
                    } else {
                        -term
                    }
                })
                .sum();
            row_n[k] * sum
        })
        .collect();
    Some(power)
}

/// Convert power basis coefficients to Bezier coefficients over `[0, 1]` of
/// the same order.
///
/// `b(i) = sum_k C(i, k) / C(n, k) * a(k)`
///
/// Returns [`None`] for an empty slice or one longer than [`MAX_ORDER`].
#[must_use]
pub fn power_to_bezier(power: &[f64]) -> Option<Vec<f64>> {
    if power.is_empty() || power.len() > MAX_ORDER {
        return None;
    }
    let n = power.len() - 1;
    let row_n = row_unchecked(n);
    let bezier = (0..=n)
        .map(|i| {
            let row_i = row_unchecked(i);
            (0..=i).map(|k| row_i[k] / row_n[k] * power[k]).sum()
        })
        .collect();
    Some(bezier)
}
