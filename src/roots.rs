//! Closed-form real roots of polynomials up to degree four.
//!
//! All solvers take power basis coefficients, lowest degree first, as a fixed
//! size array whose length is `degree + 1`. They never fail: a polynomial with
//! no real roots simply contributes no values. If the leading coefficient is
//! negligible relative to the others, the polynomial is solved as one of lower
//! degree instead.
//!
//! The `append_*` functions push onto a caller-owned buffer so that several
//! solves can share one allocation; only the values they push are touched.

mod analytic;
pub use analytic::{
    append_cubic_roots, append_cubic_roots_unsorted, append_linear_root,
    append_quadratic_roots, append_quartic_roots, cubic_roots, quartic_roots, solve_quadratic,
};
mod polish;
pub use polish::improve_sorted_roots;

use crate::util::casting::usize_to_f64;

/// The value in `data` farthest from the mean of all of `data`.
///
/// Returns [`None`] for an empty slice.
#[must_use]
pub fn most_distant_from_mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let mean = data.iter().sum::<f64>() / usize_to_f64(data.len());
    data.iter()
        .copied()
        .max_by(|a, b| (a - mean).abs().total_cmp(&(b - mean).abs()))
}
