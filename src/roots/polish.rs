use crate::{
    power::evaluate_with_derivative,
    util::float::{safe_divide, POLISH_RELATIVE_TOLERANCE},
};

const MAX_POLISH_ITERATIONS: usize = 10;

/// Nudge each of a sorted set of approximate roots of the power basis
/// polynomial `coffs` toward an exact root with Newton's method.
///
/// A root is only replaced if Newton's method converges (two successive steps
/// below [`POLISH_RELATIVE_TOLERANCE`]) and the improved value stays between
/// its neighbors. Otherwise it keeps its original value, so the roots remain
/// sorted.
pub fn improve_sorted_roots(coffs: &[f64], roots: &mut [f64]) {
    let original = roots.to_vec();
    for i in 0..roots.len() {
        let Some(x) = polish_root(coffs, original[i]) else {
            continue;
        };

        let lower = if i > 0 {
            original[i - 1].max(roots[i - 1])
        } else {
            f64::NEG_INFINITY
        };
        let upper = original.get(i + 1).copied().unwrap_or(f64::INFINITY);

        if (lower..=upper).contains(&x) {
            roots[i] = x;
        } else {
            log::debug!(
                "rejected polished root outside its bracket {{original: {}, polished: {x}, lower: {lower}, upper: {upper}}}",
                original[i]
            );
        }
    }
}

/// Newton's method on `coffs` from `start`, [`None`] unless two successive
/// steps fall below [`POLISH_RELATIVE_TOLERANCE`].
pub(super) fn polish_root(coffs: &[f64], start: f64) -> Option<f64> {
    let mut x = start;
    let mut num_converged = 0;
    for _ in 0..MAX_POLISH_ITERATIONS {
        let (f, df) = evaluate_with_derivative(coffs, x);
        let dx = safe_divide(f, df)?;
        x -= dx;
        if dx.abs() < POLISH_RELATIVE_TOLERANCE * (1.0 + x.abs()) {
            num_converged += 1;
            if num_converged >= 2 {
                return Some(x);
            }
        } else {
            num_converged = 0;
        }
    }
    None
}
