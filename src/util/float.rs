//! Numeric policy shared by the closed-form solvers and the Newton iterators.

/// Magnitudes below this are treated as zero by the closed-form solvers.
///
/// Applied to intermediate quantities of a polynomial normalized to a unit
/// leading coefficient, relative to the size of the terms they were computed
/// from, so roots near unit scale see an absolute `1e-9`.
pub const ZERO_TOLERANCE: f64 = 1.0e-9;

/// A leading coefficient is negligible when it is no larger than this fraction
/// of the other coefficients, and a denominator is unusable when it is no
/// larger than this fraction of its numerator.
pub const SAFE_DIVIDE_FACTOR: f64 = 1.0e-14;

/// Relative step size below which a Newton polishing step counts as converged.
pub const POLISH_RELATIVE_TOLERANCE: f64 = 1.0e-10;

/// Largest quotient magnitude [`conditional_divide_fraction`] will produce.
pub const LARGE_FRACTION_RESULT: f64 = 1.0e10;

/// True if `x` is negligible next to `scale`, the magnitude of the terms it
/// was computed from. Only an exact zero is negligible at zero scale.
#[inline]
pub(crate) fn is_small_ratio(x: f64, scale: f64) -> bool {
    x.abs() <= ZERO_TOLERANCE * scale
}

/// `numerator / denominator`, or [`None`] if the denominator is too small
/// relative to the numerator.
#[inline]
pub(crate) fn safe_divide(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.abs() > SAFE_DIVIDE_FACTOR * numerator.abs() {
        Some(numerator / denominator)
    } else {
        None
    }
}

/// `numerator / denominator`, or [`None`] if the quotient would exceed
/// [`LARGE_FRACTION_RESULT`] in magnitude.
#[inline]
pub(crate) fn conditional_divide_fraction(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.abs() * LARGE_FRACTION_RESULT <= numerator.abs() {
        return None;
    }
    Some(numerator / denominator)
}

/// True if the last coefficient is negligible compared to all the others.
///
/// A polynomial whose coefficients are all zero is considered degenerate as
/// well.
pub(crate) fn leading_is_negligible(coffs: &[f64]) -> bool {
    let Some((last, rest)) = coffs.split_last() else {
        return true;
    };
    let reference = rest.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()));
    last.abs() <= SAFE_DIVIDE_FACTOR * reference
}

/// Largest absolute value in a slice, zero for an empty slice.
pub(crate) fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, c| acc.max(c.abs()))
}

/// Makes a degenerate float normal again by either clamping it or replacing
/// NaN with zero.
pub(crate) fn f64_make_normal(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }

    if x.is_infinite() && x.is_sign_positive() {
        return f64::MAX;
    }

    if x.is_infinite() && x.is_sign_negative() {
        return f64::MIN;
    }

    if x.is_subnormal() {
        return 0.0;
    }

    x
}

/// If a float is subnormal or zero, bump it to the nearest normal number or
/// `MIN_POSITIVE` if it's zero.
pub(crate) fn f64_make_nonzero(x: f64) -> f64 {
    let x = f64_make_normal(x);
    if x.abs() < f64::MIN_POSITIVE {
        f64::MIN_POSITIVE.copysign(x)
    } else {
        x
    }
}
