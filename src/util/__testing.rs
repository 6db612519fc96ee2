//! Testing utilities, do not depend on any of these in production!

use fastrand::Rng;
use itertools::Itertools;

use crate::{bezier::UnivariateBezier, pascal, power};

use super::float::f64_make_nonzero;

struct RandStreamF64 {
    state: Rng,
}

impl RandStreamF64 {
    fn new(seed: u64) -> Self {
        Self {
            state: Rng::with_seed(seed),
        }
    }
}

impl Iterator for RandStreamF64 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        // NOTE: I think fastrand::f64 does not emit subnormals, but just in case
        Some(f64_make_nonzero(self.state.f64()))
    }
}

/// Endless stream of uniformly distributed reals in `[min, max)`.
pub struct RandStreamR64 {
    real_stream: RandStreamF64,
    min: f64,
    max: f64,
}

impl RandStreamR64 {
    #[must_use]
    pub fn new(seed: u64, min: f64, max: f64) -> Self {
        assert!(min <= max, "minimum should be smaller or equal to maximum");
        let real_stream = RandStreamF64::new(seed);
        Self {
            real_stream,
            min,
            max,
        }
    }
}

impl Iterator for RandStreamR64 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.real_stream.next()?).mul_add(self.max - self.min, self.min))
    }
}

/// Ascending roots where consecutive roots are separated by a gap drawn from
/// `gap_stream`, starting at a value drawn from `start_stream`.
///
/// # Panics
/// If either stream runs dry.
pub fn separated_roots(
    mut start_stream: impl Iterator<Item = f64>,
    gap_stream: impl Iterator<Item = f64>,
    count: usize,
) -> Vec<f64> {
    let start = start_stream.next().expect("rng stream should be infinite");
    let mut roots = vec![start];
    roots.extend(gap_stream.take(count - 1).scan(start, |acc, gap| {
        *acc += gap;
        Some(*acc)
    }));
    roots
}

/// Generate one power basis test case of degree 2 to 4 with known, sorted
/// real roots, scaled by a value drawn from `scale_stream`.
///
/// # Panics
/// If `roots.len()` is not 2, 3 or 4, or the scale stream runs dry.
pub fn test_case_power_roots(
    roots: &[f64],
    mut scale_stream: impl Iterator<Item = f64>,
) -> Vec<f64> {
    let c = scale_stream.next().expect("rng stream should be infinite");
    match *roots {
        [r0, r1] => power::from_roots_and_c2(r0, r1, c).to_vec(),
        [r0, r1, r2] => power::from_roots_and_c3(r0, r1, r2, c).to_vec(),
        [r0, r1, r2, r3] => power::from_roots_and_c4(r0, r1, r2, r3, c).to_vec(),
        _ => panic!("only degrees 2 to 4 are supported"),
    }
}

/// The Bezier form over `[0, 1]` of `c * prod(x - root)`.
///
/// # Panics
/// If there are more roots than [`pascal::MAX_ORDER`] allows.
#[must_use]
pub fn bezier_from_roots(roots: &[f64], c: f64) -> UnivariateBezier {
    let mut power_coffs = vec![c];
    for root in roots {
        // multiply by (x - root)
        let mut next = vec![0.0; power_coffs.len() + 1];
        for (i, a) in power_coffs.iter().enumerate() {
            next[i] -= root * a;
            next[i + 1] += a;
        }
        power_coffs = next;
    }
    let coffs = pascal::power_to_bezier(&power_coffs).expect("order should be supported");
    UnivariateBezier::from_coffs(&coffs).expect("order should be supported")
}

/// Check that all roots have been found, in any order.
#[must_use]
pub fn check_roots(roots1: &[f64], roots2: &[f64], tol: f64) -> bool {
    if roots1.len() != roots2.len() {
        return false;
    }
    let mut roots2 = roots2.to_vec();

    for r1 in roots1 {
        let Some((best_idx, best_d)) = roots2
            .iter()
            .map(|r2| (r1 - r2).abs())
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
        else {
            return false;
        };
        if best_d > tol * r1.abs().max(1.0) {
            return false;
        }
        roots2.remove(best_idx);
    }
    true
}

/// Check that `roots` is sorted ascending and matches `expected` entry by
/// entry, within a tolerance that is absolute near zero and relative for
/// large values.
#[must_use]
pub fn check_sorted_roots(roots: &[f64], expected: &[f64], tol: f64) -> bool {
    roots.len() == expected.len()
        && roots.iter().tuple_windows().all(|(a, b)| a <= b)
        && roots
            .iter()
            .zip(expected)
            .all(|(r, e)| (r - e).abs() <= tol * e.abs().max(1.0))
}
