use itertools::Itertools;

use crate::{
    newton::{ConvergenceControl, NewtonIterator},
    pascal::{self, row_unchecked, MAX_ORDER},
    util::{casting::usize_to_f64, doc_macros::none_order_too_large},
};

/// Default tolerance for [`UnivariateBezier::run_newton`].
pub const NEWTON_TOLERANCE: f64 = 1.0e-11;

/// Tolerance used when polishing sign-crossing brackets in
/// [`UnivariateBezier::deflate_roots_01`].
const DEFLATION_NEWTON_TOLERANCE: f64 = 1.0e-10;

const NEWTON_MAX_ITERATIONS: usize = 10;

/// A Newton step is refused if `|f|` exceeds `|f'|` by more than this factor.
const NEWTON_BIG_STEP: f64 = 10.0;

/// A univariate polynomial in Bernstein form over `[0, 1]`, of any order up to
/// [`MAX_ORDER`].
///
/// The order is the number of coefficients, one more than the degree. Order
/// one is a constant; deflation can reduce the order to zero, which is the
/// empty polynomial.
#[derive(Clone, Debug, PartialEq)]
pub struct UnivariateBezier {
    coffs: Vec<f64>,
}

impl UnivariateBezier {
    /// The zero polynomial of the given order.
    ///
    #[doc = none_order_too_large!()]
    #[must_use]
    pub fn new(order: usize) -> Option<Self> {
        if order == 0 || order > MAX_ORDER {
            return None;
        }
        Some(Self {
            coffs: vec![0.0; order],
        })
    }

    /// Wrap a copy of the given Bezier coefficients.
    ///
    #[doc = none_order_too_large!()]
    #[must_use]
    pub fn from_coffs(coffs: &[f64]) -> Option<Self> {
        if coffs.is_empty() || coffs.len() > MAX_ORDER {
            return None;
        }
        Some(Self {
            coffs: coffs.to_vec(),
        })
    }

    /// The Bezier form over `[0, 1]` of a power basis polynomial.
    ///
    #[doc = none_order_too_large!()]
    #[must_use]
    pub fn from_power(power_coffs: &[f64]) -> Option<Self> {
        pascal::power_to_bezier(power_coffs).map(|coffs| Self { coffs })
    }

    /// The product of two Bezier polynomials, of order
    /// `a.order() + b.order() - 1`.
    ///
    /// Returns [`None`] if the product would exceed [`MAX_ORDER`] or either
    /// factor is empty.
    #[must_use]
    pub fn product(a: &Self, b: &Self) -> Option<Self> {
        if a.order() == 0 || b.order() == 0 {
            return None;
        }
        let m = a.order() - 1;
        let n = b.order() - 1;
        if m + n + 1 > MAX_ORDER {
            return None;
        }
        let (row_m, row_n, row_mn) = (row_unchecked(m), row_unchecked(n), row_unchecked(m + n));
        let mut coffs = vec![0.0; m + n + 1];
        for (i, ai) in a.coffs.iter().enumerate() {
            for (j, bj) in b.coffs.iter().enumerate() {
                coffs[i + j] += row_m[i] * row_n[j] / row_mn[i + j] * ai * bj;
            }
        }
        Some(Self { coffs })
    }

    #[must_use]
    pub fn order(&self) -> usize {
        self.coffs.len()
    }

    #[must_use]
    pub fn coffs(&self) -> &[f64] {
        &self.coffs
    }

    pub(crate) fn coffs_mut(&mut self) -> &mut [f64] {
        &mut self.coffs
    }

    /// Values of the Bernstein basis functions at `u`.
    #[must_use]
    pub fn basis_functions(&self, u: f64) -> Vec<f64> {
        pascal::bezier_basis_values(self.order(), u).unwrap_or_default()
    }

    /// Evaluate the polynomial at `u`. The empty polynomial evaluates to zero.
    #[must_use]
    pub fn evaluate(&self, u: f64) -> f64 {
        self.basis_functions(u)
            .iter()
            .zip(&self.coffs)
            .map(|(b, c)| b * c)
            .sum()
    }

    /// First derivative at `u`, from the scaled differences of adjacent
    /// coefficients.
    #[must_use]
    pub fn derivative_at(&self, u: f64) -> f64 {
        let order = self.order();
        if order < 2 {
            return 0.0;
        }
        let basis = pascal::bezier_basis_values(order - 1, u).unwrap_or_default();
        let sum: f64 = self
            .coffs
            .iter()
            .tuple_windows()
            .zip(basis)
            .map(|((c0, c1), b)| (c1 - c0) * b)
            .sum();
        usize_to_f64(order - 1) * sum
    }

    /// Copy with every coefficient multiplied by `scale`.
    #[must_use]
    pub fn scaled(&self, scale: f64) -> Self {
        Self {
            coffs: self.coffs.iter().map(|c| c * scale).collect(),
        }
    }

    /// Copy with `value` added to the polynomial, which adds it to every
    /// coefficient.
    #[must_use]
    pub fn offset(&self, value: f64) -> Self {
        Self {
            coffs: self.coffs.iter().map(|c| c + value).collect(),
        }
    }

    /// Divide by `u`, assuming the first coefficient is zero.
    ///
    /// The order drops by one. The first coefficient is not inspected: if it
    /// is not zero, its contribution is discarded.
    pub fn deflate_left(&mut self) {
        let order = self.order();
        if order <= 1 {
            self.coffs.clear();
            return;
        }
        let n = order - 1;
        let (row_hi, row_lo) = (row_unchecked(n), row_unchecked(n - 1));
        for j in 0..n {
            self.coffs[j] = self.coffs[j + 1] * row_hi[j + 1] / row_lo[j];
        }
        self.coffs.truncate(n);
    }

    /// Divide by `1 - u`, assuming the last coefficient is zero.
    ///
    /// The order drops by one. The last coefficient is not inspected: if it
    /// is not zero, its contribution is discarded.
    pub fn deflate_right(&mut self) {
        let order = self.order();
        if order <= 1 {
            self.coffs.clear();
            return;
        }
        let n = order - 1;
        let (row_hi, row_lo) = (row_unchecked(n), row_unchecked(n - 1));
        for i in 0..n {
            self.coffs[i] *= row_hi[i] / row_lo[i];
        }
        self.coffs.truncate(n);
    }

    /// Divide by `(u - root)` in place, dropping the order by one.
    ///
    /// Returns the remainder of the division, which is near zero if `root`
    /// really is a root. The elimination runs from whichever end keeps the
    /// pivot `root` or `1 - root` at least one half.
    pub fn deflate_root(&mut self, root: f64) -> f64 {
        let order = self.order();
        if order == 0 {
            return 0.0;
        }
        if order == 1 {
            let remainder = self.coffs[0];
            self.coffs.clear();
            return remainder;
        }

        // (u - root) in degree one Bernstein form is b0 (1 - u) + b1 u
        let b0 = -root;
        let b1 = 1.0 - root;
        let n = order - 1;
        let nf = usize_to_f64(n);
        let weight = |k: usize| usize_to_f64(k) / nf;

        let mut quotient = vec![0.0; n];
        let remainder = if root > 0.5 {
            let mut previous = 0.0;
            for (k, q) in quotient.iter_mut().enumerate() {
                *q = (self.coffs[k] - b1 * weight(k) * previous) / (b0 * weight(n - k));
                previous = *q;
            }
            self.coffs[n] - b1 * previous
        } else {
            let mut next = 0.0;
            for k in (1..=n).rev() {
                quotient[k - 1] = (self.coffs[k] - b0 * weight(n - k) * next) / (b1 * weight(k));
                next = quotient[k - 1];
            }
            self.coffs[0] - b0 * next
        };

        self.coffs = quotient;
        remainder
    }

    /// Refine an estimate of a root in `[0, 1]` with Newton's method.
    ///
    /// At most ten iterations are run; the result is only accepted after two
    /// successive steps smaller than `tolerance`. Returns [`None`] if the
    /// iteration diverges or does not converge in time.
    #[must_use]
    pub fn run_newton(&self, start_fraction: f64, tolerance: f64) -> Option<f64> {
        let mut iterator = BezierNewton {
            bezier: self,
            u: start_fraction,
            du: 0.0,
            control: ConvergenceControl::default()
                .with_step_size_tolerance(tolerance)
                .with_max_iterations(NEWTON_MAX_ITERATIONS),
        };
        iterator.run_iterations().ok().map(|_| iterator.u)
    }

    /// Real roots found by alternating sign-crossing search, Newton refinement
    /// and deflation, sorted ascending.
    ///
    /// Exact zeros at `u = 0` are removed first. Roots that do not produce a
    /// sign change in the coefficients (such as double roots) may be missed.
    /// Roots outside `[0, 1]` can be reported if Newton's method converges to
    /// them from a bracket.
    #[must_use]
    pub fn deflate_roots_01(&self) -> Vec<f64> {
        let mut work = self.clone();
        let mut roots = vec![];

        while work.order() > 1 {
            if work.coffs[0] == 0.0 {
                roots.push(0.0);
                work.deflate_left();
                continue;
            }

            let Some(root) = work.first_crossing_root() else {
                log::debug!(
                    "bezier deflation stopped, no sign change converged {{order: {}, found: {}}}",
                    work.order(),
                    roots.len()
                );
                break;
            };
            let remainder = work.deflate_root(root);
            log::trace!(
                "deflated root {{root: {root}, remainder: {remainder}, order: {}}}",
                work.order()
            );
            roots.push(root);
        }

        log::debug!(
            "bezier deflation found {} of {} possible roots",
            roots.len(),
            self.order().saturating_sub(1)
        );
        roots.sort_by(f64::total_cmp);
        roots
    }

    /// Newton-refined root from the first coefficient sign change that
    /// converges.
    fn first_crossing_root(&self) -> Option<f64> {
        let n = usize_to_f64(self.order() - 1);
        self.coffs
            .iter()
            .tuple_windows()
            .enumerate()
            .filter(|(_, (a0, a1))| *a0 * *a1 <= 0.0 && *a1 - *a0 != 0.0)
            .find_map(|(i, (a0, a1))| {
                let segment_fraction = -a0 / (a1 - a0);
                let start = (usize_to_f64(i) + segment_fraction) / n;
                self.run_newton(start, DEFLATION_NEWTON_TOLERANCE)
            })
    }
}

/// Newton iteration on the Bernstein form, with an absolute step tolerance.
struct BezierNewton<'a> {
    bezier: &'a UnivariateBezier,
    u: f64,
    du: f64,
    control: ConvergenceControl,
}

impl NewtonIterator for BezierNewton<'_> {
    type Estimate = f64;

    fn control(&self) -> &ConvergenceControl {
        &self.control
    }

    fn control_mut(&mut self) -> &mut ConvergenceControl {
        &mut self.control
    }

    fn estimate(&self) -> f64 {
        self.u
    }

    fn compute_step(&mut self) -> bool {
        let f = self.bezier.evaluate(self.u);
        let df = self.bezier.derivative_at(self.u);
        if f.abs() > NEWTON_BIG_STEP * df.abs() {
            return false;
        }
        // here f and df can only both be zero
        self.du = if df == 0.0 { 0.0 } else { f / df };
        true
    }

    fn current_step_size(&self) -> f64 {
        self.du.abs()
    }

    fn apply_current_step(&mut self, _is_final_step: bool) -> bool {
        self.u -= self.du;
        true
    }
}
