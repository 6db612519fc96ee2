use crate::util::float::conditional_divide_fraction;

use super::{ConvergenceControl, NewtonIterator};

/// Forward difference offset used by [`Newton1dUnboundedApproximateDerivative`].
pub const DEFAULT_DERIVATIVE_H: f64 = 1.0e-8;

/// A function that evaluates to its value and first derivative.
pub trait FunctionWithDerivative {
    /// `(f(x), f'(x))`, or [`None`] if `x` is outside the domain.
    fn evaluate(&self, x: f64) -> Option<(f64, f64)>;
}

impl<F> FunctionWithDerivative for F
where
    F: Fn(f64) -> Option<(f64, f64)>,
{
    fn evaluate(&self, x: f64) -> Option<(f64, f64)> {
        self(x)
    }
}

/// A function that only evaluates to its value.
pub trait ScalarFunction {
    fn evaluate(&self, x: f64) -> Option<f64>;
}

impl<F> ScalarFunction for F
where
    F: Fn(f64) -> Option<f64>,
{
    fn evaluate(&self, x: f64) -> Option<f64> {
        self(x)
    }
}

/// Newton's method in one unknown, with a derivative supplied by the
/// function.
///
/// Solves `f(x) = target`, where the target is zero unless changed with
/// [`Newton1dUnbounded::set_target`].
#[derive(Clone, Debug)]
pub struct Newton1dUnbounded<F> {
    func: F,
    x: f64,
    step: f64,
    target: f64,
    control: ConvergenceControl,
}

impl<F: FunctionWithDerivative> Newton1dUnbounded<F> {
    pub fn new(func: F) -> Self {
        Self::with_control(func, ConvergenceControl::default())
    }

    pub const fn with_control(func: F, control: ConvergenceControl) -> Self {
        Self {
            func,
            x: 0.0,
            step: 0.0,
            target: 0.0,
            control,
        }
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }
}

impl<F: FunctionWithDerivative> NewtonIterator for Newton1dUnbounded<F> {
    type Estimate = f64;

    fn control(&self) -> &ConvergenceControl {
        &self.control
    }

    fn control_mut(&mut self) -> &mut ConvergenceControl {
        &mut self.control
    }

    fn estimate(&self) -> f64 {
        self.x
    }

    fn compute_step(&mut self) -> bool {
        let Some((f, df)) = self.func.evaluate(self.x) else {
            return false;
        };
        let Some(step) = conditional_divide_fraction(f - self.target, df) else {
            return false;
        };
        self.step = step;
        true
    }

    fn current_step_size(&self) -> f64 {
        self.step.abs() / (1.0 + self.x.abs())
    }

    fn apply_current_step(&mut self, _is_final_step: bool) -> bool {
        self.x -= self.step;
        true
    }
}

/// Newton's method in one unknown, estimating the derivative by a forward
/// difference.
#[derive(Clone, Debug)]
pub struct Newton1dUnboundedApproximateDerivative<F> {
    func: F,
    x: f64,
    step: f64,
    derivative_h: f64,
    control: ConvergenceControl,
}

impl<F: ScalarFunction> Newton1dUnboundedApproximateDerivative<F> {
    pub fn new(func: F) -> Self {
        Self::with_control(func, ConvergenceControl::default())
    }

    pub const fn with_control(func: F, control: ConvergenceControl) -> Self {
        Self {
            func,
            x: 0.0,
            step: 0.0,
            derivative_h: DEFAULT_DERIVATIVE_H,
            control,
        }
    }

    /// Change the forward difference offset. Non-positive values are ignored.
    #[must_use]
    pub fn with_derivative_h(mut self, h: f64) -> Self {
        if h > 0.0 {
            self.derivative_h = h;
        }
        self
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }
}

impl<F: ScalarFunction> NewtonIterator for Newton1dUnboundedApproximateDerivative<F> {
    type Estimate = f64;

    fn control(&self) -> &ConvergenceControl {
        &self.control
    }

    fn control_mut(&mut self) -> &mut ConvergenceControl {
        &mut self.control
    }

    fn estimate(&self) -> f64 {
        self.x
    }

    fn compute_step(&mut self) -> bool {
        let Some(f0) = self.func.evaluate(self.x) else {
            return false;
        };
        let Some(f1) = self.func.evaluate(self.x + self.derivative_h) else {
            return false;
        };
        let df = (f1 - f0) / self.derivative_h;
        let Some(step) = conditional_divide_fraction(f0, df) else {
            return false;
        };
        self.step = step;
        true
    }

    fn current_step_size(&self) -> f64 {
        self.step.abs() / (1.0 + self.x.abs())
    }

    fn apply_current_step(&mut self, _is_final_step: bool) -> bool {
        self.x -= self.step;
        true
    }
}

#[cfg(test)]
mod test {
    use super::{Newton1dUnbounded, Newton1dUnboundedApproximateDerivative};
    use crate::newton::{ConvergenceControl, Error, NewtonIterator};

    #[allow(clippy::unnecessary_wraps)]
    fn x2_minus_2(x: f64) -> Option<(f64, f64)> {
        Some((x.mul_add(x, -2.0), 2.0 * x))
    }

    #[test]
    fn square_root_of_two() {
        let _ = simple_logger::init_with_level(log::Level::Debug);
        let mut newton = Newton1dUnbounded::new(x2_minus_2);
        newton.set_x(1.0);
        let iterations = newton.run_iterations().unwrap();
        assert!(iterations <= 6, "took {iterations} iterations");
        assert!((newton.x() - 2f64.sqrt()).abs() < 1E-11);
    }

    #[test]
    fn zero_derivative_fails_the_step() {
        let mut newton = Newton1dUnbounded::new(x2_minus_2);
        newton.set_x(0.0);
        assert!(!newton.compute_step());
        assert_eq!(
            newton.run_iterations(),
            Err(Error::StepFailed { iteration: 1 })
        );
    }

    #[test]
    fn solves_for_a_target_value() {
        let mut newton = Newton1dUnbounded::new(|x: f64| Some((x.exp(), x.exp())));
        newton.set_x(0.0);
        newton.set_target(3.0);
        assert!(newton.run_iterations().is_ok());
        assert!((newton.x() - 3f64.ln()).abs() < 1E-11);
    }

    #[test]
    fn evaluation_failure_fails_the_step() {
        let mut newton = Newton1dUnbounded::new(|x: f64| {
            if x > 0.0 {
                Some((x.ln(), x.recip()))
            } else {
                None
            }
        });
        newton.set_x(-1.0);
        assert!(matches!(
            newton.run_iterations(),
            Err(Error::StepFailed { .. })
        ));
    }

    #[test]
    fn exhausted_budget_reports_estimate() {
        // x^2 + 1 has no real root
        let mut newton = Newton1dUnbounded::with_control(
            |x: f64| Some((x.mul_add(x, 1.0), 2.0 * x)),
            ConvergenceControl::default().with_max_iterations(4),
        );
        newton.set_x(0.5);
        match newton.run_iterations() {
            Err(Error::NoConverge { iterations, best }) => {
                assert_eq!(iterations, 4);
                assert_eq!(best, newton.x());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn approximate_derivative_cosine() {
        let mut newton = Newton1dUnboundedApproximateDerivative::new(|x: f64| Some(x.cos()));
        newton.set_x(1.0);
        assert!(newton.run_iterations().is_ok());
        assert!((newton.x() - std::f64::consts::FRAC_PI_2).abs() < 1E-10);
    }
}
