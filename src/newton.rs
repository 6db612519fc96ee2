//! A small Newton iteration framework.
//!
//! Iterators own their current estimate and a [`ConvergenceControl`]. Each
//! iteration computes a step, measures it, and applies it; the iteration is
//! only considered converged after several successive small steps, so that a
//! momentarily flat region does not count as a root.

use crate::util::doc_macros::errors_newton;

mod one_d;
pub use one_d::{
    FunctionWithDerivative, Newton1dUnbounded, Newton1dUnboundedApproximateDerivative,
    ScalarFunction,
};
mod two_d;
pub use two_d::{
    solve_2x2, Newton2dUnboundedWithDerivative, Plane2dByOriginAndVectors, PlaneFunction2d,
};

/// Default step size below which a step counts toward convergence.
pub const DEFAULT_STEP_SIZE_TOLERANCE: f64 = 1.0e-11;

/// Default number of successive small steps required for convergence.
pub const DEFAULT_SUCCESSIVE_CONVERGENCE_TARGET: usize = 2;

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 15;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error<T> {
    #[error("newton step could not be computed at iteration {iteration}")]
    StepFailed { iteration: usize },

    #[error("newton iteration did not converge within {iterations} iterations")]
    NoConverge { iterations: usize, best: T },
}

/// Tolerances, budget and progress counters of a Newton iteration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvergenceControl {
    step_size_tolerance: f64,
    successive_convergence_target: usize,
    max_iterations: usize,
    num_accepted_steps: usize,
    num_iterations: usize,
}

impl Default for ConvergenceControl {
    fn default() -> Self {
        Self {
            step_size_tolerance: DEFAULT_STEP_SIZE_TOLERANCE,
            successive_convergence_target: DEFAULT_SUCCESSIVE_CONVERGENCE_TARGET,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            num_accepted_steps: 0,
            num_iterations: 0,
        }
    }
}

impl ConvergenceControl {
    #[must_use]
    pub const fn with_step_size_tolerance(mut self, tolerance: f64) -> Self {
        self.step_size_tolerance = tolerance;
        self
    }

    /// Values below one are treated as one.
    #[must_use]
    pub const fn with_successive_convergence_target(mut self, target: usize) -> Self {
        self.successive_convergence_target = if target == 0 { 1 } else { target };
        self
    }

    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub const fn step_size_tolerance(&self) -> f64 {
        self.step_size_tolerance
    }

    #[must_use]
    pub const fn successive_convergence_target(&self) -> usize {
        self.successive_convergence_target
    }

    #[must_use]
    pub const fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Iterations started by the last call to
    /// [`NewtonIterator::run_iterations`].
    #[must_use]
    pub const fn num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// Record a step of size `delta`. True once the last
    /// `successive_convergence_target` steps were all below tolerance.
    pub fn accept_step(&mut self, delta: f64) -> bool {
        if delta < self.step_size_tolerance {
            self.num_accepted_steps += 1;
            self.num_accepted_steps >= self.successive_convergence_target
        } else {
            self.num_accepted_steps = 0;
            false
        }
    }

    pub fn reset(&mut self) {
        self.num_accepted_steps = 0;
        self.num_iterations = 0;
    }

    fn begin_iteration(&mut self) -> Option<usize> {
        if self.num_iterations >= self.max_iterations {
            return None;
        }
        self.num_iterations += 1;
        Some(self.num_iterations)
    }
}

/// One Newton style iteration.
///
/// Implementors provide the step computation; the convergence loop is
/// provided.
pub trait NewtonIterator {
    /// The value being solved for, reported alongside non-convergence.
    type Estimate: Clone;

    fn control(&self) -> &ConvergenceControl;

    fn control_mut(&mut self) -> &mut ConvergenceControl;

    fn estimate(&self) -> Self::Estimate;

    /// Evaluate at the current estimate and compute a step. False if the
    /// function or its derivative could not be used.
    fn compute_step(&mut self) -> bool;

    /// Magnitude of the computed step, normalized to be scale independent.
    fn current_step_size(&self) -> f64;

    /// Move the estimate by the computed step. `is_final_step` is set on the
    /// step that completes convergence. False if the step was refused, which
    /// ends the iteration with [`Error::StepFailed`].
    fn apply_current_step(&mut self, is_final_step: bool) -> bool;

    fn test_convergence(&mut self, delta: f64) -> bool {
        self.control_mut().accept_step(delta)
    }

    fn num_iterations(&self) -> usize {
        self.control().num_iterations()
    }

    /// Iterate until convergence, returning the number of iterations used.
    ///
    /// The step that completes convergence is still applied, as a final
    /// correction.
    ///
    /// # Errors
    #[doc = errors_newton!()]
    fn run_iterations(&mut self) -> Result<usize, Error<Self::Estimate>> {
        self.control_mut().reset();
        while let Some(iteration) = self.control_mut().begin_iteration() {
            if !self.compute_step() {
                log::debug!("newton step failed {{iteration: {iteration}}}");
                return Err(Error::StepFailed { iteration });
            }
            let step_size = self.current_step_size();
            log::trace!("newton step {{iteration: {iteration}, step_size: {step_size}}}");
            let converged = self.test_convergence(step_size);
            if !self.apply_current_step(converged) {
                log::debug!("newton step refused {{iteration: {iteration}, final: {converged}}}");
                return Err(Error::StepFailed { iteration });
            }
            if converged {
                log::debug!("newton converged {{iterations: {iteration}}}");
                return Ok(iteration);
            }
        }
        let iterations = self.num_iterations();
        log::debug!("newton did not converge {{iterations: {iterations}}}");
        Err(Error::NoConverge {
            iterations,
            best: self.estimate(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::{ConvergenceControl, Error, NewtonIterator};

    /// Halves its estimate every step, so the step size decays geometrically.
    struct Halving {
        x: f64,
        dx: f64,
        refuse_final_step: bool,
        control: ConvergenceControl,
    }

    impl NewtonIterator for Halving {
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
            self.dx = 0.5 * self.x;
            true
        }

        fn current_step_size(&self) -> f64 {
            self.dx.abs()
        }

        fn apply_current_step(&mut self, is_final_step: bool) -> bool {
            if is_final_step && self.refuse_final_step {
                return false;
            }
            self.x -= self.dx;
            true
        }
    }

    #[test]
    fn needs_successive_small_steps() {
        let mut control = ConvergenceControl::default().with_step_size_tolerance(1.0);
        assert!(!control.accept_step(0.5));
        assert!(!control.accept_step(2.0));
        assert!(!control.accept_step(0.5));
        assert!(control.accept_step(0.5));

        let mut control = control.with_successive_convergence_target(0);
        control.reset();
        assert!(control.accept_step(0.5));
    }

    #[test]
    fn converges_within_budget() {
        let mut halving = Halving {
            x: 1.0,
            dx: 0.0,
            refuse_final_step: false,
            control: ConvergenceControl::default()
                .with_step_size_tolerance(0.1)
                .with_max_iterations(10),
        };
        // steps are 0.5, 0.25, 0.125, 0.0625, 0.03125
        assert_eq!(halving.run_iterations(), Ok(5));
        assert_eq!(halving.num_iterations(), 5);
        assert!((halving.x - 1.0 / 32.0).abs() < 1E-15);
    }

    #[test]
    fn reports_best_estimate_when_exhausted() {
        let mut halving = Halving {
            x: 1.0,
            dx: 0.0,
            refuse_final_step: false,
            control: ConvergenceControl::default()
                .with_step_size_tolerance(1E-3)
                .with_max_iterations(3),
        };
        assert_eq!(
            halving.run_iterations(),
            Err(Error::NoConverge {
                iterations: 3,
                best: 0.125
            })
        );

        // the counters restart on every run
        assert!(halving.run_iterations().is_err());
        assert_eq!(halving.num_iterations(), 3);
    }

    #[test]
    fn refused_step_is_a_failure() {
        let mut halving = Halving {
            x: 1.0,
            dx: 0.0,
            refuse_final_step: true,
            control: ConvergenceControl::default()
                .with_step_size_tolerance(0.1)
                .with_max_iterations(10),
        };
        assert_eq!(halving.run_iterations(), Err(Error::StepFailed { iteration: 5 }));
        // the refused step was not applied
        assert!((halving.x - 1.0 / 16.0).abs() < 1E-15);
    }
}
