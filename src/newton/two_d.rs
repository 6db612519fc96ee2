use crate::util::float::conditional_divide_fraction;

use super::{ConvergenceControl, NewtonIterator};

/// Linearisation of a function of two unknowns at a point: its value and the
/// partial derivatives with respect to `u` and `v`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Plane2dByOriginAndVectors {
    pub origin: [f64; 2],
    pub vector_u: [f64; 2],
    pub vector_v: [f64; 2],
}

impl Plane2dByOriginAndVectors {
    #[must_use]
    pub const fn new(origin: [f64; 2], vector_u: [f64; 2], vector_v: [f64; 2]) -> Self {
        Self {
            origin,
            vector_u,
            vector_v,
        }
    }
}

/// A function of two unknowns with two components, evaluated to its
/// linearisation.
pub trait PlaneFunction2d {
    /// [`None`] if `(u, v)` is outside the domain.
    fn evaluate(&self, u: f64, v: f64) -> Option<Plane2dByOriginAndVectors>;
}

impl<F> PlaneFunction2d for F
where
    F: Fn(f64, f64) -> Option<Plane2dByOriginAndVectors>,
{
    fn evaluate(&self, u: f64, v: f64) -> Option<Plane2dByOriginAndVectors> {
        self(u, v)
    }
}

/// Solve `ux * x + vx * y = cx`, `uy * x + vy * y = cy` by Cramer's rule.
///
/// Returns [`None`] if either solution component would be unreasonably large
/// compared to the determinant, which covers singular systems.
#[must_use]
pub fn solve_2x2(ux: f64, vx: f64, uy: f64, vy: f64, cx: f64, cy: f64) -> Option<(f64, f64)> {
    let det = ux.mul_add(vy, -(vx * uy));
    let x = conditional_divide_fraction(cx.mul_add(vy, -(vx * cy)), det)?;
    let y = conditional_divide_fraction(ux.mul_add(cy, -(cx * uy)), det)?;
    Some((x, y))
}

/// Newton's method in two unknowns, driving both components of a
/// [`PlaneFunction2d`] to zero.
#[derive(Clone, Debug)]
pub struct Newton2dUnboundedWithDerivative<F> {
    func: F,
    u: f64,
    v: f64,
    du: f64,
    dv: f64,
    control: ConvergenceControl,
}

impl<F: PlaneFunction2d> Newton2dUnboundedWithDerivative<F> {
    pub fn new(func: F) -> Self {
        Self::with_control(func, ConvergenceControl::default())
    }

    pub const fn with_control(func: F, control: ConvergenceControl) -> Self {
        Self {
            func,
            u: 0.0,
            v: 0.0,
            du: 0.0,
            dv: 0.0,
            control,
        }
    }

    pub fn set_uv(&mut self, u: f64, v: f64) {
        self.u = u;
        self.v = v;
    }

    #[must_use]
    pub const fn u(&self) -> f64 {
        self.u
    }

    #[must_use]
    pub const fn v(&self) -> f64 {
        self.v
    }
}

impl<F: PlaneFunction2d> NewtonIterator for Newton2dUnboundedWithDerivative<F> {
    type Estimate = (f64, f64);

    fn control(&self) -> &ConvergenceControl {
        &self.control
    }

    fn control_mut(&mut self) -> &mut ConvergenceControl {
        &mut self.control
    }

    fn estimate(&self) -> (f64, f64) {
        (self.u, self.v)
    }

    fn compute_step(&mut self) -> bool {
        let Some(plane) = self.func.evaluate(self.u, self.v) else {
            return false;
        };
        let Some((du, dv)) = solve_2x2(
            plane.vector_u[0],
            plane.vector_v[0],
            plane.vector_u[1],
            plane.vector_v[1],
            plane.origin[0],
            plane.origin[1],
        ) else {
            return false;
        };
        self.du = du;
        self.dv = dv;
        true
    }

    fn current_step_size(&self) -> f64 {
        let a = self.du.abs() / (1.0 + self.u.abs());
        let b = self.dv.abs() / (1.0 + self.v.abs());
        a.max(b)
    }

    fn apply_current_step(&mut self, _is_final_step: bool) -> bool {
        self.u -= self.du;
        self.v -= self.dv;
        true
    }
}

#[cfg(test)]
mod test {
    use super::{solve_2x2, Newton2dUnboundedWithDerivative, Plane2dByOriginAndVectors};
    use crate::newton::{Error, NewtonIterator};

    #[allow(clippy::unnecessary_wraps)]
    fn circle_and_diagonal(u: f64, v: f64) -> Option<Plane2dByOriginAndVectors> {
        // u^2 + v^2 = 2 and u = v
        Some(Plane2dByOriginAndVectors::new(
            [u.mul_add(u, v * v) - 2.0, u - v],
            [2.0 * u, 1.0],
            [2.0 * v, -1.0],
        ))
    }

    #[test]
    fn small_systems() {
        let (x, y) = solve_2x2(2.0, 1.0, 1.0, 3.0, 5.0, 10.0).unwrap();
        assert!((x - 1.0).abs() < 1E-15);
        assert!((y - 3.0).abs() < 1E-15);
        assert!(solve_2x2(1.0, 2.0, 2.0, 4.0, 1.0, 1.0).is_none());
    }

    #[test]
    fn intersects_circle_and_diagonal() {
        let _ = simple_logger::init_with_level(log::Level::Debug);
        let mut newton = Newton2dUnboundedWithDerivative::new(circle_and_diagonal);
        newton.set_uv(2.0, 0.5);
        assert!(newton.run_iterations().is_ok());
        assert!((newton.u() - 1.0).abs() < 1E-11);
        assert!((newton.v() - 1.0).abs() < 1E-11);

        newton.set_uv(-3.0, -0.1);
        assert!(newton.run_iterations().is_ok());
        assert!((newton.u() + 1.0).abs() < 1E-11);
        assert!((newton.v() + 1.0).abs() < 1E-11);
    }

    #[test]
    fn singular_jacobian_fails() {
        let mut newton = Newton2dUnboundedWithDerivative::new(circle_and_diagonal);
        newton.set_uv(0.0, 0.0);
        assert_eq!(
            newton.run_iterations(),
            Err(Error::StepFailed { iteration: 1 })
        );
    }
}
