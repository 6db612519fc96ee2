//! Real root finding for computational geometry.
//!
//! - [`roots`]: closed-form solvers for polynomials up to degree four, in the
//!   power basis, with a Newton polishing pass.
//! - [`bezier`]: polynomials in Bernstein form over `[0, 1]`, with subdivision,
//!   deflation and root extraction.
//! - [`trig`]: equations in `cos` and `sin` of an angle, such as unit circle
//!   intersections with lines, conics and ellipses.
//! - [`newton`]: a small Newton iteration framework in one or two unknowns.
//!
//! Nothing in this crate panics or errors on degenerate input. An equation
//! without real solutions yields no roots, an equation that holds everywhere
//! yields [`None`], and Newton iterations report failure through
//! [`newton::Error`].
//!
//! ```
//! use geom_roots::roots;
//!
//! // x^2 - 2 = 0
//! let r = roots::solve_quadratic(-2.0, 0.0, 1.0);
//! assert!((r[0] + 2f64.sqrt()).abs() < 1E-15);
//! assert!((r[1] - 2f64.sqrt()).abs() < 1E-15);
//! ```
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

mod util;
#[doc(hidden)]
pub use util::__testing;
pub use util::float::{
    LARGE_FRACTION_RESULT, POLISH_RELATIVE_TOLERANCE, SAFE_DIVIDE_FACTOR, ZERO_TOLERANCE,
};

pub mod bezier;
pub use bezier::{BezierCoffs, UnivariateBezier};

pub mod newton;
pub use newton::{ConvergenceControl, NewtonIterator};

pub mod pascal;
pub mod power;
pub mod roots;

pub mod trig;
pub use trig::CircleEllipseHit;
