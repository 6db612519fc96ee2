//! Macros for reducing doc comment boilerplate.

/// Default explanation for [`crate::newton::Error`] values.
macro_rules! errors_newton {
    () => {
        r"- `StepFailed`: the evaluator could not produce a value, or the derivative (Jacobian) was numerically singular.
- `NoConverge`: the iteration budget ran out before two successive steps were below tolerance. The last estimate is kept by the iterator.
"
    };
}
pub(crate) use errors_newton;

/// Documents the Pascal-row bound shared by all Bezier constructors.
macro_rules! none_order_too_large {
    () => {
        r"Returns [`None`] if the order is zero or exceeds [`crate::pascal::MAX_ORDER`], beyond which binomial weights are no longer exact in `f64`.

"
    };
}
pub(crate) use none_order_too_large;
