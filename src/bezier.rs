//! Polynomials in Bernstein (Bezier) form over `[0, 1]`.
//!
//! [`BezierCoffs`] picks a closed-form representation for orders 2 to 5 and
//! falls back to [`UnivariateBezier`] otherwise. Both share the same
//! coefficient layout: `coffs[i]` multiplies the `i`-th Bernstein polynomial
//! of degree `order - 1`.

use crate::{
    pascal::MAX_ORDER,
    util::{doc_macros::none_order_too_large, float},
};

mod fixed;
mod univariate;
pub use univariate::{UnivariateBezier, NEWTON_TOLERANCE};

/// Roots this far outside `[0, 1]` are still kept (and clamped) by
/// [`BezierCoffs::filter_to_range_01`].
pub const RANGE_01_TOLERANCE: f64 = 1.0e-12;

#[derive(Clone, Debug, PartialEq)]
pub enum BezierCoffs {
    Order2([f64; 2]),
    Order3([f64; 3]),
    Order4([f64; 4]),
    Order5([f64; 5]),
    General(UnivariateBezier),
}

impl BezierCoffs {
    /// Choose the representation for the order of `coffs`.
    ///
    #[doc = none_order_too_large!()]
    #[must_use]
    pub fn new(coffs: &[f64]) -> Option<Self> {
        let bezier = match *coffs {
            [c0, c1] => Self::Order2([c0, c1]),
            [c0, c1, c2] => Self::Order3([c0, c1, c2]),
            [c0, c1, c2, c3] => Self::Order4([c0, c1, c2, c3]),
            [c0, c1, c2, c3, c4] => Self::Order5([c0, c1, c2, c3, c4]),
            _ => Self::General(UnivariateBezier::from_coffs(coffs)?),
        };
        Some(bezier)
    }

    /// The zero polynomial of the given order.
    ///
    #[doc = none_order_too_large!()]
    #[must_use]
    pub fn zero(order: usize) -> Option<Self> {
        if order == 0 || order > MAX_ORDER {
            return None;
        }
        Self::new(&vec![0.0; order])
    }

    #[must_use]
    pub fn order(&self) -> usize {
        self.coffs().len()
    }

    #[must_use]
    pub fn coffs(&self) -> &[f64] {
        match self {
            Self::Order2(c) => c.as_slice(),
            Self::Order3(c) => c.as_slice(),
            Self::Order4(c) => c.as_slice(),
            Self::Order5(c) => c.as_slice(),
            Self::General(b) => b.coffs(),
        }
    }

    fn coffs_mut(&mut self) -> &mut [f64] {
        match self {
            Self::Order2(c) => c.as_mut_slice(),
            Self::Order3(c) => c.as_mut_slice(),
            Self::Order4(c) => c.as_mut_slice(),
            Self::Order5(c) => c.as_mut_slice(),
            Self::General(b) => b.coffs_mut(),
        }
    }

    #[must_use]
    pub fn evaluate(&self, u: f64) -> f64 {
        match self {
            Self::Order2(c) => fixed::evaluate2(c, u),
            Self::Order3(c) => fixed::evaluate3(c, u),
            Self::Order4(c) => fixed::evaluate4(c, u),
            Self::Order5(c) => fixed::evaluate5(c, u),
            Self::General(b) => b.evaluate(u),
        }
    }

    /// Values of the Bernstein basis functions at `u`, one per coefficient.
    #[must_use]
    pub fn basis_functions(&self, u: f64) -> Vec<f64> {
        match self {
            Self::Order2(_) => fixed::basis2(u).to_vec(),
            Self::Order3(_) => fixed::basis3(u).to_vec(),
            Self::Order4(_) => fixed::basis4(u).to_vec(),
            Self::Order5(_) => fixed::basis5(u).to_vec(),
            Self::General(b) => b.basis_functions(u),
        }
    }

    /// Evaluate a control polygon of `order` points with `dimension`
    /// interleaved components each, using this polynomial's basis functions.
    ///
    /// Returns [`None`] if `dimension` is zero or the polygon does not hold
    /// exactly `order * dimension` values.
    #[must_use]
    pub fn sum_basis_functions(
        &self,
        u: f64,
        polygon: &[f64],
        dimension: usize,
    ) -> Option<Vec<f64>> {
        if dimension == 0 || polygon.len() != self.order() * dimension {
            return None;
        }
        let mut point = vec![0.0; dimension];
        for (b, pole) in self
            .basis_functions(u)
            .into_iter()
            .zip(polygon.chunks_exact(dimension))
        {
            for (x, p) in point.iter_mut().zip(pole) {
                *x += b * p;
            }
        }
        Some(point)
    }

    #[must_use]
    pub fn derivative_at(&self, u: f64) -> f64 {
        match self {
            Self::Order2(c) => fixed::derivative2(c, u),
            Self::Order3(c) => fixed::derivative3(c, u),
            Self::Order4(c) => fixed::derivative4(c, u),
            Self::Order5(c) => fixed::derivative5(c, u),
            Self::General(b) => b.derivative_at(u),
        }
    }

    /// Split at `u` with de Casteljau's algorithm. `left` reproduces this
    /// polynomial on `[0, u]` and `right` on `[u, 1]`, each reparametrized to
    /// `[0, 1]`.
    ///
    /// Returns false and leaves both targets untouched if either has a
    /// different order.
    pub fn subdivide_into(&self, u: f64, left: &mut Self, right: &mut Self) -> bool {
        let order = self.order();
        if left.order() != order || right.order() != order {
            return false;
        }
        let v = 1.0 - u;
        let left = left.coffs_mut();
        let right = right.coffs_mut();
        left.copy_from_slice(self.coffs());
        right.copy_from_slice(self.coffs());
        for level in 1..order {
            for i1 in (level..order).rev() {
                left[i1] = v.mul_add(left[i1 - 1], u * left[i1]);
            }
            for i0 in 0..order - level {
                right[i0] = u.mul_add(right[i0 + 1], v * right[i0]);
            }
        }
        true
    }

    #[must_use]
    pub fn subdivide(&self, u: f64) -> (Self, Self) {
        let mut left = self.clone();
        let mut right = self.clone();
        self.subdivide_into(u, &mut left, &mut right);
        (left, right)
    }

    fn map_coffs(&self, f: impl Fn(f64) -> f64) -> Self {
        let mut mapped = self.clone();
        for c in mapped.coffs_mut() {
            *c = f(*c);
        }
        mapped
    }

    #[must_use]
    pub fn scaled(&self, scale: f64) -> Self {
        self.map_coffs(|c| c * scale)
    }

    /// Add a constant to the polynomial.
    #[must_use]
    pub fn offset(&self, value: f64) -> Self {
        self.map_coffs(|c| c + value)
    }

    #[must_use]
    pub fn max_abs(&self) -> f64 {
        float::max_abs(self.coffs())
    }

    /// Parameters where the polynomial equals `target`, sorted ascending.
    ///
    /// Orders 2 to 5 are solved in closed form; higher orders use
    /// [`UnivariateBezier::deflate_roots_01`], which can miss roots without a
    /// sign change. Returns [`None`] if the polynomial is identically equal to
    /// `target`.
    #[must_use]
    pub fn roots(&self, target: f64, restrict_to_01: bool) -> Option<Vec<f64>> {
        let shifted = self.offset(-target);
        if shifted.coffs().iter().all(|c| *c == 0.0) {
            log::debug!("bezier is identically {target}, roots are undefined");
            return None;
        }

        let mut roots = Vec::with_capacity(self.order().saturating_sub(1));
        match &shifted {
            Self::Order2(c) => fixed::append_roots2(c, &mut roots),
            Self::Order3(c) => fixed::append_roots3(c, &mut roots),
            Self::Order4(c) => fixed::append_roots4(c, &mut roots),
            Self::Order5(c) => fixed::append_roots5(c, &mut roots),
            Self::General(b) => roots = b.deflate_roots_01(),
        }
        roots.sort_by(f64::total_cmp);

        if restrict_to_01 {
            roots = Self::filter_to_range_01(&roots);
        }
        Some(roots)
    }

    /// The roots inside `[0, 1]`, allowing [`RANGE_01_TOLERANCE`] of slack at
    /// either end. Kept values are clamped into the interval.
    #[must_use]
    pub fn filter_to_range_01(roots: &[f64]) -> Vec<f64> {
        roots
            .iter()
            .filter(|r| (-RANGE_01_TOLERANCE..=1.0 + RANGE_01_TOLERANCE).contains(*r))
            .map(|r| r.clamp(0.0, 1.0))
            .collect()
    }
}

impl From<UnivariateBezier> for BezierCoffs {
    fn from(value: UnivariateBezier) -> Self {
        Self::new(value.coffs()).unwrap_or(Self::General(value))
    }
}
