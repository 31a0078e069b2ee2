//! Validated tabulated curves and linear interpolation.

use crate::error::{CurveError, CurveResult};
use pc_core::{Tolerances, nearly_equal};
use serde::Serialize;

/// Tabulated curve `y(x)` with a strictly increasing abscissa.
///
/// Invariants, checked on construction:
/// - `x.len() == y.len() >= 2`
/// - every value is finite
/// - `x` is strictly increasing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscreteCurve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl DiscreteCurve {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> CurveResult<Self> {
        if x.len() != y.len() {
            return Err(CurveError::invalid(format!(
                "abscissa has {} points but ordinate has {}",
                x.len(),
                y.len()
            )));
        }
        validate_abscissa(&x)?;
        if let Some(i) = y.iter().position(|v| !v.is_finite()) {
            return Err(CurveError::invalid(format!(
                "non-finite ordinate at index {i}"
            )));
        }
        Ok(Self { x, y })
    }

    pub fn from_points(points: &[(f64, f64)]) -> CurveResult<Self> {
        let (x, y) = points.iter().copied().unzip();
        Self::new(x, y)
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always false: a valid curve has at least two points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Interpolated ordinate at `x`, clamped to the end values outside the grid.
    pub fn eval(&self, x: f64) -> f64 {
        interp(x, &self.x, &self.y)
    }

    /// True when both curves are sampled on the same abscissa values, up to
    /// round-off.
    pub fn shares_grid_with(&self, other: &DiscreteCurve) -> bool {
        let tol = Tolerances::default();
        self.x.len() == other.x.len()
            && self
                .x
                .iter()
                .zip(&other.x)
                .all(|(&a, &b)| nearly_equal(a, b, tol))
    }

    /// Abscissa range `(first, last)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.x[0], self.x[self.x.len() - 1])
    }
}

/// Check the abscissa rules shared by every curve: at least two finite,
/// strictly increasing values.
pub(crate) fn validate_abscissa(x: &[f64]) -> CurveResult<()> {
    if x.len() < 2 {
        return Err(CurveError::invalid(format!(
            "at least 2 points required, got {}",
            x.len()
        )));
    }
    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(CurveError::invalid(format!(
            "non-finite abscissa at index {i}"
        )));
    }
    if let Some(i) = x.windows(2).position(|w| w[1] <= w[0]) {
        return Err(CurveError::invalid(format!(
            "abscissa must be strictly increasing (x[{}]={} >= x[{}]={})",
            i,
            x[i],
            i + 1,
            x[i + 1]
        )));
    }
    Ok(())
}

/// Piecewise-linear interpolation of `(xs, ys)` at `x`.
///
/// Values left of `xs[0]` return `ys[0]`; values right of the last point
/// return the last ordinate. `xs` must be increasing and non-empty with
/// `xs.len() == ys.len()`.
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len();
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[n - 1] {
        return ys[n - 1];
    }
    // First index with xs[hi] > x; 1 <= hi <= n - 1 here.
    let hi = xs.partition_point(|&v| v <= x);
    let lo = hi - 1;
    let t = (x - xs[lo]) / (xs[hi] - xs[lo]);
    ys[lo] + t * (ys[hi] - ys[lo])
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn interp_stays_within_segment_bounds(
            steps in prop::collection::vec(0.01_f64..10.0, 1..20),
            ys in prop::collection::vec(-100.0_f64..100.0, 21),
            frac in 0.0_f64..1.0,
        ) {
            let mut xs = vec![0.0];
            for s in &steps {
                let last = xs[xs.len() - 1];
                xs.push(last + s);
            }
            let ys = &ys[..xs.len()];
            let x = xs[xs.len() - 1] * frac;
            let y = interp(x, &xs, ys);
            let lo = ys.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(y >= lo - 1e-9 && y <= hi + 1e-9);
        }
    }
}
