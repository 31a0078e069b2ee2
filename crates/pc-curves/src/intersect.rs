//! Bracket-then-refine intersection of two tabulated curves.

use crate::bracket::{Bracket, find_first_bracket};
use crate::brent::{BrentConfig, brent_solve};
use crate::curve::{DiscreteCurve, interp, validate_abscissa};
use crate::error::{CurveError, CurveResult};
use crate::newton::{NewtonConfig, newton_solve};
use serde::{Deserialize, Serialize};

/// Default absolute/relative tolerance for the refinement step.
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// Slope difference below which two segments are treated as parallel.
pub const PARALLEL_SLOPE_EPS: f64 = 1e-14;

/// Refinement method applied inside the located bracket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntersectionMethod {
    /// Brent's method on the interpolated difference (default).
    #[default]
    Bracketing,
    /// Closed-form crossing of the two straight segments.
    Linear,
    /// Newton iteration seeded at the bracket midpoint.
    OpenSolver,
}

/// Located crossing of two curves.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntersectionResult {
    /// Abscissa of the crossing.
    pub x: f64,
    /// First curve's interpolated ordinate at `x`.
    pub y: f64,
    /// Second curve's interpolated ordinate at `x`.
    pub y_second: f64,
    /// Grid index `i` of the bracket `[x[i], x[i+1]]`.
    pub bracket_index: usize,
    /// Bracket bounds.
    pub bracket: (f64, f64),
    pub method: IntersectionMethod,
    /// `|y1(x) - y2(x)|`.
    pub consistency_error: f64,
    pub iterations: usize,
    /// False only for an open solve that ran out of iterations or stalled.
    pub converged: bool,
}

/// Intersect two curves sampled on the same abscissa grid.
pub fn intersect(
    first: &DiscreteCurve,
    second: &DiscreteCurve,
    method: IntersectionMethod,
    tol: f64,
) -> CurveResult<IntersectionResult> {
    if !first.shares_grid_with(second) {
        return Err(CurveError::invalid(
            "curves must share the same abscissa grid",
        ));
    }
    solve_validated(first.x(), first.y(), second.y(), method, tol)
}

/// Intersect the curves `(x, y1)` and `(x, y2)` given as raw slices.
///
/// Input is validated before any solve attempt.
pub fn intersect_tabulated(
    x: &[f64],
    y1: &[f64],
    y2: &[f64],
    method: IntersectionMethod,
    tol: f64,
) -> CurveResult<IntersectionResult> {
    if x.len() != y1.len() || x.len() != y2.len() {
        return Err(CurveError::invalid(format!(
            "x, y1 and y2 must have equal length (got {}, {}, {})",
            x.len(),
            y1.len(),
            y2.len()
        )));
    }
    validate_abscissa(x)?;
    if y1.iter().chain(y2).any(|v| !v.is_finite()) {
        return Err(CurveError::invalid("ordinates must be finite"));
    }
    solve_validated(x, y1, y2, method, tol)
}

fn solve_validated(
    x: &[f64],
    y1: &[f64],
    y2: &[f64],
    method: IntersectionMethod,
    tol: f64,
) -> CurveResult<IntersectionResult> {
    if !(tol.is_finite() && tol > 0.0) {
        return Err(CurveError::invalid("tolerance must be positive and finite"));
    }

    let bracket = find_first_bracket(x, y1, y2)?;
    tracing::debug!(
        index = bracket.index,
        x_lo = bracket.x_lo,
        x_hi = bracket.x_hi,
        d_lo = bracket.d_lo,
        d_hi = bracket.d_hi,
        "crossing bracket located"
    );

    let difference = |xq: f64| interp(xq, x, y1) - interp(xq, x, y2);

    let (x_star, iterations, converged) = match method {
        IntersectionMethod::Bracketing => {
            let config = BrentConfig {
                xtol: tol,
                rtol: tol,
                ..BrentConfig::default()
            };
            let root = brent_solve(difference, bracket.x_lo, bracket.x_hi, &config)?;
            (root.root, root.iterations, root.converged)
        }
        IntersectionMethod::Linear => (linear_crossing(&bracket, y1, y2), 0, true),
        IntersectionMethod::OpenSolver => {
            let config = NewtonConfig {
                xtol: tol,
                rtol: tol,
                ..NewtonConfig::default()
            };
            let root = newton_solve(difference, bracket.midpoint(), &config);
            if !root.converged {
                tracing::warn!(
                    x = root.root,
                    residual = root.f_root,
                    iterations = root.iterations,
                    "open solver did not converge, returning last iterate"
                );
            }
            (root.root, root.iterations, root.converged)
        }
    };

    let y = interp(x_star, x, y1);
    let y_second = interp(x_star, x, y2);

    Ok(IntersectionResult {
        x: x_star,
        y,
        y_second,
        bracket_index: bracket.index,
        bracket: (bracket.x_lo, bracket.x_hi),
        method,
        consistency_error: (y - y_second).abs(),
        iterations,
        converged,
    })
}

/// Closed-form crossing of the two segments spanning the bracket.
fn linear_crossing(bracket: &Bracket, y1: &[f64], y2: &[f64]) -> f64 {
    let i = bracket.index;
    let dx = bracket.width();
    let m1 = (y1[i + 1] - y1[i]) / dx;
    let m2 = (y2[i + 1] - y2[i]) / dx;
    let denom = m1 - m2;

    if denom.abs() < PARALLEL_SLOPE_EPS {
        tracing::warn!(
            index = i,
            slope_difference = denom,
            "segments are parallel, using bracket midpoint"
        );
        return bracket.midpoint();
    }
    (y2[i] - y1[i]) / denom + bracket.x_lo
}
