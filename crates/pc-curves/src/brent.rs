//! Brent's bracketing root finder.

use crate::error::{CurveError, CurveResult};

/// Brent solver configuration.
#[derive(Clone, Debug)]
pub struct BrentConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance on the root location
    pub xtol: f64,
    /// Relative tolerance on the root location
    pub rtol: f64,
}

impl Default for BrentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            xtol: 1e-12,
            rtol: 1e-12,
        }
    }
}

/// Scalar root-finding result.
#[derive(Clone, Debug)]
pub struct RootResult {
    /// Root estimate
    pub root: f64,
    /// Function value at the root estimate
    pub f_root: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Converged flag
    pub converged: bool,
}

/// Find a root of `f` in `[a, b]` where `f(a)` and `f(b)` bracket zero.
///
/// Combines bisection, secant and inverse quadratic interpolation, keeping
/// the root bracketed at every iteration. Returns as soon as the bracket
/// half-width falls below `(xtol + rtol * |x|) / 2` or `f` hits exactly zero.
pub fn brent_solve<F>(f: F, a: f64, b: f64, config: &BrentConfig) -> CurveResult<RootResult>
where
    F: Fn(f64) -> f64,
{
    if !(a.is_finite() && b.is_finite()) || a >= b {
        return Err(CurveError::invalid("bracket must be a finite interval with a < b"));
    }

    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = f(xpre);
    let mut fcur = f(xcur);

    if fpre == 0.0 {
        return Ok(RootResult {
            root: xpre,
            f_root: fpre,
            iterations: 0,
            converged: true,
        });
    }
    if fcur == 0.0 {
        return Ok(RootResult {
            root: xcur,
            f_root: fcur,
            iterations: 0,
            converged: true,
        });
    }
    if fpre.signum() == fcur.signum() {
        return Err(CurveError::invalid(format!(
            "f(a)={fpre:e} and f(b)={fcur:e} do not bracket a root"
        )));
    }

    // Contrapoint: keeps f(xblk) opposite in sign to f(xcur).
    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for iter in 0..config.max_iterations {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;

            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = 0.5 * (config.xtol + config.rtol * xcur.abs());
        let sbis = 0.5 * (xblk - xcur);
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(RootResult {
                root: xcur,
                f_root: fcur,
                iterations: iter,
                converged: true,
            });
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };
            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = f(xcur);
    }

    Err(CurveError::ConvergenceFailed {
        what: format!(
            "Brent reached {} iterations, last iterate x = {}",
            config.max_iterations, xcur
        ),
    })
}
