//! Scalar Newton iteration with a finite-difference derivative.
//!
//! Open method: the iterate is not confined to any interval. Failure to
//! converge is reported through `RootResult::converged`, never as an error.

use crate::brent::RootResult;

/// Newton solver configuration.
#[derive(Clone, Debug)]
pub struct NewtonConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Absolute tolerance on the step size
    pub xtol: f64,
    /// Relative tolerance on the step size
    pub rtol: f64,
    /// Relative forward-difference step for the derivative
    pub fd_step: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            xtol: 1e-12,
            rtol: 1e-12,
            fd_step: 1.49e-8,
        }
    }
}

/// Newton iteration on `f` from `x0`.
pub fn newton_solve<F>(f: F, x0: f64, config: &NewtonConfig) -> RootResult
where
    F: Fn(f64) -> f64,
{
    let mut x = x0;
    let mut fx = f(x);

    for iter in 0..config.max_iterations {
        if fx == 0.0 {
            return RootResult {
                root: x,
                f_root: fx,
                iterations: iter,
                converged: true,
            };
        }

        let h = config.fd_step * x.abs().max(1.0);
        let slope = (f(x + h) - fx) / h;
        if !slope.is_finite() || slope == 0.0 {
            // Flat region: no Newton direction.
            return RootResult {
                root: x,
                f_root: fx,
                iterations: iter,
                converged: false,
            };
        }

        let dx = -fx / slope;
        x += dx;
        fx = f(x);

        if !x.is_finite() {
            break;
        }
        if dx.abs() <= config.xtol + config.rtol * x.abs() {
            return RootResult {
                root: x,
                f_root: fx,
                iterations: iter + 1,
                converged: true,
            };
        }
    }

    RootResult {
        root: x,
        f_root: fx,
        iterations: config.max_iterations,
        converged: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_quadratic() {
        let result = newton_solve(|x| x * x - 4.0, 3.0, &NewtonConfig::default());
        assert!(result.converged);
        assert!((result.root - 2.0).abs() < 1e-6);
    }

    #[test]
    fn linear_converges_immediately() {
        let result = newton_solve(|x| 2.0 * x - 3.0, 0.0, &NewtonConfig::default());
        assert!(result.converged);
        assert!((result.root - 1.5).abs() < 1e-6);
        assert!(result.iterations <= 3);
    }

    #[test]
    fn flat_function_does_not_converge() {
        let result = newton_solve(|_| 1.0, 0.5, &NewtonConfig::default());
        assert!(!result.converged);
        assert_eq!(result.root, 0.5);
    }
}
