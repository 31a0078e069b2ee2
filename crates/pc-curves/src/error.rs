//! Error types for curve construction and intersection.

use pc_core::CoreError;
use thiserror::Error;

/// Errors raised by the curve intersection solver.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Malformed curve input. Raised before any solve attempt.
    #[error("Invalid input: {what}")]
    InvalidInput { what: String },

    /// The pointwise difference never changes sign on the grid.
    #[error("No intersection found: curve difference keeps one sign over {points} points")]
    NoIntersectionFound { points: usize },

    /// A bracketing solve ran out of iterations.
    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },
}

pub type CurveResult<T> = Result<T, CurveError>;

impl From<CoreError> for CurveError {
    fn from(e: CoreError) -> Self {
        CurveError::InvalidInput {
            what: e.to_string(),
        }
    }
}

impl CurveError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        CurveError::InvalidInput { what: what.into() }
    }
}
