//! Error types for pushover configuration and post-processing.

use pc_core::{CoreError, Dof, NodeTag};
use pc_curves::CurveError;
use thiserror::Error;

/// Errors raised before a run starts or while post-processing its curve.
///
/// Engine non-convergence is not an error: it ends the run with a
/// `TerminationVerdict`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PushoverError {
    #[error("Invalid configuration: {what}")]
    InvalidConfig { what: String },

    #[error("Unknown node {node}: not present in the analysis model")]
    UnknownNode { node: NodeTag },

    #[error("Unsupported dof {dof}: model nodes carry {ndf} degrees of freedom")]
    UnsupportedDof { dof: Dof, ndf: usize },

    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),
}

pub type PushoverResult<T> = Result<T, PushoverError>;

impl From<CoreError> for PushoverError {
    fn from(e: CoreError) -> Self {
        PushoverError::InvalidConfig {
            what: e.to_string(),
        }
    }
}

impl PushoverError {
    /// True for every error raised by configuration validation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PushoverError::InvalidConfig { .. }
                | PushoverError::UnknownNode { .. }
                | PushoverError::UnsupportedDof { .. }
        )
    }
}
