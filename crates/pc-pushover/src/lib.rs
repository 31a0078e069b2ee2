//! Displacement-controlled pushover analysis driver.
//!
//! The controller runs a gravity phase followed by a bounded sequence of
//! lateral displacement-control steps against an external analysis engine,
//! recording a capacity curve and deciding when to stop:
//!
//! - engine non-convergence (gravity or lateral)
//! - roof drift above the drift limit
//! - base shear below a fraction of its running peak, after a warm-up window
//! - all planned steps completed
//!
//! Every outcome returns the partial capacity curve up to termination.
//! Only malformed configuration is an error.

pub mod config;
pub mod controller;
pub mod curve;
pub mod engine;
pub mod error;
pub mod fakes;
pub mod performance;
pub mod summary;
pub mod verdict;

pub use config::PushoverConfig;
pub use controller::{
    ControllerState, PushoverController, PushoverOutcome, PushoverProgress, RunningMaxima,
    lateral_step_count, run_pushover, run_pushover_with_progress,
};
pub use curve::{CapacityCurve, CapacityCurvePoint};
pub use engine::{AnalysisEngine, ConvergenceStatus};
pub use error::{PushoverError, PushoverResult};
pub use performance::performance_point;
pub use summary::PushoverSummary;
pub use verdict::{AnalysisPhase, TerminationVerdict};
