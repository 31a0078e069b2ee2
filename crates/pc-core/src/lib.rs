//! pc-core: shared foundation for the pushcap workspace.
//!
//! Contains:
//! - units (uom SI types + constructors for lengths and forces)
//! - numeric (Real + tolerances + float helpers)
//! - ids (analysis-engine node tags and degrees of freedom)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
