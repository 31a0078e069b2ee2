//! Intersection of tabulated, piecewise-linear curves.
//!
//! Two curves sampled on a shared abscissa grid are treated as piecewise
//! linear. The solver locates the first grid interval where their difference
//! changes sign, then refines the crossing inside (or starting from) that
//! interval with one of three methods:
//!
//! - **Bracketing**: Brent's method, guaranteed to converge on the bracket
//! - **Linear**: closed-form crossing of the two straight segments
//! - **OpenSolver**: Newton iteration from the bracket midpoint, unguarded
//!
//! Only the first crossing is ever reported. Curves that cross several times
//! yield the root in the lowest bracket.

pub mod bracket;
pub mod brent;
pub mod curve;
pub mod error;
pub mod intersect;
pub mod newton;

pub use bracket::{Bracket, find_first_bracket};
pub use brent::{BrentConfig, RootResult, brent_solve};
pub use curve::{DiscreteCurve, interp};
pub use error::{CurveError, CurveResult};
pub use intersect::{
    DEFAULT_TOLERANCE, IntersectionMethod, IntersectionResult, PARALLEL_SLOPE_EPS, intersect,
    intersect_tabulated,
};
pub use newton::{NewtonConfig, newton_solve};
