//! Performance point: capacity curve against a demand curve.

use crate::curve::CapacityCurve;
use crate::error::PushoverResult;
use pc_curves::{DiscreteCurve, IntersectionMethod, IntersectionResult, intersect};

/// Intersect the capacity curve (control displacement vs. base shear) with a
/// demand curve sampled on the same displacements.
///
/// `demand[i]` is the demand ordinate at the displacement of point `i`. The
/// capacity curve must hold at least two points with strictly increasing
/// displacement.
pub fn performance_point(
    capacity: &CapacityCurve,
    demand: &[f64],
    method: IntersectionMethod,
    tol: f64,
) -> PushoverResult<IntersectionResult> {
    let capacity = capacity.to_discrete()?;
    let demand = DiscreteCurve::new(capacity.x().to_vec(), demand.to_vec())?;
    let result = intersect(&capacity, &demand, method, tol)?;

    tracing::info!(
        displacement = result.x,
        base_shear = result.y,
        method = ?result.method,
        consistency_error = result.consistency_error,
        "performance point located"
    );
    Ok(result)
}
