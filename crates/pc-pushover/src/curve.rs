//! Capacity curve recorded by a pushover run.

use crate::error::PushoverResult;
use pc_core::units::{Force, Length, kn, m};
use pc_curves::DiscreteCurve;
use serde::{Deserialize, Serialize};

/// One converged lateral step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapacityCurvePoint {
    pub step_index: usize,
    pub control_displacement: f64,
    pub base_shear: f64,
    pub drift_ratio: f64,
}

impl CapacityCurvePoint {
    pub fn displacement(&self) -> Length {
        m(self.control_displacement)
    }

    pub fn shear_force(&self) -> Force {
        kn(self.base_shear)
    }
}

/// Ordered capacity curve, read-only once returned by the controller.
///
/// Step indices run contiguously from 0 and control displacement never
/// decreases.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityCurve {
    points: Vec<CapacityCurvePoint>,
}

impl CapacityCurve {
    pub(crate) fn from_points(points: Vec<CapacityCurvePoint>) -> Self {
        debug_assert!(points.iter().enumerate().all(|(i, p)| p.step_index == i));
        Self { points }
    }

    pub fn points(&self) -> &[CapacityCurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&CapacityCurvePoint> {
        self.points.last()
    }

    /// Point with the largest base shear (earliest on ties).
    pub fn peak(&self) -> Option<&CapacityCurvePoint> {
        self.points.iter().reduce(|best, p| {
            if p.base_shear > best.base_shear {
                p
            } else {
                best
            }
        })
    }

    pub fn displacements(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.control_displacement).collect()
    }

    pub fn base_shears(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.base_shear).collect()
    }

    pub fn drift_ratios(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.drift_ratio).collect()
    }

    /// Displacement vs. base shear as a `DiscreteCurve`.
    ///
    /// Fails when fewer than two points were recorded or when two steps share
    /// the same displacement.
    pub fn to_discrete(&self) -> PushoverResult<DiscreteCurve> {
        Ok(DiscreteCurve::new(self.displacements(), self.base_shears())?)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CapacityCurvePoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a CapacityCurve {
    type Item = &'a CapacityCurvePoint;
    type IntoIter = std::slice::Iter<'a, CapacityCurvePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
