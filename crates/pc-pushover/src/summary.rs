//! End-of-run summary of a pushover analysis.

use crate::controller::PushoverOutcome;
use crate::verdict::TerminationVerdict;
use pc_core::units::{Force, Length, kn, m, to_kn, to_mm};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Headline numbers of a finished run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PushoverSummary {
    /// Converged lateral steps recorded on the curve
    pub steps_completed: usize,
    pub final_displacement: f64,
    pub final_base_shear: f64,
    pub peak_base_shear: f64,
    pub final_drift_ratio: f64,
    pub verdict: TerminationVerdict,
}

impl PushoverSummary {
    /// Summarise `outcome`. Quantities are zero when no lateral step converged.
    pub fn from_outcome(outcome: &PushoverOutcome) -> Self {
        let curve = &outcome.curve;
        let last = curve.last();
        Self {
            steps_completed: curve.len(),
            final_displacement: last.map_or(0.0, |p| p.control_displacement),
            final_base_shear: last.map_or(0.0, |p| p.base_shear),
            peak_base_shear: curve.peak().map_or(0.0, |p| p.base_shear),
            final_drift_ratio: last.map_or(0.0, |p| p.drift_ratio),
            verdict: outcome.verdict.clone(),
        }
    }

    pub fn displacement(&self) -> Length {
        m(self.final_displacement)
    }

    pub fn final_shear_force(&self) -> Force {
        kn(self.final_base_shear)
    }

    pub fn peak_shear_force(&self) -> Force {
        kn(self.peak_base_shear)
    }
}

impl fmt::Display for PushoverSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pushover analysis results")?;
        writeln!(f, "  Steps completed:    {}", self.steps_completed)?;
        writeln!(
            f,
            "  Final displacement: {:.2} mm",
            to_mm(self.displacement())
        )?;
        writeln!(
            f,
            "  Final base shear:   {:.2} kN",
            to_kn(self.final_shear_force())
        )?;
        writeln!(
            f,
            "  Peak base shear:    {:.2} kN",
            to_kn(self.peak_shear_force())
        )?;
        writeln!(f, "  Final drift:        {:.2}%", self.final_drift_ratio * 100.0)?;
        write!(f, "  Termination:        {}", self.verdict)
    }
}
