//! Terminal outcome of a pushover run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Analysis phase in which an engine step was attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisPhase {
    Gravity,
    Lateral,
}

/// Why a run stopped. Exactly one verdict is produced per run.
///
/// Every variant is a valid analysis outcome; none signals a bug.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TerminationVerdict {
    /// The engine failed to converge at `step` of `phase`. Gravity steps are
    /// load increments; lateral steps are displacement increments.
    ConvergenceFailure { phase: AnalysisPhase, step: usize },
    DriftLimitExceeded { step: usize, drift_ratio: f64 },
    StrengthLoss {
        step: usize,
        peak_shear: f64,
        current_shear: f64,
    },
    /// All planned lateral steps ran without triggering a stop.
    Completed { steps_run: usize },
}

impl TerminationVerdict {
    /// Step index at which the run stopped, or the step count for `Completed`.
    pub fn step(&self) -> usize {
        match *self {
            TerminationVerdict::ConvergenceFailure { step, .. }
            | TerminationVerdict::DriftLimitExceeded { step, .. }
            | TerminationVerdict::StrengthLoss { step, .. } => step,
            TerminationVerdict::Completed { steps_run } => steps_run,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TerminationVerdict::Completed { .. })
    }

    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, TerminationVerdict::ConvergenceFailure { .. })
    }
}

impl fmt::Display for TerminationVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationVerdict::ConvergenceFailure { phase, step } => {
                let phase = match phase {
                    AnalysisPhase::Gravity => "gravity increment",
                    AnalysisPhase::Lateral => "lateral step",
                };
                write!(f, "no convergence at {phase} {step}")
            }
            TerminationVerdict::DriftLimitExceeded { step, drift_ratio } => write!(
                f,
                "drift ratio {:.2}% exceeded the limit at step {step}",
                drift_ratio * 100.0
            ),
            TerminationVerdict::StrengthLoss {
                step,
                peak_shear,
                current_shear,
            } => write!(
                f,
                "strength loss at step {step}: base shear {current_shear:.2} vs peak {peak_shear:.2}"
            ),
            TerminationVerdict::Completed { steps_run } => {
                write!(f, "completed {steps_run} lateral steps")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_accessor() {
        let v = TerminationVerdict::StrengthLoss {
            step: 12,
            peak_shear: 500.0,
            current_shear: 395.0,
        };
        assert_eq!(v.step(), 12);
        assert!(!v.is_completed());
        assert_eq!(TerminationVerdict::Completed { steps_run: 7 }.step(), 7);
    }

    #[test]
    fn display_messages() {
        let v = TerminationVerdict::DriftLimitExceeded {
            step: 3,
            drift_ratio: 0.0512,
        };
        assert_eq!(v.to_string(), "drift ratio 5.12% exceeded the limit at step 3");

        let v = TerminationVerdict::ConvergenceFailure {
            phase: AnalysisPhase::Gravity,
            step: 4,
        };
        assert!(v.is_convergence_failure());
        assert_eq!(v.to_string(), "no convergence at gravity increment 4");
    }
}
