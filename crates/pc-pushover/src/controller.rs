//! Incremental pushover controller.
//!
//! A forward-only state machine:
//!
//! ```text
//! Init -> GravityPhase -> LateralPhase -> Terminated(verdict)
//!              |                               ^
//!              +------ ConvergenceFailure -----+
//! ```
//!
//! Steps use a fixed increment. A failed step is never retried or cut back;
//! it ends the run.

use crate::config::PushoverConfig;
use crate::curve::{CapacityCurve, CapacityCurvePoint};
use crate::engine::AnalysisEngine;
use crate::error::PushoverResult;
use crate::verdict::{AnalysisPhase, TerminationVerdict};
use tracing::{debug, info};

/// Relative slack on `target / increment` so round-off such as
/// `0.5 / 0.001 = 499.999...` still plans the intended step count.
const STEP_COUNT_SLACK: f64 = 1e-9;

/// Upper bound on the curve buffer reserved up front. Runs usually stop
/// well before the planned step count.
const INITIAL_CURVE_CAPACITY: usize = 1024;

/// Number of lateral steps planned for a run: `floor(target / increment)`.
pub fn lateral_step_count(target_displacement: f64, step_increment: f64) -> usize {
    let ratio = target_displacement / step_increment;
    (ratio * (1.0 + STEP_COUNT_SLACK)).floor() as usize
}

/// Controller lifecycle. Ordered: the controller only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ControllerState {
    Init,
    GravityPhase,
    LateralPhase,
    Terminated,
}

/// Peak base shear seen so far.
///
/// Seeded with the first observed shear rather than zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunningMaxima {
    max_base_shear: f64,
}

impl RunningMaxima {
    pub fn seeded(first_shear: f64) -> Self {
        Self {
            max_base_shear: first_shear,
        }
    }

    /// Fold in a new observation and return the updated peak.
    pub fn observe(&mut self, base_shear: f64) -> f64 {
        self.max_base_shear = self.max_base_shear.max(base_shear);
        self.max_base_shear
    }

    pub fn max_base_shear(&self) -> f64 {
        self.max_base_shear
    }
}

/// Progress events emitted while a run advances.
#[derive(Clone, Debug, PartialEq)]
pub enum PushoverProgress {
    /// Gravity increment `increment` (0-based) of `total` converged.
    GravityIncrement { increment: usize, total: usize },
    /// Lateral step converged and was recorded.
    LateralStep {
        point: CapacityCurvePoint,
        max_base_shear: f64,
        planned_steps: usize,
    },
}

/// Result of a run: the (possibly partial) capacity curve and its verdict.
#[derive(Clone, Debug, PartialEq)]
pub struct PushoverOutcome {
    pub curve: CapacityCurve,
    pub verdict: TerminationVerdict,
}

/// Single-use controller bound to one engine for one run.
///
/// All monitoring state lives here and is dropped with the controller, so
/// repeated runs never share peaks or counters.
pub struct PushoverController<'e, E: AnalysisEngine + ?Sized> {
    engine: &'e mut E,
    config: PushoverConfig,
    state: ControllerState,
    planned_steps: usize,
    maxima: Option<RunningMaxima>,
    points: Vec<CapacityCurvePoint>,
}

impl<'e, E: AnalysisEngine + ?Sized> PushoverController<'e, E> {
    /// Validate `config` against `engine` and prepare a run.
    pub fn new(engine: &'e mut E, config: PushoverConfig) -> PushoverResult<Self> {
        config.validate_for(&*engine)?;
        let planned_steps = lateral_step_count(config.target_displacement, config.step_increment);
        Ok(Self {
            engine,
            config,
            state: ControllerState::Init,
            planned_steps,
            maxima: None,
            points: Vec::with_capacity(planned_steps.min(INITIAL_CURVE_CAPACITY)),
        })
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn planned_steps(&self) -> usize {
        self.planned_steps
    }

    pub fn config(&self) -> &PushoverConfig {
        &self.config
    }

    /// Run gravity and lateral phases to a verdict.
    pub fn run(self) -> PushoverOutcome {
        self.run_with_progress(|_| {})
    }

    /// Run to a verdict, reporting each converged step to `on_progress`.
    pub fn run_with_progress<F>(mut self, mut on_progress: F) -> PushoverOutcome
    where
        F: FnMut(&PushoverProgress),
    {
        let verdict = match self.gravity_phase(&mut on_progress) {
            Some(verdict) => verdict,
            None => self.lateral_phase(&mut on_progress),
        };
        self.transition(ControllerState::Terminated);

        info!(
            verdict = %verdict,
            points = self.points.len(),
            "pushover run finished"
        );

        PushoverOutcome {
            curve: CapacityCurve::from_points(self.points),
            verdict,
        }
    }

    fn transition(&mut self, next: ControllerState) {
        debug_assert!(next > self.state, "{:?} -> {:?}", self.state, next);
        debug!(from = ?self.state, to = ?next, "controller transition");
        self.state = next;
    }

    /// Apply gravity in equal increments. Returns a verdict only on failure.
    fn gravity_phase<F>(&mut self, on_progress: &mut F) -> Option<TerminationVerdict>
    where
        F: FnMut(&PushoverProgress),
    {
        self.transition(ControllerState::GravityPhase);
        let total = self.config.gravity_increments;
        info!(increments = total, "applying gravity loads");

        self.engine.apply_gravity_loads(total);
        for increment in 0..total {
            if !self.engine.advance_step().is_converged() {
                info!(increment, "gravity increment failed to converge");
                return Some(TerminationVerdict::ConvergenceFailure {
                    phase: AnalysisPhase::Gravity,
                    step: increment,
                });
            }
            on_progress(&PushoverProgress::GravityIncrement { increment, total });
        }

        self.engine.lock_load_state();
        self.engine.configure_displacement_control(
            self.config.control_node,
            self.config.control_dof,
            self.config.step_increment,
        );
        None
    }

    fn lateral_phase<F>(&mut self, on_progress: &mut F) -> TerminationVerdict
    where
        F: FnMut(&PushoverProgress),
    {
        self.transition(ControllerState::LateralPhase);
        info!(
            control_node = %self.config.control_node,
            control_dof = %self.config.control_dof,
            increment = self.config.step_increment,
            planned_steps = self.planned_steps,
            "starting displacement-controlled lateral phase"
        );

        for step in 0..self.planned_steps {
            if !self.engine.advance_step().is_converged() {
                info!(step, "lateral step failed to converge");
                return TerminationVerdict::ConvergenceFailure {
                    phase: AnalysisPhase::Lateral,
                    step,
                };
            }

            let displacement = self
                .engine
                .nodal_displacement(self.config.control_node, self.config.control_dof);
            let drift_ratio = displacement / self.config.total_height;
            let base_shear = self.base_shear();

            let point = CapacityCurvePoint {
                step_index: step,
                control_displacement: displacement,
                base_shear,
                drift_ratio,
            };
            self.points.push(point);

            let max_base_shear = self
                .maxima
                .get_or_insert(RunningMaxima::seeded(base_shear))
                .observe(base_shear);

            debug!(step, displacement, base_shear, max_base_shear, drift_ratio, "lateral step");
            on_progress(&PushoverProgress::LateralStep {
                point,
                max_base_shear,
                planned_steps: self.planned_steps,
            });

            if drift_ratio > self.config.drift_limit {
                info!(step, drift_ratio, limit = self.config.drift_limit, "drift limit exceeded");
                return TerminationVerdict::DriftLimitExceeded { step, drift_ratio };
            }

            if step > self.config.warmup_steps
                && base_shear < self.config.strength_loss_ratio * max_base_shear
            {
                info!(
                    step,
                    peak_shear = max_base_shear,
                    current_shear = base_shear,
                    "significant strength loss"
                );
                return TerminationVerdict::StrengthLoss {
                    step,
                    peak_shear: max_base_shear,
                    current_shear: base_shear,
                };
            }
        }

        TerminationVerdict::Completed {
            steps_run: self.planned_steps,
        }
    }

    /// Sum of absolute support reactions along the control direction.
    ///
    /// Absolute values: supports may react in opposite senses and all of
    /// them resist the lateral load.
    fn base_shear(&self) -> f64 {
        self.config
            .support_nodes
            .iter()
            .map(|&node| {
                self.engine
                    .nodal_reaction(node, self.config.control_dof)
                    .abs()
            })
            .sum()
    }
}

/// Validate `config` and run one pushover analysis on `engine`.
pub fn run_pushover<E: AnalysisEngine + ?Sized>(
    engine: &mut E,
    config: PushoverConfig,
) -> PushoverResult<PushoverOutcome> {
    Ok(PushoverController::new(engine, config)?.run())
}

/// Like [`run_pushover`], reporting progress after each converged step.
pub fn run_pushover_with_progress<E, F>(
    engine: &mut E,
    config: PushoverConfig,
    on_progress: F,
) -> PushoverResult<PushoverOutcome>
where
    E: AnalysisEngine + ?Sized,
    F: FnMut(&PushoverProgress),
{
    Ok(PushoverController::new(engine, config)?.run_with_progress(on_progress))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_count_floors_with_round_off_slack() {
        assert_eq!(lateral_step_count(0.5, 0.001), 500);
        assert_eq!(lateral_step_count(0.3, 0.1), 3);
        assert_eq!(lateral_step_count(0.0035, 0.001), 3);
        assert_eq!(lateral_step_count(0.0005, 0.001), 0);
    }

    #[test]
    fn step_count_saturates_for_tiny_increments() {
        assert_eq!(lateral_step_count(1.0, 1e-300), usize::MAX);
    }

    #[test]
    fn running_maxima_seeded_with_first_value() {
        let mut m = RunningMaxima::seeded(-5.0);
        assert_eq!(m.max_base_shear(), -5.0);
        assert_eq!(m.observe(-7.0), -5.0);
        assert_eq!(m.observe(3.0), 3.0);
        assert_eq!(m.observe(1.0), 3.0);
    }

    #[test]
    fn states_are_ordered() {
        assert!(ControllerState::Init < ControllerState::GravityPhase);
        assert!(ControllerState::GravityPhase < ControllerState::LateralPhase);
        assert!(ControllerState::LateralPhase < ControllerState::Terminated);
    }
}
