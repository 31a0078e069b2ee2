//! Capability interface to the external finite-element engine.

use pc_core::{Dof, NodeTag};
use serde::{Deserialize, Serialize};

/// Outcome of one engine analysis step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConvergenceStatus {
    Converged,
    Failed,
}

impl ConvergenceStatus {
    pub fn is_converged(self) -> bool {
        matches!(self, ConvergenceStatus::Converged)
    }
}

/// Step-oriented analysis engine driven by the pushover controller.
///
/// The engine owns the structural model and its nonlinear solver. The
/// controller only arms load patterns, advances one step at a time and
/// queries committed nodal state. Instances are not shared between
/// concurrent runs.
///
/// Model units are metres for lengths and kilonewtons for forces.
pub trait AnalysisEngine {
    /// Whether `node` exists in the model.
    fn node_exists(&self, node: NodeTag) -> bool;

    /// Degrees of freedom carried by each model node.
    fn dofs_per_node(&self) -> usize;

    /// Arm the factored gravity pattern under load control, split into
    /// `increments` equal load steps. Each subsequent `advance_step` applies
    /// one increment.
    fn apply_gravity_loads(&mut self, increments: usize);

    /// Hold the current loads constant and reset the pseudo-time, so later
    /// displacements are measured from the gravity baseline.
    fn lock_load_state(&mut self);

    /// Switch to displacement control of `dof` at `node`, imposing
    /// `increment` per step.
    fn configure_displacement_control(&mut self, node: NodeTag, dof: Dof, increment: f64);

    /// Run one analysis step and commit it if converged.
    fn advance_step(&mut self) -> ConvergenceStatus;

    /// Committed displacement of `node` along `dof`, in metres.
    fn nodal_displacement(&self, node: NodeTag, dof: Dof) -> f64;

    /// Committed support reaction of `node` along `dof`, in kilonewtons.
    fn nodal_reaction(&self, node: NodeTag, dof: Dof) -> f64;
}
