//! Scripted analysis engine (testing and dry runs)
//!
//! `ScriptedEngine` satisfies the `AnalysisEngine` contract by replaying a
//! fixed sequence of lateral steps instead of solving a model. Each lateral
//! step carries a convergence flag, a control displacement and one reaction
//! per support node. Every call is logged so tests can check the order in
//! which the controller drives the engine.

use std::collections::{BTreeSet, HashMap, VecDeque};

use pc_core::{Dof, NodeTag};

use crate::engine::{AnalysisEngine, ConvergenceStatus};

/// One call received by the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineCall {
    ApplyGravityLoads { increments: usize },
    AdvanceStep,
    LockLoadState,
    ConfigureDisplacementControl {
        node: NodeTag,
        dof: Dof,
        increment: f64,
    },
}

/// Scripted outcome of one lateral step.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedStep {
    pub converged: bool,
    pub displacement: f64,
    /// Reactions in support-node order.
    pub reactions: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Idle,
    Gravity { remaining: usize, applied: usize },
    Locked,
    Lateral,
}

/// Deterministic engine replaying scripted lateral steps.
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    nodes: BTreeSet<NodeTag>,
    supports: Vec<NodeTag>,
    dofs_per_node: usize,
    gravity_failure_at: Option<usize>,
    script: VecDeque<ScriptedStep>,
    mode: Mode,
    control: Option<(NodeTag, Dof)>,
    displacement: f64,
    reactions: HashMap<NodeTag, f64>,
    calls: Vec<EngineCall>,
}

impl ScriptedEngine {
    /// Engine whose model contains `nodes` (plus the supports) with six dofs
    /// per node.
    pub fn new(nodes: impl IntoIterator<Item = NodeTag>, supports: Vec<NodeTag>) -> Self {
        let mut all: BTreeSet<NodeTag> = nodes.into_iter().collect();
        all.extend(supports.iter().copied());
        Self {
            nodes: all,
            supports,
            dofs_per_node: 6,
            gravity_failure_at: None,
            script: VecDeque::new(),
            mode: Mode::Idle,
            control: None,
            displacement: 0.0,
            reactions: HashMap::new(),
            calls: Vec::new(),
        }
    }

    /// Script a lateral history from base shears: step `i` reaches
    /// displacement `(i + 1) * increment`, and each shear is split evenly
    /// over the supports with alternating reaction signs.
    pub fn from_shear_history(
        control: NodeTag,
        supports: Vec<NodeTag>,
        increment: f64,
        shears: &[f64],
    ) -> Self {
        let mut engine = Self::new([control], supports);
        for (i, &shear) in shears.iter().enumerate() {
            let reactions = engine.split_shear(shear);
            engine = engine.then_step((i + 1) as f64 * increment, reactions);
        }
        engine
    }

    pub fn with_dofs_per_node(mut self, ndf: usize) -> Self {
        self.dofs_per_node = ndf;
        self
    }

    /// Make gravity increment `increment` (0-based) fail to converge.
    pub fn with_gravity_failure_at(mut self, increment: usize) -> Self {
        self.gravity_failure_at = Some(increment);
        self
    }

    /// Append a converged lateral step.
    pub fn then_step(mut self, displacement: f64, reactions: Vec<f64>) -> Self {
        self.script.push_back(ScriptedStep {
            converged: true,
            displacement,
            reactions,
        });
        self
    }

    /// Append a lateral step that fails to converge.
    pub fn then_failure(mut self) -> Self {
        self.script.push_back(ScriptedStep {
            converged: false,
            displacement: self.displacement,
            reactions: Vec::new(),
        });
        self
    }

    /// Split `shear` evenly over the supports, alternating reaction signs.
    pub fn split_shear(&self, shear: f64) -> Vec<f64> {
        let n = self.supports.len().max(1) as f64;
        (0..self.supports.len())
            .map(|i| {
                let share = shear / n;
                if i % 2 == 0 { -share } else { share }
            })
            .collect()
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Lateral steps still waiting in the script.
    pub fn remaining_steps(&self) -> usize {
        self.script.len()
    }

    fn advance_gravity(&mut self, remaining: usize, applied: usize) -> ConvergenceStatus {
        if remaining == 0 || self.gravity_failure_at == Some(applied) {
            return ConvergenceStatus::Failed;
        }
        self.mode = Mode::Gravity {
            remaining: remaining - 1,
            applied: applied + 1,
        };
        ConvergenceStatus::Converged
    }

    fn advance_lateral(&mut self) -> ConvergenceStatus {
        // An exhausted script behaves like a solver that cannot go further.
        let Some(step) = self.script.pop_front() else {
            return ConvergenceStatus::Failed;
        };
        if !step.converged {
            return ConvergenceStatus::Failed;
        }
        self.displacement = step.displacement;
        self.reactions = self
            .supports
            .iter()
            .copied()
            .zip(step.reactions.iter().copied())
            .collect();
        ConvergenceStatus::Converged
    }
}

impl AnalysisEngine for ScriptedEngine {
    fn node_exists(&self, node: NodeTag) -> bool {
        self.nodes.contains(&node)
    }

    fn dofs_per_node(&self) -> usize {
        self.dofs_per_node
    }

    fn apply_gravity_loads(&mut self, increments: usize) {
        self.calls.push(EngineCall::ApplyGravityLoads { increments });
        self.mode = Mode::Gravity {
            remaining: increments,
            applied: 0,
        };
    }

    fn lock_load_state(&mut self) {
        self.calls.push(EngineCall::LockLoadState);
        self.mode = Mode::Locked;
    }

    fn configure_displacement_control(&mut self, node: NodeTag, dof: Dof, increment: f64) {
        self.calls.push(EngineCall::ConfigureDisplacementControl {
            node,
            dof,
            increment,
        });
        self.control = Some((node, dof));
        self.mode = Mode::Lateral;
    }

    fn advance_step(&mut self) -> ConvergenceStatus {
        self.calls.push(EngineCall::AdvanceStep);
        match self.mode {
            Mode::Gravity { remaining, applied } => self.advance_gravity(remaining, applied),
            Mode::Lateral => self.advance_lateral(),
            Mode::Idle | Mode::Locked => ConvergenceStatus::Failed,
        }
    }

    fn nodal_displacement(&self, node: NodeTag, dof: Dof) -> f64 {
        match self.control {
            Some(control) if control == (node, dof) => self.displacement,
            _ => 0.0,
        }
    }

    fn nodal_reaction(&self, node: NodeTag, dof: Dof) -> f64 {
        match self.control {
            Some((_, control_dof)) if control_dof == dof => {
                self.reactions.get(&node).copied().unwrap_or(0.0)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(n: u32) -> NodeTag {
        NodeTag::new(n).unwrap()
    }

    #[test]
    fn shear_split_sums_in_absolute_value() {
        let engine = ScriptedEngine::new([tag(10)], vec![tag(1), tag(2), tag(3)]);
        let r = engine.split_shear(300.0);
        assert_eq!(r, vec![-100.0, 100.0, -100.0]);
        assert_eq!(r.iter().sum::<f64>(), -100.0);
        assert_eq!(r.iter().map(|v| v.abs()).sum::<f64>(), 300.0);
    }

    #[test]
    fn replays_script_after_displacement_control() {
        let mut engine =
            ScriptedEngine::from_shear_history(tag(10), vec![tag(1), tag(2)], 0.01, &[50.0, 80.0]);
        assert!(engine.node_exists(tag(1)));
        assert!(!engine.node_exists(tag(99)));

        engine.apply_gravity_loads(2);
        assert!(engine.advance_step().is_converged());
        assert!(engine.advance_step().is_converged());
        assert!(!engine.advance_step().is_converged());

        engine.lock_load_state();
        engine.configure_displacement_control(tag(10), Dof::X, 0.01);
        assert!(engine.advance_step().is_converged());
        assert!((engine.nodal_displacement(tag(10), Dof::X) - 0.01).abs() < 1e-15);
        assert_eq!(engine.nodal_reaction(tag(1), Dof::X), -25.0);
        assert_eq!(engine.nodal_reaction(tag(2), Dof::X), 25.0);
        assert_eq!(engine.nodal_reaction(tag(2), Dof::Y), 0.0);

        assert!(engine.advance_step().is_converged());
        assert_eq!(engine.remaining_steps(), 0);
        assert!(!engine.advance_step().is_converged());
    }

    #[test]
    fn gravity_failure_is_scripted() {
        let mut engine = ScriptedEngine::new([tag(10)], vec![tag(1)]).with_gravity_failure_at(1);
        engine.apply_gravity_loads(5);
        assert!(engine.advance_step().is_converged());
        assert!(!engine.advance_step().is_converged());
    }
}
