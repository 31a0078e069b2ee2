//! Pushover run configuration.

use crate::engine::AnalysisEngine;
use crate::error::{PushoverError, PushoverResult};
use pc_core::units::{Length, to_m};
use pc_core::{Dof, NodeTag, ensure_positive};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GRAVITY_INCREMENTS: usize = 10;
pub const DEFAULT_DRIFT_LIMIT: f64 = 0.05;
pub const DEFAULT_STRENGTH_LOSS_RATIO: f64 = 0.8;
pub const DEFAULT_WARMUP_STEPS: usize = 10;

/// Options for one pushover run.
///
/// Lengths are in model units (meters for the engines this crate targets).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PushoverConfig {
    /// Equal load-control increments used to apply gravity
    pub gravity_increments: usize,
    /// Node whose displacement is controlled (usually the roof master node)
    pub control_node: NodeTag,
    /// Controlled degree of freedom; also the direction of base shear
    pub control_dof: Dof,
    /// Imposed displacement per lateral step
    pub step_increment: f64,
    /// Displacement at which the lateral phase would end
    pub target_displacement: f64,
    /// Height used to turn control displacement into a drift ratio
    pub total_height: f64,
    /// Nodes whose reactions sum to the base shear
    pub support_nodes: Vec<NodeTag>,
    /// Drift ratio above which the run stops
    pub drift_limit: f64,
    /// Fraction of peak base shear below which strength is considered lost
    pub strength_loss_ratio: f64,
    /// Steps (by index) during which strength loss is not checked
    pub warmup_steps: usize,
}

impl PushoverConfig {
    /// Build a configuration from `uom` lengths, with default limits.
    pub fn new(
        control_node: NodeTag,
        control_dof: Dof,
        step_increment: Length,
        target_displacement: Length,
        total_height: Length,
        support_nodes: Vec<NodeTag>,
    ) -> Self {
        Self::from_model_units(
            control_node,
            control_dof,
            to_m(step_increment),
            to_m(target_displacement),
            to_m(total_height),
            support_nodes,
        )
    }

    /// Build a configuration from raw model-unit values, with default limits.
    pub fn from_model_units(
        control_node: NodeTag,
        control_dof: Dof,
        step_increment: f64,
        target_displacement: f64,
        total_height: f64,
        support_nodes: Vec<NodeTag>,
    ) -> Self {
        Self {
            gravity_increments: DEFAULT_GRAVITY_INCREMENTS,
            control_node,
            control_dof,
            step_increment,
            target_displacement,
            total_height,
            support_nodes,
            drift_limit: DEFAULT_DRIFT_LIMIT,
            strength_loss_ratio: DEFAULT_STRENGTH_LOSS_RATIO,
            warmup_steps: DEFAULT_WARMUP_STEPS,
        }
    }

    pub fn with_gravity_increments(mut self, increments: usize) -> Self {
        self.gravity_increments = increments;
        self
    }

    pub fn with_drift_limit(mut self, limit: f64) -> Self {
        self.drift_limit = limit;
        self
    }

    pub fn with_strength_loss_ratio(mut self, ratio: f64) -> Self {
        self.strength_loss_ratio = ratio;
        self
    }

    pub fn with_warmup_steps(mut self, steps: usize) -> Self {
        self.warmup_steps = steps;
        self
    }

    /// Check the values that do not depend on the model.
    pub fn validate(&self) -> PushoverResult<()> {
        if self.gravity_increments == 0 {
            return Err(PushoverError::InvalidConfig {
                what: "gravity_increments must be at least 1".to_string(),
            });
        }
        positive(self.step_increment, "step_increment")?;
        positive(self.target_displacement, "target_displacement")?;
        positive(self.total_height, "total_height")?;
        positive(self.drift_limit, "drift_limit")?;
        let ratio = positive(self.strength_loss_ratio, "strength_loss_ratio")?;
        if ratio > 1.0 {
            return Err(PushoverError::InvalidConfig {
                what: format!("strength_loss_ratio must not exceed 1 (got {ratio})"),
            });
        }
        if self.support_nodes.is_empty() {
            return Err(PushoverError::InvalidConfig {
                what: "support_nodes must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Full validation, including node and dof lookups against `engine`.
    pub fn validate_for<E: AnalysisEngine + ?Sized>(&self, engine: &E) -> PushoverResult<()> {
        self.validate()?;

        let ndf = engine.dofs_per_node();
        if self.control_dof.engine_index() > ndf {
            return Err(PushoverError::UnsupportedDof {
                dof: self.control_dof,
                ndf,
            });
        }
        if let Some(&node) = std::iter::once(&self.control_node)
            .chain(&self.support_nodes)
            .find(|&&n| !engine.node_exists(n))
        {
            return Err(PushoverError::UnknownNode { node });
        }
        Ok(())
    }
}

fn positive(value: f64, name: &'static str) -> PushoverResult<f64> {
    ensure_positive(value, name).map_err(|_| PushoverError::InvalidConfig {
        what: format!("{name} must be positive and finite (got {value})"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::units::{m, mm};

    fn tag(n: u32) -> NodeTag {
        NodeTag::new(n).unwrap()
    }

    fn base() -> PushoverConfig {
        PushoverConfig::new(
            tag(58),
            Dof::X,
            mm(1.0),
            m(0.5),
            m(9.0),
            vec![tag(1), tag(2)],
        )
    }

    #[test]
    fn defaults_and_unit_conversion() {
        let cfg = base();
        assert_eq!(cfg.gravity_increments, 10);
        assert_eq!(cfg.drift_limit, 0.05);
        assert_eq!(cfg.strength_loss_ratio, 0.8);
        assert_eq!(cfg.warmup_steps, 10);
        assert!((cfg.step_increment - 0.001).abs() < 1e-15);
        assert!((cfg.target_displacement - 0.5).abs() < 1e-15);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_lengths() {
        let mut cfg = base();
        cfg.step_increment = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(PushoverError::InvalidConfig { .. })
        ));

        let mut cfg = base();
        cfg.target_displacement = -0.5;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.total_height = f64::NAN;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_limits() {
        assert!(base().with_gravity_increments(0).validate().is_err());
        assert!(base().with_drift_limit(0.0).validate().is_err());
        assert!(base().with_strength_loss_ratio(1.5).validate().is_err());
        assert!(base().with_strength_loss_ratio(0.0).validate().is_err());
        assert!(base().with_strength_loss_ratio(1.0).validate().is_ok());
    }

    #[test]
    fn rejects_empty_supports() {
        let mut cfg = base();
        cfg.support_nodes.clear();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("support_nodes"));
        assert!(err.is_configuration());
    }
}
