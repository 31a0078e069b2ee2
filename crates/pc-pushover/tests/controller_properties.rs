//! Property tests over random base-shear histories.

use pc_core::{Dof, NodeTag};
use pc_pushover::fakes::ScriptedEngine;
use pc_pushover::{PushoverConfig, TerminationVerdict, run_pushover};
use proptest::prelude::*;

fn tag(n: u32) -> NodeTag {
    NodeTag::new(n).unwrap()
}

proptest! {
    #[test]
    fn verdict_and_curve_invariants(shears in prop::collection::vec(0.0_f64..1000.0, 1..40)) {
        let supports = vec![tag(1), tag(2)];
        let n = shears.len();
        let mut engine = ScriptedEngine::from_shear_history(tag(9), supports.clone(), 1.0, &shears);
        // Tall frame: drift never reaches the limit.
        let cfg = PushoverConfig::from_model_units(tag(9), Dof::X, 1.0, n as f64, 1e6, supports);

        let outcome = run_pushover(&mut engine, cfg).unwrap();
        let curve = outcome.curve.points();

        for (i, p) in curve.iter().enumerate() {
            prop_assert_eq!(p.step_index, i);
            if i > 0 {
                prop_assert!(p.control_displacement >= curve[i - 1].control_displacement);
            }
        }

        match outcome.verdict {
            TerminationVerdict::StrengthLoss { step, peak_shear, current_shear } => {
                prop_assert!(step > 10);
                prop_assert_eq!(curve.len(), step + 1);
                prop_assert!(current_shear < 0.8 * peak_shear);
                let seen = curve.iter().map(|p| p.base_shear).fold(f64::NEG_INFINITY, f64::max);
                prop_assert_eq!(peak_shear, seen);
            }
            TerminationVerdict::Completed { steps_run } => {
                prop_assert_eq!(steps_run, n);
                prop_assert_eq!(curve.len(), n);
                let mut peak = f64::NEG_INFINITY;
                for p in curve {
                    peak = peak.max(p.base_shear);
                    if p.step_index > 10 {
                        prop_assert!(p.base_shear >= 0.8 * peak);
                    }
                }
            }
            other => prop_assert!(false, "unexpected verdict {:?}", other),
        }
    }
}
