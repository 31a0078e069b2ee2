//! Performance point from a scripted capacity curve.

use pc_core::{Dof, NodeTag};
use pc_curves::{CurveError, IntersectionMethod};
use pc_pushover::fakes::ScriptedEngine;
use pc_pushover::{PushoverConfig, PushoverError, performance_point, run_pushover};

fn tag(n: u32) -> NodeTag {
    NodeTag::new(n).unwrap()
}

fn bilinear_capacity() -> pc_pushover::PushoverOutcome {
    // Elastic up to 0.02 m (300 kN), then hardening to 400 kN at 0.1 m.
    let supports = vec![tag(1), tag(2)];
    let shears: Vec<f64> = (1..=10)
        .map(|i| {
            let d = 0.01 * i as f64;
            if d <= 0.02 {
                15_000.0 * d
            } else {
                300.0 + 1250.0 * (d - 0.02)
            }
        })
        .collect();
    let mut engine = ScriptedEngine::from_shear_history(tag(40), supports.clone(), 0.01, &shears);
    let cfg = PushoverConfig::from_model_units(tag(40), Dof::X, 0.01, 0.1, 9.0, supports);
    run_pushover(&mut engine, cfg).unwrap()
}

#[test]
fn capacity_meets_linear_demand() {
    let outcome = bilinear_capacity();
    assert!(outcome.verdict.is_completed());

    // Demand falls by 5000 kN/m from 660 kN at zero displacement.
    let demand: Vec<f64> = outcome
        .curve
        .displacements()
        .iter()
        .map(|d| 660.0 - 5000.0 * d)
        .collect();

    let lin = performance_point(&outcome.curve, &demand, IntersectionMethod::Linear, 1e-12).unwrap();
    let brent =
        performance_point(&outcome.curve, &demand, IntersectionMethod::Bracketing, 1e-12).unwrap();

    // 300 + 1250 (d - 0.02) = 660 - 5000 d  ->  d = 385 / 6250 = 0.0616
    assert!((lin.x - 0.0616).abs() < 1e-9, "x = {}", lin.x);
    assert!((lin.y - 352.0).abs() < 1e-6);
    assert_eq!(lin.bracket_index, 5);
    assert!((brent.x - lin.x).abs() < 1e-6);
    assert!(brent.consistency_error < 1e-6);
}

#[test]
fn demand_above_capacity_everywhere() {
    let outcome = bilinear_capacity();
    let demand = vec![10_000.0; outcome.curve.len()];
    let err = performance_point(
        &outcome.curve,
        &demand,
        IntersectionMethod::Bracketing,
        1e-12,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PushoverError::Curve(CurveError::NoIntersectionFound { .. })
    ));
}

#[test]
fn demand_length_must_match_curve() {
    let outcome = bilinear_capacity();
    let err = performance_point(
        &outcome.curve,
        &[1.0, 2.0],
        IntersectionMethod::Linear,
        1e-12,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PushoverError::Curve(CurveError::InvalidInput { .. })
    ));
}
