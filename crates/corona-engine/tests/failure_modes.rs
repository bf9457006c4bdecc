//! Integration test: fatal failures surface with their stage.
//!
//! Each hook or integrator failure must come back as the matching
//! `EngineError` variant, and a failed step must not advance the clock.

use corona_config::PhysicsConfig;
use corona_core::{EquationSystem, Geometry, HookError, InvariantViolation, Side, Variable};
use corona_engine::{EngineError, Simulation, Stage};
use corona_grid::{AxisSpec, GridError};
use corona_test_utils::{
    cartesian_mhd_config, CorruptingIntegrator, FailingIntegrator, FailingProblem, FailureMode,
    UniformProblem,
};

fn build_failing(mode: FailureMode) -> Result<Simulation<FailingProblem>, EngineError> {
    Simulation::builder(cartesian_mhd_config(8, 4))
        .problem(FailingProblem::new(mode))
        .build()
}

#[test]
fn negative_initial_density_is_fatal() {
    match build_failing(FailureMode::NegativeDensity { threshold: 0.5 }) {
        Err(EngineError::Invariant {
            stage: Stage::Setup,
            source: InvariantViolation::NonPositive { variable, value, .. },
        }) => {
            assert_eq!(variable, Variable::Rho);
            assert_eq!(value, -1.0);
        }
        Err(other) => panic!("expected Invariant at setup, got {other:?}"),
        Ok(_) => panic!("expected Invariant at setup, got a simulation"),
    }
}

#[test]
fn init_domain_failure_is_fatal() {
    match build_failing(FailureMode::InitDomain) {
        Err(EngineError::Hook {
            stage: Stage::InitDomain,
            source: HookError::Failed { .. },
        }) => {}
        Err(other) => panic!("expected InitDomain hook failure, got {other:?}"),
        Ok(_) => panic!("expected InitDomain hook failure, got a simulation"),
    }
}

#[test]
fn oversized_axis_is_rejected_before_allocation() {
    let cfg = PhysicsConfig::builder(EquationSystem::Hydrodynamics, Geometry::Cartesian)
        .axis(AxisSpec::new(0.0, 1.0, usize::MAX / 8))
        .build();
    cfg.validate().unwrap();
    match Simulation::builder(cfg).problem(UniformProblem::default()).build() {
        Err(EngineError::Grid(GridError::StorageOverflow { variables, .. })) => {
            assert_eq!(variables, 3);
        }
        Err(other) => panic!("expected StorageOverflow, got {other:?}"),
        Ok(_) => panic!("expected StorageOverflow, got a simulation"),
    }
}

#[test]
fn write_outside_region_is_rejected() {
    let mut sim = build_failing(FailureMode::WriteOutsideRegion).unwrap();
    match sim.step(0.1) {
        Err(EngineError::Hook {
            stage: Stage::Boundary(Side::X1Beg),
            source: HookError::OutsideRegion { side, .. },
        }) => assert_eq!(side, Side::X1Beg),
        other => panic!("expected OutsideRegion, got {other:?}"),
    }
    assert_eq!(sim.clock().step, 0);
}

#[test]
fn non_finite_boundary_is_fatal() {
    let mut sim = build_failing(FailureMode::NanBoundary).unwrap();
    match sim.step(0.1) {
        Err(EngineError::Invariant {
            stage: Stage::Boundary(Side::X1Beg),
            source: InvariantViolation::NonFinite { variable, .. },
        }) => assert_eq!(variable, Variable::Prs),
        other => panic!("expected NonFinite at X1_BEG, got {other:?}"),
    }
}

#[test]
fn corrupt_ghosts_are_fatal_even_when_reported_untouched() {
    let mut sim = build_failing(FailureMode::CorruptUntouched).unwrap();
    match sim.step(0.1) {
        Err(EngineError::Invariant {
            stage: Stage::Boundary(Side::X1Beg),
            source: InvariantViolation::NonFinite { variable, .. },
        }) => assert_eq!(variable, Variable::Rho),
        other => panic!("expected NonFinite at X1_BEG, got {other:?}"),
    }
    assert_eq!(sim.clock().step, 0);
}

#[test]
fn writes_behind_an_untouched_report_are_rejected() {
    let mut sim = build_failing(FailureMode::UndeclaredWrite).unwrap();
    match sim.step(0.1) {
        Err(EngineError::Hook {
            stage: Stage::Boundary(Side::X1Beg),
            source: HookError::UndeclaredWrites { side, writes },
        }) => {
            assert_eq!(side, Side::X1Beg);
            assert_eq!(writes, 1);
        }
        other => panic!("expected UndeclaredWrites, got {other:?}"),
    }
}

#[test]
fn written_report_without_writes_is_rejected() {
    let mut sim = build_failing(FailureMode::EmptyFill).unwrap();
    match sim.step(0.1) {
        Err(EngineError::Hook {
            stage: Stage::Boundary(Side::X1Beg),
            source: HookError::EmptyFill { side },
        }) => assert_eq!(side, Side::X1Beg),
        other => panic!("expected EmptyFill, got {other:?}"),
    }
    assert_eq!(sim.clock().step, 0);
}

#[test]
fn analysis_failure_stops_the_run() {
    let mut sim = build_failing(FailureMode::Analysis { step: 2 }).unwrap();
    sim.step(0.1).unwrap();
    match sim.run(5, 0.1) {
        Err(EngineError::Hook {
            stage: Stage::Analysis,
            ..
        }) => {}
        other => panic!("expected Analysis failure, got {other:?}"),
    }
    assert_eq!(sim.clock().step, 1);
}

#[test]
fn integrator_failure_names_the_integrator() {
    let mut sim = Simulation::builder(cartesian_mhd_config(8, 4))
        .problem(UniformProblem::default())
        .integrator(FailingIntegrator::new(1))
        .build()
        .unwrap();
    sim.step(0.1).unwrap();
    match sim.step(0.1) {
        Err(EngineError::Integrator { name, reason }) => {
            assert_eq!(name, "failing");
            assert!(reason.contains("deliberate"));
        }
        other => panic!("expected Integrator failure, got {other:?}"),
    }
    assert_eq!(sim.clock().step, 1);
}

#[test]
fn integrator_producing_negative_pressure_is_caught() {
    let mut sim = Simulation::builder(cartesian_mhd_config(8, 4))
        .problem(UniformProblem::default())
        .integrator(CorruptingIntegrator::new(Variable::Prs, -3.0))
        .build()
        .unwrap();
    match sim.step(0.1) {
        Err(EngineError::Invariant {
            stage: Stage::Integration,
            source: InvariantViolation::NonPositive { variable, .. },
        }) => assert_eq!(variable, Variable::Prs),
        other => panic!("expected Invariant after integration, got {other:?}"),
    }
}

#[test]
fn errors_render_with_stage() {
    let err = build_failing(FailureMode::InitDomain).err().unwrap();
    assert!(err.to_string().starts_with("init_domain hook failed"));
}
