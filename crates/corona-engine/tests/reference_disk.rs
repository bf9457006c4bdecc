//! Integration test: the reference disk problem end to end.
//!
//! Runs the dense-disk initial condition on a 100-cell spherical MHD grid
//! spanning `r ∈ [0, 2]` and checks the state after setup and after
//! stepping with a frozen integrator, plus decomposition independence.

use corona_config::PhysicsConfig;
use corona_core::{CellIndex, EquationSystem, Geometry, Position, Variable};
use corona_engine::{Clock, Simulation};
use corona_grid::{AxisSpec, Partition, StateArray};
use corona_problem::Problem;
use corona_problems::DiskProblem;
use corona_test_utils::{cartesian_hydro_config, spherical_mhd_config};
use proptest::prelude::*;

fn rho_prs(sim: &Simulation<DiskProblem>, cell: CellIndex) -> (f64, f64) {
    let state = sim.cell(cell);
    (
        state.get(Variable::Rho).unwrap(),
        state.get(Variable::Prs).unwrap(),
    )
}

#[test]
fn spherical_mhd_disk_setup() {
    let sim = Simulation::builder(spherical_mhd_config())
        .problem(DiskProblem::default())
        .build()
        .unwrap();
    let grid = sim.grid();
    assert_eq!(grid.geometry(), Geometry::Spherical);
    assert_eq!(grid.interior_cells().count(), 100);

    let mut dense = 0;
    for cell in grid.interior_cells() {
        let r = grid.position(cell).x1;
        let (rho, prs) = rho_prs(&sim, cell);
        if r < 1.0 {
            assert_eq!((rho, prs), (10.0, 30.0), "cell at r = {r}");
            dense += 1;
        } else {
            assert_eq!((rho, prs), (1.0, 1.0), "cell at r = {r}");
        }
        let state = sim.cell(cell);
        for axis in 0..3 {
            assert_eq!(state.get(Variable::velocity(axis).unwrap()), Some(0.0));
            assert_eq!(state.get(Variable::magnetic(axis).unwrap()), Some(0.0));
        }
    }
    assert_eq!(dense, 50);

    // Cells containing r = 0.5 and r = 1.5.
    let at = |r: f64| {
        grid.interior_cells()
            .find(|&c| {
                let (lo, hi) = grid.faces(0, c.i);
                lo <= r && r < hi
            })
            .unwrap()
    };
    assert_eq!(rho_prs(&sim, at(0.5)), (10.0, 30.0));
    assert_eq!(rho_prs(&sim, at(1.5)), (1.0, 1.0));
}

#[test]
fn frozen_steps_leave_state_unchanged() {
    let mut sim = Simulation::builder(spherical_mhd_config())
        .problem(DiskProblem::default())
        .build()
        .unwrap();
    let before = sim.state().clone();
    let reports = sim.run(10, 1e-3).unwrap();
    assert_eq!(reports.len(), 10);
    // No user sides declared.
    assert!(reports.iter().all(|r| r.filled_sides.is_empty()));
    assert!(reports.iter().all(|r| r.untouched_sides.is_empty()));
    assert_eq!(sim.state(), &before);
    assert_eq!(sim.clock().step, 10);
    assert!((sim.clock().time - 1e-2).abs() < 1e-15);
}

#[test]
fn threshold_cell_is_exterior() {
    // One interior cell whose centre sits exactly on x1 = 1.0.
    let cfg = PhysicsConfig::builder(EquationSystem::Hydrodynamics, Geometry::Cartesian)
        .axis(AxisSpec::new(0.5, 1.5, 1))
        .build();
    let sim = Simulation::builder(cfg)
        .problem(DiskProblem::default())
        .build()
        .unwrap();
    let grid = sim.grid();
    let cell = grid.interior_cells().next().unwrap();
    assert_eq!(grid.position(cell).x1, 1.0);
    assert_eq!(rho_prs(&sim, cell), (1.0, 1.0));
    // Ghost cells are initialized too; the lower ones sit inside the disk.
    assert_eq!(grid.position(CellIndex::new(1, 0, 0)).x1, 0.0);
    assert_eq!(rho_prs(&sim, CellIndex::new(1, 0, 0)), (10.0, 30.0));
}

#[test]
fn setup_matches_serial_evaluation() {
    let cfg = spherical_mhd_config();
    let sim = Simulation::builder(cfg.clone())
        .problem(DiskProblem::default())
        .build()
        .unwrap();
    let disk = DiskProblem::default();
    let serial = StateArray::from_fn(cfg.layout(), sim.grid(), |cell| {
        disk.init(&cfg, &sim.grid().position(cell))
    });
    assert_eq!(sim.state(), &serial);
}

#[test]
fn rebuilding_gives_identical_state() {
    let build = || {
        Simulation::builder(cartesian_hydro_config(12, 7))
            .problem(DiskProblem::default())
            .build()
            .unwrap()
    };
    let (a, b) = (build(), build());
    assert_eq!(a.state(), b.state());
    assert_eq!(a.clock(), Clock::default());
}

#[test]
fn decomposition_does_not_change_values() {
    let cfg = PhysicsConfig::builder(EquationSystem::Hydrodynamics, Geometry::Cartesian)
        .axis(AxisSpec::new(0.0, 2.0, 16))
        .axis(AxisSpec::new(0.0, 1.0, 4))
        .build();
    let whole = Simulation::builder(cfg.clone())
        .problem(DiskProblem::default())
        .build()
        .unwrap();
    let g = whole.grid().ghost();
    for rank in 0..2 {
        let part = Partition::block([16, 4, 1], [2, 1, 1], [rank, 0, 0]).unwrap();
        let block = Simulation::builder(cfg.clone())
            .problem(DiskProblem::default())
            .partition(part)
            .build()
            .unwrap();
        for cell in block.grid().interior_cells() {
            let gi = block.grid().global_index(0, cell.i) as usize;
            let twin = CellIndex::new(gi + g, cell.j, 0);
            assert_eq!(block.cell(cell), whole.cell(twin));
        }
    }
}

proptest! {
    #[test]
    fn init_is_order_independent(xs in prop::collection::vec(-2.0f64..4.0, 1..64)) {
        let cfg = spherical_mhd_config();
        let disk = DiskProblem::default();
        let forward: Vec<_> = xs
            .iter()
            .map(|&x| disk.init(&cfg, &Position::new(x, 0.0, 0.0)))
            .collect();
        let backward: Vec<_> = xs
            .iter()
            .rev()
            .map(|&x| disk.init(&cfg, &Position::new(x, 0.0, 0.0)))
            .collect();
        for (a, b) in forward.iter().zip(backward.iter().rev()) {
            prop_assert_eq!(a, b);
        }
        for (x, state) in xs.iter().zip(&forward) {
            let expected = if *x < 1.0 { 10.0 } else { 1.0 };
            prop_assert_eq!(state.get(Variable::Rho), Some(expected));
        }
    }
}
