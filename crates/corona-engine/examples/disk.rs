//! Corona quickstart: the dense-disk problem from a TOML configuration.
//!
//! Demonstrates:
//!   1. Loading and validating a configuration
//!   2. Building a simulation around a reference problem
//!   3. Wrapping it with a zero-gradient boundary and density noise
//!   4. Stepping and reading the resulting state
//!
//! Run with:
//!   cargo run --example disk
//!
//! Set `RUST_LOG=debug` to see per-step logging.

use corona_config::PhysicsConfig;
use corona_core::{CellIndex, HookError, Position, PrimitiveState, Side, Variable};
use corona_engine::Simulation;
use corona_grid::StateArray;
use corona_problem::{BoundaryFill, BoundaryView, HookContext, Problem};
use corona_problems::{DensityPerturbation, DiskProblem};
use tracing_subscriber::EnvFilter;

// ─── Configuration ──────────────────────────────────────────────

const CONFIG: &str = r#"
[physics]
equation_system = "hydrodynamics"
dimensions = 2
geometry = "cylindrical"
body_force = "none"

[numerics]
reconstruction = "linear"
time_stepping = "rk2"

[grid]
axes = [
    { min = 0.0, max = 2.0, resolution = 64 },
    { min = -1.0, max = 1.0, resolution = 64 },
]

[boundaries]
user_sides = ["x1-end"]
"#;

const STEPS: u64 = 20;
const DT: f64 = 1e-3;

// ─── Outflow wrapper ────────────────────────────────────────────

/// Copies the last interior column into the outer radial ghosts.
struct Outflow<P>(P);

impl<P: Problem> Problem for Outflow<P> {
    fn name(&self) -> &str {
        self.0.name()
    }

    fn init(&self, config: &PhysicsConfig, position: &Position) -> PrimitiveState {
        self.0.init(config, position)
    }

    fn init_domain(&self, ctx: &HookContext<'_>, state: &mut StateArray) -> Result<(), HookError> {
        self.0.init_domain(ctx, state)
    }

    fn user_def_boundary(
        &self,
        ctx: &HookContext<'_>,
        view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        if view.side() != Side::X1End {
            return Ok(BoundaryFill::Untouched);
        }
        let edge = ctx.grid().shape()[0] - ctx.grid().ghost() - 1;
        let cells: Vec<CellIndex> = view.cells().collect();
        for cell in cells {
            let source = view.state(cell.with(0, edge));
            view.set_state(cell, &source)?;
        }
        Ok(BoundaryFill::Written)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = PhysicsConfig::from_toml_str(CONFIG)?;
    let problem = DensityPerturbation::builder(DiskProblem::default())
        .amplitude(0.05)
        .seed(2024)
        .build()?;

    let mut sim = Simulation::builder(config)
        .problem(Outflow(problem))
        .build()?;

    for report in sim.run(STEPS, DT)? {
        if report.step % 5 == 0 {
            println!(
                "step {:>3}  t = {:.4}  filled = {:?}",
                report.step, report.time, report.filled_sides
            );
        }
    }

    // Radial density profile along the midplane.
    let grid = sim.grid();
    let mid = grid.ghost() + grid.partition().count[1] / 2;
    println!("\n    R       rho");
    for cell in grid.interior_cells().filter(|c| c.j == mid).step_by(8) {
        println!(
            "{:6.3}  {:8.4}",
            grid.position(cell).x1,
            sim.cell(cell).get(Variable::Rho).unwrap_or(f64::NAN)
        );
    }
    Ok(())
}
