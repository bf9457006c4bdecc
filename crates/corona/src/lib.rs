//! Corona: problem definitions for a finite-volume MHD solver.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Corona sub-crates. For most users, adding `corona` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use corona::prelude::*;
//!
//! let config = PhysicsConfig::builder(EquationSystem::Mhd, Geometry::Spherical)
//!     .axis(AxisSpec::new(0.0, 2.0, 100))
//!     .components(3)
//!     .divergence_control(DivergenceControl::DivCleaning)
//!     .build();
//!
//! let mut sim = Simulation::builder(config)
//!     .problem(DiskProblem::default())
//!     .build()
//!     .unwrap();
//! sim.run(10, 1e-3).unwrap();
//!
//! let grid = sim.grid();
//! let inner = grid.interior_cells().next().unwrap();
//! assert_eq!(sim.cell(inner).get(Variable::Rho), Some(10.0));
//! assert_eq!(sim.clock().step, 10);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `corona-core` | Variables, layouts, positions, sides, hook errors |
//! | [`grid`] | `corona-grid` | Local grid, partitions, boundary regions, state storage |
//! | [`config`] | `corona-config` | Configuration table, validation, TOML and definitions loaders |
//! | [`problem`] | `corona-problem` | The `Problem` trait, hook context, boundary views |
//! | [`problems`] | `corona-problems` | Reference problems (disk, magnetar, perturbation) |
//! | [`engine`] | `corona-engine` | The simulation host and integrator seam |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Variables, layouts, positions and hook errors (`corona-core`).
pub use corona_core as types;

/// Grid metadata and per-cell state storage (`corona-grid`).
///
/// [`grid::Grid`] describes the local partition; [`grid::StateArray`]
/// holds every cell's primitive state.
pub use corona_grid as grid;

/// The configuration table (`corona-config`).
///
/// [`config::PhysicsConfig`] loads from TOML or from a definitions-style
/// switch table and validates itself before any hook runs.
pub use corona_config as config;

/// The problem-definition interface (`corona-problem`).
///
/// The [`problem::Problem`] trait is the main extension point.
pub use corona_problem as problem;

/// Reference problem definitions (`corona-problems`).
pub use corona_problems as problems;

/// The reference simulation host (`corona-engine`).
pub use corona_engine as engine;

/// Common imports for typical Corona usage.
///
/// ```rust
/// use corona::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use corona_core::{
        CellIndex, DivergenceControl, Eos, EquationSystem, Geometry, HookError, Position,
        PrimitiveState, Side, Variable, VariableLayout,
    };

    // Grid
    pub use corona_grid::{AxisSpec, BoundaryRegion, Grid, Partition, StateArray};

    // Configuration
    pub use corona_config::{BodyForce, ConfigError, PhysicsConfig, UnitSystem};

    // Problem interface
    pub use corona_problem::{BoundaryFill, BoundaryView, HookContext, Problem};

    // Reference problems
    pub use corona_problems::{DensityPerturbation, DiskProblem, MagnetarProblem};

    // Engine
    pub use corona_engine::{EngineError, Frozen, Integrator, Simulation, StepReport};
}
