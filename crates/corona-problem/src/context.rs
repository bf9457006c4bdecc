//! Read-only context passed to whole-domain hooks.

use corona_config::PhysicsConfig;
use corona_grid::Grid;

/// What a hook may know about the run at the point it is called.
///
/// `grid` describes only the local partition; hooks must not assume access
/// to the global domain.
#[derive(Clone, Copy, Debug)]
pub struct HookContext<'a> {
    config: &'a PhysicsConfig,
    grid: &'a Grid,
    step: u64,
    time: f64,
}

impl<'a> HookContext<'a> {
    /// Construct a context.
    ///
    /// Typically called by the engine, not by problems directly.
    pub fn new(config: &'a PhysicsConfig, grid: &'a Grid, step: u64, time: f64) -> Self {
        Self {
            config,
            grid,
            step,
            time,
        }
    }

    /// The validated configuration.
    pub fn config(&self) -> &'a PhysicsConfig {
        self.config
    }

    /// Local mesh metadata.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Completed steps; 0 during setup.
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Simulation time in code units.
    pub fn time(&self) -> f64 {
        self.time
    }
}
