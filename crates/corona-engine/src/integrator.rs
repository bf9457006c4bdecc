//! The numerical scheme seam.

use corona_config::PhysicsConfig;
use corona_grid::{Grid, StateArray};

/// Advances the state by one time step.
///
/// Implemented by the numerical engine (Riemann solver, reconstruction,
/// divergence control, time stepping). The simulation calls
/// [`advance`](Self::advance) after filling user boundaries and checks
/// the interior afterwards.
pub trait Integrator: Send + 'static {
    /// Human-readable name for error reporting.
    fn name(&self) -> &str;

    /// Advance `state` by `dt`.
    fn advance(
        &mut self,
        config: &PhysicsConfig,
        grid: &Grid,
        state: &mut StateArray,
        dt: f64,
    ) -> Result<(), String>;
}

/// Integrator that leaves the state unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct Frozen;

impl Integrator for Frozen {
    fn name(&self) -> &str {
        "frozen"
    }

    fn advance(
        &mut self,
        _config: &PhysicsConfig,
        _grid: &Grid,
        _state: &mut StateArray,
        _dt: f64,
    ) -> Result<(), String> {
        Ok(())
    }
}
