//! Seeded density perturbation wrapper.
//!
//! Runs the inner problem's `init_domain`, then multiplies each interior
//! density by `1 + amplitude * u` with `u ~ U(-1, 1)`, and finally rescales
//! the perturbed densities so the local interior mass is unchanged.
//!
//! Respects the determinism contract: each cell draws from a ChaCha8 RNG
//! seeded with `seed XOR global_cell_index`, so the raw factor of a cell
//! does not depend on the domain decomposition or on visit order.
//!
//! Constructed via the builder pattern: [`DensityPerturbation::builder`].

use corona_config::PhysicsConfig;
use corona_core::{CellIndex, HookError, Position, PrimitiveState, Variable};
use corona_grid::{Grid, StateArray};
use corona_problem::{BoundaryFill, BoundaryView, HookContext, Problem};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Density noise layered over an inner problem.
#[derive(Clone, Debug)]
pub struct DensityPerturbation<P> {
    inner: P,
    amplitude: f64,
    seed: u64,
}

/// Builder for [`DensityPerturbation`].
///
/// Required: the inner problem (given to [`DensityPerturbation::builder`]).
#[derive(Clone, Debug)]
pub struct DensityPerturbationBuilder<P> {
    inner: P,
    amplitude: f64,
    seed: u64,
}

impl<P: Problem> DensityPerturbation<P> {
    /// Create a builder wrapping `inner`.
    pub fn builder(inner: P) -> DensityPerturbationBuilder<P> {
        DensityPerturbationBuilder {
            inner,
            amplitude: 0.01,
            seed: 0,
        }
    }

    /// The wrapped problem.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Multiplicative factor before mass rescaling for the cell with
    /// global linear index `global`.
    pub fn factor(&self, global: u64) -> f64 {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed ^ global);
        let u = rng.random::<f64>() * 2.0 - 1.0;
        1.0 + self.amplitude * u
    }

    /// Global linear index of a local cell, independent of the partition.
    fn global_index(config: &PhysicsConfig, grid: &Grid, cell: CellIndex) -> u64 {
        let res = config.resolution();
        let mut index = 0u64;
        for axis in (0..grid.dimensions()).rev() {
            let g = grid.global_index(axis, cell.along(axis)).max(0) as u64;
            index = index * res[axis] as u64 + g;
        }
        index
    }
}

impl<P> DensityPerturbationBuilder<P> {
    /// Relative amplitude (default: 0.01). Must lie in `[0, 1)`.
    pub fn amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// RNG seed (default: 0).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Build the wrapper.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `amplitude` is not in `[0, 1)`, which could make a
    /// density non-positive.
    pub fn build(self) -> Result<DensityPerturbation<P>, String> {
        if !(0.0..1.0).contains(&self.amplitude) {
            return Err(format!(
                "amplitude must be in [0, 1), got {}",
                self.amplitude
            ));
        }
        Ok(DensityPerturbation {
            inner: self.inner,
            amplitude: self.amplitude,
            seed: self.seed,
        })
    }
}

impl<P: Problem> Problem for DensityPerturbation<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn check_config(&self, config: &PhysicsConfig) -> Result<(), String> {
        self.inner.check_config(config)
    }

    fn init(&self, config: &PhysicsConfig, position: &Position) -> PrimitiveState {
        self.inner.init(config, position)
    }

    fn init_domain(&self, ctx: &HookContext<'_>, state: &mut StateArray) -> Result<(), HookError> {
        self.inner.init_domain(ctx, state)?;
        let grid = ctx.grid();
        let cells: Vec<CellIndex> = grid.interior_cells().collect();
        let mut before = 0.0;
        let mut after = 0.0;
        for &cell in &cells {
            let rho = state
                .get(Variable::Rho, cell)
                .ok_or_else(|| HookError::failed("state has no density"))?;
            let perturbed = rho * self.factor(Self::global_index(ctx.config(), grid, cell));
            let dv = grid.volume(cell);
            before += rho * dv;
            after += perturbed * dv;
            state.set(Variable::Rho, cell, perturbed);
        }
        if after > 0.0 {
            let scale = before / after;
            for &cell in &cells {
                if let Some(rho) = state.get(Variable::Rho, cell) {
                    state.set(Variable::Rho, cell, rho * scale);
                }
            }
        }
        tracing::debug!(
            amplitude = self.amplitude,
            seed = self.seed,
            cells = cells.len(),
            mass = before,
            "applied density perturbation"
        );
        Ok(())
    }

    fn user_def_boundary(
        &self,
        ctx: &HookContext<'_>,
        view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        self.inner.user_def_boundary(ctx, view)
    }

    fn analysis(&mut self, ctx: &HookContext<'_>, state: &StateArray) -> Result<(), HookError> {
        self.inner.analysis(ctx, state)
    }

    fn body_force_potential(&self, config: &PhysicsConfig, position: &Position) -> Option<f64> {
        self.inner.body_force_potential(config, position)
    }

    fn body_force_vector(&self, config: &PhysicsConfig, position: &Position) -> Option<[f64; 3]> {
        self.inner.body_force_vector(config, position)
    }
}
