//! The hook-driving simulation loop.
//!
//! [`Simulation`] is the user-facing API. Construction via
//! [`Simulation::builder`] runs the whole setup sequence; each
//! [`step()`](Simulation::step) then fills user boundaries, advances the
//! [`Integrator`], checks the interior and calls `analysis`.
//!
//! # Ordering
//!
//! Configuration validation and the problem's `check_config` run before
//! any other hook, so a rejected configuration never reaches `init`.
//! `init` is called for every local cell (ghosts included) before
//! `init_domain`; `init_domain` runs exactly once before the first
//! boundary call; `analysis` runs once after setup (step 0) and once per
//! completed step.

use std::collections::BTreeSet;

use corona_config::{BodyForce, ConfigError, PhysicsConfig};
use corona_core::{CellIndex, HookError, PrimitiveState, Side};
use corona_grid::{Grid, Partition, StateArray};
use corona_problem::{BoundaryFill, BoundaryView, HookContext, Problem};

use crate::error::{EngineError, Stage};
use crate::integrator::{Frozen, Integrator};
use crate::report::{Clock, StepReport};

// ── SimulationBuilder ───────────────────────────────────────────

/// Builder for [`Simulation`].
///
/// Required: a problem ([`problem`](Self::problem)).
/// Defaults: [`Frozen`] integrator, whole-domain partition.
pub struct SimulationBuilder<P> {
    config: PhysicsConfig,
    problem: Option<P>,
    integrator: Box<dyn Integrator>,
    partition: Option<Partition>,
}

impl<P: Problem> SimulationBuilder<P> {
    /// Problem whose hooks the simulation drives.
    pub fn problem(mut self, problem: P) -> Self {
        self.problem = Some(problem);
        self
    }

    /// Numerical scheme advancing the state (default: [`Frozen`]).
    pub fn integrator(mut self, integrator: impl Integrator) -> Self {
        self.integrator = Box::new(integrator);
        self
    }

    /// Local partition of the global domain (default: the whole domain).
    pub fn partition(mut self, partition: Partition) -> Self {
        self.partition = Some(partition);
        self
    }

    /// Validate, build the grid and run setup.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingComponent`] if no problem was given.
    /// - [`EngineError::Config`] if validation, the problem's
    ///   `check_config`, or the body-force check fails. No hook other than
    ///   `check_config` has run in that case.
    /// - [`EngineError::Grid`] if the partition does not fit the domain.
    /// - [`EngineError::Hook`] / [`EngineError::Invariant`] if
    ///   `init_domain` or the initial `analysis` fails, or a cell is
    ///   unphysical after setup.
    pub fn build(self) -> Result<Simulation<P>, EngineError> {
        let Self {
            config,
            problem,
            integrator,
            partition,
        } = self;
        let mut problem = problem.ok_or(EngineError::MissingComponent("problem"))?;

        // 1. Configuration and problem acceptance.
        config.validate()?;
        problem
            .check_config(&config)
            .map_err(|reason| ConfigError::ProblemRejected {
                problem: problem.name().to_string(),
                reason,
            })?;

        // 2. Local grid.
        let partition = partition.unwrap_or_else(|| Partition::whole(config.resolution()));
        let grid = Grid::new(
            config.physics.geometry,
            &config.grid.axes,
            config.ghost_width(),
            partition,
        )?;
        grid.storage_len(config.layout().len())?;

        // 3. Body force availability, probed at the first interior cell.
        check_body_force(&config, &grid, &problem)?;

        // 4. Initial condition on every local cell, then init_domain.
        let mut state = initial_state(&config, &grid, &problem);
        let clock = Clock::default();
        let ctx = HookContext::new(&config, &grid, clock.step, clock.time);
        problem
            .init_domain(&ctx, &mut state)
            .map_err(EngineError::hook(Stage::InitDomain))?;

        // 5. Post-setup invariants over every cell.
        state
            .check_physical(grid.cells())
            .map_err(EngineError::invariant(Stage::Setup))?;

        // 6. Observe the initial state.
        problem
            .analysis(&ctx, &state)
            .map_err(EngineError::hook(Stage::Analysis))?;

        tracing::info!(
            problem = problem.name(),
            integrator = integrator.name(),
            geometry = ?config.physics.geometry,
            cells = grid.cell_count(),
            variables = state.layout().len(),
            "simulation ready"
        );

        Ok(Simulation {
            config,
            grid,
            state,
            problem,
            integrator,
            clock,
            warned: BTreeSet::new(),
        })
    }
}

fn check_body_force<P: Problem>(
    config: &PhysicsConfig,
    grid: &Grid,
    problem: &P,
) -> Result<(), ConfigError> {
    let force = config.physics.body_force;
    if force == BodyForce::None {
        return Ok(());
    }
    let probe = grid
        .interior_cells()
        .next()
        .unwrap_or(CellIndex::new(0, 0, 0));
    let position = grid.position(probe);
    let provided = match force {
        BodyForce::None => true,
        BodyForce::ConstantGravity => problem.body_force_vector(config, &position).is_some(),
        BodyForce::Potential => problem.body_force_potential(config, &position).is_some(),
    };
    if provided {
        Ok(())
    } else {
        Err(ConfigError::MissingBodyForce {
            model: format!("{force:?}"),
            problem: problem.name().to_string(),
        })
    }
}

#[cfg(not(feature = "parallel"))]
fn initial_state<P: Problem>(config: &PhysicsConfig, grid: &Grid, problem: &P) -> StateArray {
    StateArray::from_fn(config.layout(), grid, |cell| {
        problem.init(config, &grid.position(cell))
    })
}

#[cfg(feature = "parallel")]
fn initial_state<P: Problem>(config: &PhysicsConfig, grid: &Grid, problem: &P) -> StateArray {
    use rayon::prelude::*;

    let states: Vec<PrimitiveState> = (0..grid.cell_count())
        .into_par_iter()
        .map(|index| problem.init(config, &grid.position(grid.unflat(index))))
        .collect();
    let mut array = StateArray::new(config.layout(), grid);
    for (index, state) in states.iter().enumerate() {
        array.set_state(grid.unflat(index), state);
    }
    array
}

// ── Simulation ──────────────────────────────────────────────────

/// A configured run of one problem on one local partition.
///
/// `Simulation` is [`Send`]; all mutating methods take `&mut self`.
pub struct Simulation<P> {
    config: PhysicsConfig,
    grid: Grid,
    state: StateArray,
    problem: P,
    integrator: Box<dyn Integrator>,
    clock: Clock,
    warned: BTreeSet<Side>,
}

impl<P: Problem> Simulation<P> {
    /// Start building a simulation of `config`.
    pub fn builder(config: PhysicsConfig) -> SimulationBuilder<P> {
        SimulationBuilder {
            config,
            problem: None,
            integrator: Box::new(Frozen),
            partition: None,
        }
    }

    /// The validated configuration.
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// The local grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Current primitive state.
    pub fn state(&self) -> &StateArray {
        &self.state
    }

    /// Current state of one cell.
    pub fn cell(&self, cell: CellIndex) -> PrimitiveState {
        self.state.state(cell)
    }

    /// The problem definition.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Completed steps and elapsed time.
    pub fn clock(&self) -> Clock {
        self.clock
    }

    /// Gravitational potential at the centre of `cell`.
    pub fn body_force_potential(&self, cell: CellIndex) -> Option<f64> {
        self.problem
            .body_force_potential(&self.config, &self.grid.position(cell))
    }

    /// Body-force acceleration at the centre of `cell`.
    pub fn body_force_vector(&self, cell: CellIndex) -> Option<[f64; 3]> {
        self.problem
            .body_force_vector(&self.config, &self.grid.position(cell))
    }

    /// Advance one step of size `dt`.
    ///
    /// Fills every declared user side that is a physical boundary of this
    /// partition (then the internal boundary, if enabled), advances the
    /// integrator, checks the interior and calls `analysis`.
    ///
    /// A side whose hook leaves its region untouched keeps its previous
    /// ghost values; a warning is logged the first time this happens.
    /// Any region a hook wrote into is checked for physical values, whatever
    /// the hook reported. Reporting `Written` without a write, or `Untouched`
    /// after writing, is a hook error.
    ///
    /// # Errors
    ///
    /// Returns the first failure. The state may be partially updated; the
    /// clock is only advanced when the whole step succeeds.
    pub fn step(&mut self, dt: f64) -> Result<StepReport, EngineError> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(EngineError::InvalidDt { dt });
        }

        // 1. User boundaries.
        let mut filled_sides = Vec::new();
        let mut untouched_sides = Vec::new();
        let ctx = HookContext::new(&self.config, &self.grid, self.clock.step, self.clock.time);
        for side in declared_sides(&self.config, &self.grid) {
            let Some(region) = self.grid.boundary_region(side) else {
                continue;
            };
            let mut view = BoundaryView::new(&mut self.state, &region);
            let fill = self
                .problem
                .user_def_boundary(&ctx, &mut view)
                .map_err(EngineError::hook(Stage::Boundary(side)))?;
            let writes = view.writes();
            if writes > 0 {
                self.state
                    .check_physical(region.cells())
                    .map_err(EngineError::invariant(Stage::Boundary(side)))?;
            }
            match fill {
                BoundaryFill::Written if writes == 0 => {
                    return Err(EngineError::hook(Stage::Boundary(side))(
                        HookError::EmptyFill { side },
                    ));
                }
                BoundaryFill::Untouched if writes > 0 => {
                    return Err(EngineError::hook(Stage::Boundary(side))(
                        HookError::UndeclaredWrites { side, writes },
                    ));
                }
                BoundaryFill::Written => filled_sides.push(side),
                BoundaryFill::Untouched => {
                    if self.config.output.warning_messages && self.warned.insert(side) {
                        tracing::warn!(
                            problem = self.problem.name(),
                            %side,
                            "boundary hook left a declared side untouched; keeping previous ghost values"
                        );
                    }
                    untouched_sides.push(side);
                }
            }
        }

        // 2. Integrate.
        self.integrator
            .advance(&self.config, &self.grid, &mut self.state, dt)
            .map_err(|reason| EngineError::Integrator {
                name: self.integrator.name().to_string(),
                reason,
            })?;
        self.state
            .check_physical(self.grid.interior_cells())
            .map_err(EngineError::invariant(Stage::Integration))?;

        // 3. Advance the clock and observe.
        let clock = Clock {
            step: self.clock.step + 1,
            time: self.clock.time + dt,
        };
        let ctx = HookContext::new(&self.config, &self.grid, clock.step, clock.time);
        self.problem
            .analysis(&ctx, &self.state)
            .map_err(EngineError::hook(Stage::Analysis))?;
        self.clock = clock;

        tracing::debug!(
            step = clock.step,
            time = clock.time,
            filled = filled_sides.len(),
            untouched = untouched_sides.len(),
            "step complete"
        );
        Ok(StepReport {
            step: clock.step,
            time: clock.time,
            filled_sides,
            untouched_sides,
        })
    }

    /// Run `steps` steps of size `dt`, stopping at the first error.
    pub fn run(&mut self, steps: u64, dt: f64) -> Result<Vec<StepReport>, EngineError> {
        (0..steps).map(|_| self.step(dt)).collect()
    }

    /// Consume the simulation, returning the problem and the final state.
    pub fn into_parts(self) -> (P, StateArray) {
        (self.problem, self.state)
    }
}

/// Sides visited each step, in canonical order, followed by the internal
/// boundary when enabled.
fn declared_sides(config: &PhysicsConfig, grid: &Grid) -> Vec<Side> {
    let mut sides: Vec<Side> = Side::ALL_FACES
        .into_iter()
        .filter(|&side| config.is_user_side(side) && grid.is_physical_boundary(side))
        .collect();
    if config.boundaries.internal {
        sides.push(Side::Internal);
    }
    sides
}
