//! Reusable problem and integrator fixtures.
//!
//! Problems:
//!
//! - [`UniformProblem`]: constant state, optional body force.
//! - [`Recording`]: wraps a problem and logs every hook call.
//! - [`FailingProblem`]: breaks in one configurable way.
//! - [`ZeroGradient`]: fills physical sides by copying the nearest
//!   interior cell, delegating everything else.
//!
//! Integrators:
//!
//! - [`CountingIntegrator`]: counts calls, leaves the state unchanged.
//! - [`CorruptingIntegrator`]: writes one value into one interior cell.
//! - [`FailingIntegrator`]: fails deterministically after N calls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use corona_config::PhysicsConfig;
use corona_core::{CellIndex, HookError, Position, PrimitiveState, Side, Variable};
use corona_engine::Integrator;
use corona_grid::{Grid, StateArray};
use corona_problem::{BoundaryFill, BoundaryView, HookContext, Problem};

// ── UniformProblem ──────────────────────────────────────────────

/// Constant density and pressure everywhere, zero velocity and field.
#[derive(Clone, Debug)]
pub struct UniformProblem {
    pub rho: f64,
    pub prs: f64,
    pub gravity: Option<[f64; 3]>,
    pub potential: Option<f64>,
}

impl UniformProblem {
    pub fn new(rho: f64, prs: f64) -> Self {
        Self {
            rho,
            prs,
            gravity: None,
            potential: None,
        }
    }

    pub fn with_gravity(mut self, g: [f64; 3]) -> Self {
        self.gravity = Some(g);
        self
    }

    pub fn with_potential(mut self, phi: f64) -> Self {
        self.potential = Some(phi);
        self
    }
}

impl Default for UniformProblem {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Problem for UniformProblem {
    fn name(&self) -> &str {
        "uniform"
    }

    fn init(&self, config: &PhysicsConfig, _position: &Position) -> PrimitiveState {
        PrimitiveState::zeroed(config.layout())
            .with(Variable::Rho, self.rho)
            .with(Variable::Prs, self.prs)
    }

    fn body_force_potential(&self, _config: &PhysicsConfig, _position: &Position) -> Option<f64> {
        self.potential
    }

    fn body_force_vector(&self, _config: &PhysicsConfig, _position: &Position) -> Option<[f64; 3]> {
        self.gravity
    }
}

// ── Recording ───────────────────────────────────────────────────

/// A hook call observed by [`Recording`]. `init` calls are only counted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HookEvent {
    CheckConfig,
    InitDomain,
    Boundary { side: Side, step: u64 },
    Analysis { step: u64, time: f64 },
}

/// Shared hook counters and event log.
#[derive(Debug, Default)]
pub struct HookCounts {
    pub init: AtomicUsize,
    events: Mutex<Vec<HookEvent>>,
}

impl HookCounts {
    /// Number of `init` calls so far.
    pub fn init_calls(&self) -> usize {
        self.init.load(Ordering::Relaxed)
    }

    /// Every non-`init` hook call, in call order.
    pub fn events(&self) -> Vec<HookEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&HookEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }

    fn push(&self, event: HookEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Wraps a problem and records each hook call in a shared [`HookCounts`].
///
/// Keep a clone of [`counts`](Self::counts) before handing the wrapper to
/// a simulation to inspect the log afterwards.
pub struct Recording<P> {
    pub inner: P,
    pub counts: Arc<HookCounts>,
}

impl<P: Problem> Recording<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            counts: Arc::new(HookCounts::default()),
        }
    }
}

impl<P: Problem> Problem for Recording<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn check_config(&self, config: &PhysicsConfig) -> Result<(), String> {
        self.counts.push(HookEvent::CheckConfig);
        self.inner.check_config(config)
    }

    fn init(&self, config: &PhysicsConfig, position: &Position) -> PrimitiveState {
        self.counts.init.fetch_add(1, Ordering::Relaxed);
        self.inner.init(config, position)
    }

    fn init_domain(&self, ctx: &HookContext<'_>, state: &mut StateArray) -> Result<(), HookError> {
        self.counts.push(HookEvent::InitDomain);
        self.inner.init_domain(ctx, state)
    }

    fn user_def_boundary(
        &self,
        ctx: &HookContext<'_>,
        view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        self.counts.push(HookEvent::Boundary {
            side: view.side(),
            step: ctx.step(),
        });
        self.inner.user_def_boundary(ctx, view)
    }

    fn analysis(&mut self, ctx: &HookContext<'_>, state: &StateArray) -> Result<(), HookError> {
        self.counts.push(HookEvent::Analysis {
            step: ctx.step(),
            time: ctx.time(),
        });
        self.inner.analysis(ctx, state)
    }

    fn body_force_potential(&self, config: &PhysicsConfig, position: &Position) -> Option<f64> {
        self.inner.body_force_potential(config, position)
    }

    fn body_force_vector(&self, config: &PhysicsConfig, position: &Position) -> Option<[f64; 3]> {
        self.inner.body_force_vector(config, position)
    }
}

// ── FailingProblem ──────────────────────────────────────────────

/// How a [`FailingProblem`] misbehaves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FailureMode {
    /// `check_config` rejects every configuration.
    RejectConfig,
    /// `init` returns a negative density at `x1 < threshold`.
    NegativeDensity { threshold: f64 },
    /// `init_domain` returns an error.
    InitDomain,
    /// `user_def_boundary` writes the first interior cell.
    WriteOutsideRegion,
    /// `user_def_boundary` writes NaN pressure across its region.
    NanBoundary,
    /// `user_def_boundary` writes NaN density and negative pressure across
    /// its region but reports it untouched.
    CorruptUntouched,
    /// `user_def_boundary` writes valid values but reports its region untouched.
    UndeclaredWrite,
    /// `user_def_boundary` reports its region written without writing.
    EmptyFill,
    /// `analysis` fails once the step number reaches `step`.
    Analysis { step: u64 },
}

/// Uniform unit state that breaks according to its [`FailureMode`].
#[derive(Clone, Copy, Debug)]
pub struct FailingProblem {
    pub mode: FailureMode,
}

impl FailingProblem {
    pub fn new(mode: FailureMode) -> Self {
        Self { mode }
    }
}

impl Problem for FailingProblem {
    fn name(&self) -> &str {
        "failing"
    }

    fn check_config(&self, _config: &PhysicsConfig) -> Result<(), String> {
        match self.mode {
            FailureMode::RejectConfig => Err("deliberate rejection".to_string()),
            _ => Ok(()),
        }
    }

    fn init(&self, config: &PhysicsConfig, position: &Position) -> PrimitiveState {
        let rho = match self.mode {
            FailureMode::NegativeDensity { threshold } if position.x1 < threshold => -1.0,
            _ => 1.0,
        };
        PrimitiveState::zeroed(config.layout())
            .with(Variable::Rho, rho)
            .with(Variable::Prs, 1.0)
    }

    fn init_domain(&self, _ctx: &HookContext<'_>, _state: &mut StateArray) -> Result<(), HookError> {
        match self.mode {
            FailureMode::InitDomain => Err(HookError::failed("deliberate init_domain failure")),
            _ => Ok(()),
        }
    }

    fn user_def_boundary(
        &self,
        ctx: &HookContext<'_>,
        view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        match self.mode {
            FailureMode::WriteOutsideRegion => {
                if let Some(cell) = ctx.grid().interior_cells().next() {
                    view.set(Variable::Rho, cell, 1.0)?;
                }
                Ok(BoundaryFill::Written)
            }
            FailureMode::NanBoundary => {
                let cells: Vec<CellIndex> = view.cells().collect();
                for cell in cells {
                    view.set(Variable::Prs, cell, f64::NAN)?;
                }
                Ok(BoundaryFill::Written)
            }
            FailureMode::CorruptUntouched => {
                let cells: Vec<CellIndex> = view.cells().collect();
                for cell in cells {
                    view.set(Variable::Rho, cell, f64::NAN)?;
                    view.set(Variable::Prs, cell, -5.0)?;
                }
                Ok(BoundaryFill::Untouched)
            }
            FailureMode::UndeclaredWrite => {
                if let Some(cell) = view.cells().next() {
                    view.set(Variable::Rho, cell, 2.0)?;
                }
                Ok(BoundaryFill::Untouched)
            }
            FailureMode::EmptyFill => Ok(BoundaryFill::Written),
            _ => Ok(BoundaryFill::Untouched),
        }
    }

    fn analysis(&mut self, ctx: &HookContext<'_>, _state: &StateArray) -> Result<(), HookError> {
        match self.mode {
            FailureMode::Analysis { step } if ctx.step() >= step => Err(HookError::failed(
                format!("deliberate analysis failure at step {}", ctx.step()),
            )),
            _ => Ok(()),
        }
    }
}

// ── ZeroGradient ────────────────────────────────────────────────

/// Fills every physical side by copying the nearest interior cell along
/// the side's axis. The internal boundary and setup hooks delegate.
#[derive(Clone, Debug)]
pub struct ZeroGradient<P> {
    pub inner: P,
}

impl<P: Problem> ZeroGradient<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

/// Nearest interior cell to a ghost `cell` of `side`.
fn nearest_interior(grid: &Grid, side: Side, cell: CellIndex) -> CellIndex {
    let Some(axis) = side.axis() else {
        return cell;
    };
    let g = grid.ghost();
    let edge = if side.is_begin() {
        g
    } else {
        grid.shape()[axis] - g - 1
    };
    cell.with(axis, edge)
}

impl<P: Problem> Problem for ZeroGradient<P> {
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
        self.inner.init_domain(ctx, state)
    }

    fn user_def_boundary(
        &self,
        ctx: &HookContext<'_>,
        view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        let side = view.side();
        if side == Side::Internal {
            return self.inner.user_def_boundary(ctx, view);
        }
        let cells: Vec<CellIndex> = view.cells().collect();
        for cell in cells {
            let source = view.state(nearest_interior(ctx.grid(), side, cell));
            view.set_state(cell, &source)?;
        }
        Ok(BoundaryFill::Written)
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

// ── Integrators ─────────────────────────────────────────────────

/// Leaves the state unchanged and counts calls.
#[derive(Clone, Debug, Default)]
pub struct CountingIntegrator {
    pub calls: Arc<AtomicUsize>,
}

impl CountingIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `advance()` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Integrator for CountingIntegrator {
    fn name(&self) -> &str {
        "counting"
    }

    fn advance(
        &mut self,
        _config: &PhysicsConfig,
        _grid: &Grid,
        _state: &mut StateArray,
        _dt: f64,
    ) -> Result<(), String> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Writes `value` into `variable` of the first interior cell.
#[derive(Clone, Copy, Debug)]
pub struct CorruptingIntegrator {
    pub variable: Variable,
    pub value: f64,
}

impl CorruptingIntegrator {
    pub fn new(variable: Variable, value: f64) -> Self {
        Self { variable, value }
    }
}

impl Integrator for CorruptingIntegrator {
    fn name(&self) -> &str {
        "corrupting"
    }

    fn advance(
        &mut self,
        _config: &PhysicsConfig,
        grid: &Grid,
        state: &mut StateArray,
        _dt: f64,
    ) -> Result<(), String> {
        let cell = grid
            .interior_cells()
            .next()
            .ok_or_else(|| "grid has no interior cells".to_string())?;
        state.set(self.variable, cell, self.value);
        Ok(())
    }
}

/// Succeeds `succeed_count` times, then fails on every call.
#[derive(Debug)]
pub struct FailingIntegrator {
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingIntegrator {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `advance()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Integrator for FailingIntegrator {
    fn name(&self) -> &str {
        "failing"
    }

    fn advance(
        &mut self,
        _config: &PhysicsConfig,
        _grid: &Grid,
        _state: &mut StateArray,
        _dt: f64,
    ) -> Result<(), String> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(format!(
                "deliberate failure after {} successful calls",
                self.succeed_count
            ));
        }
        Ok(())
    }
}
