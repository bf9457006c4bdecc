//! The [`Problem`] trait.

use corona_config::PhysicsConfig;
use corona_core::{HookError, Position, PrimitiveState};
use corona_grid::StateArray;

use crate::boundary::{BoundaryFill, BoundaryView};
use crate::context::HookContext;

/// A physical problem: the hooks an engine calls to set up and observe a run.
///
/// # Contract
///
/// - [`init`](Self::init) MUST be pure: the same configuration and position
///   produce bit-identical states regardless of call order, repetition or
///   thread. The engine may call it concurrently (hence `Sync`).
/// - [`init_domain`](Self::init_domain) runs once, after every `init`.
/// - [`user_def_boundary`](Self::user_def_boundary) runs once per step per
///   declared side and may write only inside the view's region.
/// - [`analysis`](Self::analysis) observes the finalized state after each
///   step; it may update the problem's own records but never the state.
/// - Hooks never block, retry, or hold locks. Failures are returned.
///
/// Every hook except `name` and `init` defaults to a no-op.
///
/// # Examples
///
/// ```
/// use corona_config::PhysicsConfig;
/// use corona_core::{Position, PrimitiveState, Variable};
/// use corona_problem::Problem;
///
/// struct Uniform;
///
/// impl Problem for Uniform {
///     fn name(&self) -> &str { "uniform" }
///
///     fn init(&self, config: &PhysicsConfig, _at: &Position) -> PrimitiveState {
///         PrimitiveState::zeroed(config.layout())
///             .with(Variable::Rho, 1.0)
///             .with(Variable::Prs, 1.0)
///     }
/// }
///
/// assert_eq!(Uniform.name(), "uniform");
/// ```
pub trait Problem: Send + Sync + 'static {
    /// Human-readable name for errors and logs.
    fn name(&self) -> &str;

    /// Reject configurations this problem cannot run with.
    ///
    /// Called after [`PhysicsConfig::validate`] and before any other hook.
    fn check_config(&self, _config: &PhysicsConfig) -> Result<(), String> {
        Ok(())
    }

    /// Primitive state at `position`.
    fn init(&self, config: &PhysicsConfig, position: &Position) -> PrimitiveState;

    /// Overwrite any local cell after all `init` calls.
    fn init_domain(&self, _ctx: &HookContext<'_>, _state: &mut StateArray) -> Result<(), HookError> {
        Ok(())
    }

    /// Fill the ghost cells of one side (or the interior for
    /// [`Side::Internal`](corona_core::Side::Internal)).
    fn user_def_boundary(
        &self,
        _ctx: &HookContext<'_>,
        _view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        Ok(BoundaryFill::Untouched)
    }

    /// Measure the state after a completed step (and once after setup).
    fn analysis(&mut self, _ctx: &HookContext<'_>, _state: &StateArray) -> Result<(), HookError> {
        Ok(())
    }

    /// Gravitational potential at `position`, when the body force is a
    /// potential.
    fn body_force_potential(&self, _config: &PhysicsConfig, _position: &Position) -> Option<f64> {
        None
    }

    /// Body-force acceleration at `position`, when the body force is a vector.
    fn body_force_vector(&self, _config: &PhysicsConfig, _position: &Position) -> Option<[f64; 3]> {
        None
    }
}

impl<P: Problem + ?Sized> Problem for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn check_config(&self, config: &PhysicsConfig) -> Result<(), String> {
        (**self).check_config(config)
    }

    fn init(&self, config: &PhysicsConfig, position: &Position) -> PrimitiveState {
        (**self).init(config, position)
    }

    fn init_domain(&self, ctx: &HookContext<'_>, state: &mut StateArray) -> Result<(), HookError> {
        (**self).init_domain(ctx, state)
    }

    fn user_def_boundary(
        &self,
        ctx: &HookContext<'_>,
        view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        (**self).user_def_boundary(ctx, view)
    }

    fn analysis(&mut self, ctx: &HookContext<'_>, state: &StateArray) -> Result<(), HookError> {
        (**self).analysis(ctx, state)
    }

    fn body_force_potential(&self, config: &PhysicsConfig, position: &Position) -> Option<f64> {
        (**self).body_force_potential(config, position)
    }

    fn body_force_vector(&self, config: &PhysicsConfig, position: &Position) -> Option<[f64; 3]> {
        (**self).body_force_vector(config, position)
    }
}
