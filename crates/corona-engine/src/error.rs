//! Engine errors.

use std::fmt;

use corona_config::ConfigError;
use corona_core::{HookError, InvariantViolation, Side};
use corona_grid::GridError;

/// Lifecycle point at which a failure was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Post-setup check after `init` and `init_domain`.
    Setup,
    /// The `init_domain` hook.
    InitDomain,
    /// The boundary hook for one side.
    Boundary(Side),
    /// The integrator's advance.
    Integration,
    /// The `analysis` hook.
    Analysis,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => f.write_str("setup"),
            Self::InitDomain => f.write_str("init_domain"),
            Self::Boundary(side) => write!(f, "boundary {side}"),
            Self::Integration => f.write_str("integration"),
            Self::Analysis => f.write_str("analysis"),
        }
    }
}

/// Errors from building or stepping a [`Simulation`](crate::Simulation).
///
/// Every variant is fatal for the run; the engine never retries.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configuration was rejected before any hook ran.
    #[error("configuration rejected: {0}")]
    Config(#[from] ConfigError),
    /// The local grid could not be built.
    #[error("grid construction failed: {0}")]
    Grid(#[from] GridError),
    /// A cell holds an unphysical state.
    #[error("unphysical state after {stage}: {source}")]
    Invariant {
        /// Where it was detected.
        stage: Stage,
        /// The violation.
        #[source]
        source: InvariantViolation,
    },
    /// A hook returned an error.
    #[error("{stage} hook failed: {source}")]
    Hook {
        /// Which hook.
        stage: Stage,
        /// The hook's error.
        #[source]
        source: HookError,
    },
    /// The integrator failed.
    #[error("integrator '{name}' failed: {reason}")]
    Integrator {
        /// Integrator name.
        name: String,
        /// Integrator-supplied reason.
        reason: String,
    },
    /// The time step is not finite and positive.
    #[error("time step must be finite and positive, got {dt}")]
    InvalidDt {
        /// The rejected step.
        dt: f64,
    },
    /// The builder lacks a required component.
    #[error("simulation builder is missing a {0}")]
    MissingComponent(&'static str),
}

impl EngineError {
    pub(crate) fn hook(stage: Stage) -> impl FnOnce(HookError) -> Self {
        move |source| match source {
            HookError::Invariant(v) => Self::Invariant { stage, source: v },
            other => Self::Hook {
                stage,
                source: other,
            },
        }
    }

    pub(crate) fn invariant(stage: Stage) -> impl FnOnce(InvariantViolation) -> Self {
        move |source| Self::Invariant { stage, source }
    }
}
