//! Closed enumerations of numerical and physical switches.

use serde::{Deserialize, Serialize};

/// Source of the gravitational body force.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyForce {
    /// No body force.
    #[default]
    None,
    /// Acceleration vector supplied per position.
    #[serde(alias = "vector")]
    ConstantGravity,
    /// Gravitational potential supplied per position.
    Potential,
}

/// Spatial reconstruction scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Reconstruction {
    /// Piecewise constant (first order).
    #[serde(alias = "piecewise-constant")]
    Flat,
    /// Piecewise linear with slope limiting.
    #[default]
    #[serde(alias = "piecewise-linear")]
    Linear,
    /// Third-order limited reconstruction.
    LimO3,
    /// Third-order WENO.
    Weno3,
    /// Piecewise parabolic (PPM).
    Parabolic,
    /// Fifth-order WENO-Z.
    WenoZ,
}

impl Reconstruction {
    /// Ghost cells the stencil needs on each side.
    pub fn required_ghosts(self) -> usize {
        match self {
            Self::Flat => 1,
            Self::Linear | Self::LimO3 | Self::Weno3 => 2,
            Self::Parabolic | Self::WenoZ => 3,
        }
    }
}

/// Time integration scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeStepping {
    /// Forward Euler.
    Euler,
    /// Second-order Runge–Kutta.
    #[default]
    Rk2,
    /// Third-order Runge–Kutta.
    Rk3,
    /// Single-step characteristic tracing.
    CharacteristicTracing,
}

/// Optically thin cooling model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cooling {
    /// No cooling.
    #[default]
    None,
    /// Bremsstrahlung-like power law.
    PowerLaw,
    /// Tabulated cooling function.
    Tabulated,
}

/// Treatment of a diffusive (parabolic) term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParabolicTerm {
    /// Term disabled.
    #[default]
    No,
    /// Explicit integration.
    Explicit,
    /// Super-time-stepping.
    SuperTimeStepping,
}

impl ParabolicTerm {
    /// Whether the term is active.
    pub fn is_enabled(self) -> bool {
        self != Self::No
    }
}
