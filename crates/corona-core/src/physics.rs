//! Physics model switches shared across the workspace.

use serde::{Deserialize, Serialize};

/// Which conservation laws the engine integrates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquationSystem {
    /// Euler equations: density, velocity, pressure.
    #[serde(alias = "hd")]
    Hydrodynamics,
    /// Ideal MHD: the hydrodynamic set plus the magnetic field.
    Mhd,
}

impl EquationSystem {
    /// Whether the magnetic field is part of the state.
    pub fn has_magnetic_field(self) -> bool {
        matches!(self, Self::Mhd)
    }
}

/// Coordinate system of the mesh.
///
/// Coordinate meaning per axis:
///
/// | Geometry    | x1 | x2 | x3 |
/// |-------------|----|----|----|
/// | Cartesian   | x  | y  | z  |
/// | Cylindrical | R  | z  | -  |
/// | Polar       | R  | φ  | z  |
/// | Spherical   | r  | θ  | φ  |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Geometry {
    /// Rectilinear `(x, y, z)`.
    Cartesian,
    /// Axisymmetric `(R, z)`.
    Cylindrical,
    /// `(R, φ, z)`.
    Polar,
    /// `(r, θ, φ)`.
    Spherical,
}

impl Geometry {
    /// Whether the first coordinate is a radius.
    pub fn is_curvilinear(self) -> bool {
        !matches!(self, Self::Cartesian)
    }

    /// Index of the azimuthal axis (0-based), if the geometry has one.
    pub fn azimuthal_axis(self) -> Option<usize> {
        match self {
            Self::Cartesian | Self::Cylindrical => None,
            Self::Polar => Some(1),
            Self::Spherical => Some(2),
        }
    }
}

/// Equation of state closing the system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Eos {
    /// Ideal gas with an energy equation; pressure is a state variable.
    #[default]
    Ideal,
    /// Isothermal gas; pressure follows from density and is not stored.
    Isothermal,
}

/// Strategy the engine uses to keep the magnetic field divergence-free.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DivergenceControl {
    /// No control. Only valid for hydrodynamics.
    #[default]
    None,
    /// Powell's eight-wave source terms.
    EightWave,
    /// Hyperbolic (GLM) divergence cleaning; adds the `PSI_GLM` scalar.
    DivCleaning,
    /// Staggered-field constrained transport.
    ConstrainedTransport,
}
