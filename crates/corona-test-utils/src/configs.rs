//! Small validated configurations.

use corona_config::PhysicsConfig;
use corona_core::{DivergenceControl, EquationSystem, Geometry, Side};
use corona_grid::AxisSpec;

/// One-dimensional spherical MHD on `r ∈ [0, 2]` with 100 cells, three
/// vector components and divergence cleaning. No user sides.
pub fn spherical_mhd_config() -> PhysicsConfig {
    PhysicsConfig::builder(EquationSystem::Mhd, Geometry::Spherical)
        .axis(AxisSpec::new(0.0, 2.0, 100))
        .components(3)
        .divergence_control(DivergenceControl::DivCleaning)
        .build()
}

/// Two-dimensional Cartesian hydro on the unit square.
pub fn cartesian_hydro_config(nx: usize, ny: usize) -> PhysicsConfig {
    PhysicsConfig::builder(EquationSystem::Hydrodynamics, Geometry::Cartesian)
        .axis(AxisSpec::new(0.0, 1.0, nx))
        .axis(AxisSpec::new(0.0, 1.0, ny))
        .build()
}

/// Two-dimensional Cartesian MHD on `[0, 2] × [0, 1]` with eight-wave
/// divergence control and user boundaries on both x1 faces.
pub fn cartesian_mhd_config(nx: usize, ny: usize) -> PhysicsConfig {
    PhysicsConfig::builder(EquationSystem::Mhd, Geometry::Cartesian)
        .axis(AxisSpec::new(0.0, 2.0, nx))
        .axis(AxisSpec::new(0.0, 1.0, ny))
        .divergence_control(DivergenceControl::EightWave)
        .user_side(Side::X1Beg)
        .user_side(Side::X1End)
        .build()
}
