//! Validated physics and numerics configuration for Corona problems.
//!
//! [`PhysicsConfig`] is the configuration table an engine reads before a
//! run: equation system, dimensionality, geometry, numerical scheme,
//! divergence control, unit scales, grid axes and boundary declarations.
//! It is built once (in code, from TOML, or from a `#define` switch table),
//! checked with [`validate()`](PhysicsConfig::validate), and never mutated
//! afterwards.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod definitions;
pub mod error;
pub mod load;
pub mod switches;
pub mod units;

pub use config::{
    BoundarySection, GridSection, ModuleSection, NumericsSection, OutputSection, PhysicsConfig,
    PhysicsConfigBuilder, PhysicsSection,
};
pub use definitions::SwitchTable;
pub use error::ConfigError;
pub use switches::{BodyForce, Cooling, ParabolicTerm, Reconstruction, TimeStepping};
pub use units::UnitSystem;
