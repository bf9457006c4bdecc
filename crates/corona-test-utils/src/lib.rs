//! Test fixtures and reference configurations for Corona development.
//!
//! [`fixtures`] holds problems and integrators with observable or
//! deliberately broken behaviour; [`configs`] builds the small validated
//! configurations the engine and problem tests share.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod configs;
pub mod fixtures;

pub use configs::{cartesian_hydro_config, cartesian_mhd_config, spherical_mhd_config};
pub use fixtures::{
    CorruptingIntegrator, CountingIntegrator, FailingIntegrator, FailingProblem, FailureMode,
    HookCounts, HookEvent, Recording, UniformProblem, ZeroGradient,
};
