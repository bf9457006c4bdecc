//! Reference host driving Corona problem hooks.
//!
//! [`Simulation`] owns the configuration, the local grid, the state array
//! and one [`Problem`](corona_problem::Problem). It validates everything
//! before any hook runs, performs setup (`init` per cell, `init_domain`,
//! an invariant check, `analysis` at step 0), and then steps: user
//! boundaries, the [`Integrator`], an invariant check, and `analysis`.
//!
//! The numerical scheme itself lives behind [`Integrator`]; [`Frozen`]
//! leaves the state unchanged and is enough to exercise every hook.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod integrator;
pub mod report;
pub mod simulation;

pub use error::{EngineError, Stage};
pub use integrator::{Frozen, Integrator};
pub use report::{Clock, StepReport};
pub use simulation::{Simulation, SimulationBuilder};
