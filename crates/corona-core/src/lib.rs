//! Core types for Corona MHD problem definitions.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! vocabulary shared by every other crate in the workspace: physics model
//! enums, the primitive variable layout, per-cell [`PrimitiveState`],
//! positions, domain sides, and the hook error types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod physics;
pub mod position;
pub mod state;
pub mod variable;

pub use error::{HookError, InvariantViolation};
pub use physics::{DivergenceControl, Eos, EquationSystem, Geometry};
pub use position::{CellIndex, Position, Side};
pub use state::{check_physical, PrimitiveState};
pub use variable::{Variable, VariableLayout, MAX_TRACERS};
