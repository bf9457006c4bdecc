//! Problem-definition hooks for Corona simulations.
//!
//! A problem definition is one type implementing [`Problem`]. The engine
//! instantiates it once, hands it the validated configuration, and drives
//! its hooks: [`init`](Problem::init) per cell,
//! [`init_domain`](Problem::init_domain) once,
//! [`user_def_boundary`](Problem::user_def_boundary) per declared side per
//! step, and [`analysis`](Problem::analysis) after each step.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod context;
pub mod problem;

pub use boundary::{BoundaryFill, BoundaryView};
pub use context::HookContext;
pub use problem::Problem;
