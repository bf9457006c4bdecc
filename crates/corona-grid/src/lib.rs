//! Mesh metadata, boundary regions and per-cell state storage.
//!
//! A [`Grid`] describes the process-local partition of a logically
//! rectangular mesh in one of the supported geometries: axis extents,
//! ghost width, cell centres and finite-volume cell measures. Hooks read it
//! but never own or reshape it. [`StateArray`] holds the primitive state of
//! every local cell and [`BoundaryRegion`] names the ghost box a boundary
//! hook is allowed to write.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod axis;
pub mod error;
pub mod grid;
pub mod partition;
pub mod region;
pub mod state_array;

pub use axis::AxisSpec;
pub use error::GridError;
pub use grid::Grid;
pub use partition::Partition;
pub use region::BoundaryRegion;
pub use state_array::StateArray;
