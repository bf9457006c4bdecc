//! Reference problem definitions for Corona simulations.
//!
//! - [`DiskProblem`]: a dense, high-pressure region inside a radius
//!   threshold on the first coordinate, ambient gas outside.
//! - [`MagnetarProblem`]: an n = 1 polytropic neutron star threaded by a
//!   mixed poloidal–toroidal field, with potential gravity and custom
//!   radial and polar-axis boundaries.
//! - [`DensityPerturbation`]: wraps any problem and adds seeded,
//!   mass-preserving density noise in `init_domain`.
//! - [`InertiaMonitor`]: records the principal moments of inertia and
//!   the ellipticity they imply.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod disk;
pub mod inertia;
pub mod magnetar;
pub mod perturbation;

pub use disk::{DiskProblem, DiskProblemBuilder};
pub use inertia::{InertiaMonitor, InertiaSample};
pub use magnetar::{MagnetarParams, MagnetarProblem};
pub use perturbation::{DensityPerturbation, DensityPerturbationBuilder};
