//! Moment-of-inertia diagnostics.
//!
//! Each observation integrates the diagonal of the inertia tensor over the
//! local interior cells,
//!
//! ```text
//! Ixx = Σ ρ (y² + z²) dV,  Iyy = Σ ρ (x² + z²) dV,  Izz = Σ ρ (x² + y²) dV,
//! ```
//!
//! using Cartesian second moments of each cell centre. Axes that are not
//! resolved (the azimuth of an axisymmetric run, say) are averaged
//! analytically, so a 1-D spherical star has `Ixx = Iyy = Izz`.
//!
//! Ellipticity follows the deformation convention `(Izz − Ixx) / Izz(t₀)`
//! with `Izz(t₀)` from the first recorded sample.

use std::io;

use corona_core::{CellIndex, Geometry, HookError, Variable};
use corona_grid::{Grid, StateArray};
use corona_problem::HookContext;

/// One row of the inertia record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaSample {
    /// Completed steps at measurement.
    pub step: u64,
    /// Simulation time at measurement.
    pub time: f64,
    /// Moment about the x axis.
    pub ixx: f64,
    /// Moment about the y axis.
    pub iyy: f64,
    /// Moment about the z axis.
    pub izz: f64,
}

/// Accumulates [`InertiaSample`]s, one per observation.
///
/// Never mutates simulation state.
#[derive(Clone, Debug, Default)]
pub struct InertiaMonitor {
    samples: Vec<InertiaSample>,
}

impl InertiaMonitor {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Measure `state` and append the sample.
    pub fn observe(
        &mut self,
        ctx: &HookContext<'_>,
        state: &StateArray,
    ) -> Result<InertiaSample, HookError> {
        let [ixx, iyy, izz] = Self::moments(ctx.grid(), state)?;
        let sample = InertiaSample {
            step: ctx.step(),
            time: ctx.time(),
            ixx,
            iyy,
            izz,
        };
        tracing::debug!(
            step = sample.step,
            time = sample.time,
            ixx,
            iyy,
            izz,
            "inertia sample"
        );
        self.samples.push(sample);
        Ok(sample)
    }

    /// Diagonal inertia moments `[Ixx, Iyy, Izz]` of the local interior.
    pub fn moments(grid: &Grid, state: &StateArray) -> Result<[f64; 3], HookError> {
        let rho = state
            .variable(Variable::Rho)
            .ok_or_else(|| HookError::failed("state has no density"))?;
        let mut total = [0.0; 3];
        for cell in grid.interior_cells() {
            let mass = rho[grid.flat(cell)] * grid.volume(cell);
            let [x2, y2, z2] = second_moments(grid, cell);
            total[0] += mass * (y2 + z2);
            total[1] += mass * (x2 + z2);
            total[2] += mass * (x2 + y2);
        }
        Ok(total)
    }

    /// Recorded samples, oldest first.
    pub fn samples(&self) -> &[InertiaSample] {
        &self.samples
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<&InertiaSample> {
        self.samples.last()
    }

    /// `(Izz − Ixx) / Izz(t₀)`; `None` before the first sample or when
    /// `Izz(t₀)` is zero.
    pub fn ellipticity(&self, sample: &InertiaSample) -> Option<f64> {
        let izz0 = self.samples.first()?.izz;
        (izz0 != 0.0).then(|| (sample.izz - sample.ixx) / izz0)
    }

    /// Each moment divided by its first recorded value.
    pub fn normalized(&self, sample: &InertiaSample) -> Option<[f64; 3]> {
        let first = self.samples.first()?;
        if first.ixx == 0.0 || first.iyy == 0.0 || first.izz == 0.0 {
            return None;
        }
        Some([
            sample.ixx / first.ixx,
            sample.iyy / first.iyy,
            sample.izz / first.izz,
        ])
    }

    /// Write the record as a whitespace-delimited table with header
    /// `t Ixx Iyy Izz ellip`.
    pub fn write_table<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "t Ixx Iyy Izz ellip")?;
        for s in &self.samples {
            let ellip = self.ellipticity(s).unwrap_or(f64::NAN);
            writeln!(
                out,
                "{:.6} {:.8e} {:.8e} {:.8e} {:.8e}",
                s.time, s.ixx, s.iyy, s.izz, ellip
            )?;
        }
        Ok(())
    }
}

/// Mean `[x², y², z²]` over the unresolved directions of `cell`.
fn second_moments(grid: &Grid, cell: CellIndex) -> [f64; 3] {
    let p = grid.position(cell);
    let dims = grid.dimensions();
    match grid.geometry() {
        Geometry::Cartesian => [p.x1 * p.x1, p.x2 * p.x2, p.x3 * p.x3],
        Geometry::Cylindrical => {
            let ring = 0.5 * p.x1 * p.x1;
            [ring, ring, p.x2 * p.x2]
        }
        Geometry::Polar => {
            let r2 = p.x1 * p.x1;
            let z2 = p.x3 * p.x3;
            if dims >= 2 {
                let (s, c) = p.x2.sin_cos();
                [r2 * c * c, r2 * s * s, z2]
            } else {
                [0.5 * r2, 0.5 * r2, z2]
            }
        }
        Geometry::Spherical => {
            let r2 = p.x1 * p.x1;
            match dims {
                1 => [r2 / 3.0; 3],
                2 => {
                    let (s, c) = p.x2.sin_cos();
                    let cyl = 0.5 * r2 * s * s;
                    [cyl, cyl, r2 * c * c]
                }
                _ => {
                    let [x, y, z] = p.to_cartesian(Geometry::Spherical);
                    [x * x, y * y, z * z]
                }
            }
        }
    }
}
