//! Disk initial condition.
//!
//! Two constant states split by a threshold on the first coordinate.
//! Positions with `x1 < radius` take the interior state; every other
//! position, including `x1 == radius` exactly, takes the exterior state.
//! The strict comparison fixes which side a point on the threshold falls
//! on regardless of roundoff in the cell centre that produced it.
//! Velocities and magnetic field are zero everywhere.
//!
//! Constructed via the builder pattern: [`DiskProblem::builder`].

use corona_config::PhysicsConfig;
use corona_core::{Position, PrimitiveState, Variable};
use corona_problem::Problem;

/// Interior/exterior disk initializer. All other hooks are no-ops.
///
/// # Examples
///
/// ```
/// use corona_config::PhysicsConfig;
/// use corona_core::{DivergenceControl, EquationSystem, Geometry, Position, Variable};
/// use corona_grid::AxisSpec;
/// use corona_problem::Problem;
/// use corona_problems::DiskProblem;
///
/// let cfg = PhysicsConfig::builder(EquationSystem::Mhd, Geometry::Spherical)
///     .axis(AxisSpec::new(0.0, 2.0, 100))
///     .divergence_control(DivergenceControl::EightWave)
///     .build();
/// let disk = DiskProblem::default();
/// let inside = disk.init(&cfg, &Position::new(0.5, 0.0, 0.0));
/// assert_eq!(inside.get(Variable::Rho), Some(10.0));
/// let edge = disk.init(&cfg, &Position::new(1.0, 0.0, 0.0));
/// assert_eq!(edge.get(Variable::Rho), Some(1.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DiskProblem {
    radius: f64,
    interior: (f64, f64),
    exterior: (f64, f64),
}

/// Builder for [`DiskProblem`].
#[derive(Clone, Debug)]
pub struct DiskProblemBuilder {
    radius: f64,
    interior: (f64, f64),
    exterior: (f64, f64),
}

impl Default for DiskProblem {
    fn default() -> Self {
        Self {
            radius: 1.0,
            interior: (10.0, 30.0),
            exterior: (1.0, 1.0),
        }
    }
}

impl DiskProblem {
    /// Create a builder starting from the reference parameters.
    pub fn builder() -> DiskProblemBuilder {
        let d = Self::default();
        DiskProblemBuilder {
            radius: d.radius,
            interior: d.interior,
            exterior: d.exterior,
        }
    }

    /// Threshold on `x1`.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Interior `(density, pressure)`.
    pub fn interior(&self) -> (f64, f64) {
        self.interior
    }

    /// Exterior `(density, pressure)`.
    pub fn exterior(&self) -> (f64, f64) {
        self.exterior
    }
}

impl DiskProblemBuilder {
    /// Threshold on the first coordinate (default: 1.0).
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Interior density and pressure (default: 10.0, 30.0).
    pub fn interior(mut self, rho: f64, prs: f64) -> Self {
        self.interior = (rho, prs);
        self
    }

    /// Exterior density and pressure (default: 1.0, 1.0).
    pub fn exterior(mut self, rho: f64, prs: f64) -> Self {
        self.exterior = (rho, prs);
        self
    }

    /// Build the problem.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the radius is not finite or any density or
    /// pressure is not finite and positive.
    pub fn build(self) -> Result<DiskProblem, String> {
        if !self.radius.is_finite() {
            return Err(format!("radius must be finite, got {}", self.radius));
        }
        for (region, (rho, prs)) in [("interior", self.interior), ("exterior", self.exterior)] {
            if !(rho.is_finite() && rho > 0.0 && prs.is_finite() && prs > 0.0) {
                return Err(format!(
                    "{region} density and pressure must be finite and positive, got ({rho}, {prs})"
                ));
            }
        }
        Ok(DiskProblem {
            radius: self.radius,
            interior: self.interior,
            exterior: self.exterior,
        })
    }
}

impl Problem for DiskProblem {
    fn name(&self) -> &str {
        "disk"
    }

    fn init(&self, config: &PhysicsConfig, position: &Position) -> PrimitiveState {
        let (rho, prs) = if position.x1 < self.radius {
            self.interior
        } else {
            self.exterior
        };
        PrimitiveState::zeroed(config.layout())
            .with(Variable::Rho, rho)
            .with(Variable::Prs, prs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corona_core::{DivergenceControl, Eos, EquationSystem, Geometry};
    use corona_grid::AxisSpec;
    use proptest::prelude::*;

    fn mhd_config() -> PhysicsConfig {
        PhysicsConfig::builder(EquationSystem::Mhd, Geometry::Spherical)
            .axis(AxisSpec::new(0.0, 2.0, 100))
            .components(3)
            .divergence_control(DivergenceControl::DivCleaning)
            .build()
    }

    fn assert_at_rest(state: &PrimitiveState) {
        for axis in 0..3 {
            if let Some(v) = Variable::velocity(axis) {
                assert_eq!(state.get(v), Some(0.0));
            }
            if let Some(b) = Variable::magnetic(axis) {
                assert_eq!(state.get(b), Some(0.0));
            }
        }
    }

    #[test]
    fn threshold_point_is_exterior() {
        let cfg = mhd_config();
        let s = DiskProblem::default().init(&cfg, &Position::new(1.0, 0.3, 2.0));
        assert_eq!(s.get(Variable::Rho), Some(1.0));
        assert_eq!(s.get(Variable::Prs), Some(1.0));
        assert_at_rest(&s);
    }

    #[test]
    fn isothermal_layout_has_no_pressure() {
        let mut cfg = mhd_config();
        cfg.physics.eos = Eos::Isothermal;
        let s = DiskProblem::default().init(&cfg, &Position::new(0.5, 0.0, 0.0));
        assert_eq!(s.get(Variable::Rho), Some(10.0));
        assert_eq!(s.get(Variable::Prs), None);
        assert_eq!(s.values().len(), cfg.layout().len());
    }

    #[test]
    fn builder_rejects_nonpositive_state() {
        assert!(DiskProblem::builder().interior(0.0, 1.0).build().is_err());
        assert!(DiskProblem::builder().exterior(1.0, f64::NAN).build().is_err());
        assert!(DiskProblem::builder().radius(f64::INFINITY).build().is_err());
        let d = DiskProblem::builder().radius(0.25).build().unwrap();
        assert_eq!(d.radius(), 0.25);
        assert_eq!(d.interior(), (10.0, 30.0));
    }

    proptest! {
        #[test]
        fn init_policy_holds(x1 in -5.0f64..5.0, x2 in -5.0f64..5.0, x3 in -5.0f64..5.0) {
            let cfg = mhd_config();
            let s = DiskProblem::default().init(&cfg, &Position::new(x1, x2, x3));
            let (rho, prs) = if x1 < 1.0 { (10.0, 30.0) } else { (1.0, 1.0) };
            prop_assert_eq!(s.get(Variable::Rho), Some(rho));
            prop_assert_eq!(s.get(Variable::Prs), Some(prs));
            for axis in 0..3 {
                prop_assert_eq!(s.get(Variable::velocity(axis).unwrap()), Some(0.0));
            }
        }

        #[test]
        fn init_is_bit_identical_on_repeat(x1 in -5.0f64..5.0) {
            let cfg = mhd_config();
            let disk = DiskProblem::default();
            let at = Position::new(x1, 0.0, 0.0);
            let a = disk.init(&cfg, &at);
            let b = disk.init(&cfg, &at);
            prop_assert_eq!(
                a.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
                b.values().iter().map(|v| v.to_bits()).collect::<Vec<_>>()
            );
        }
    }
}
