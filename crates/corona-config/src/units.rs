//! Physical-to-code unit scales.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Reference scales mapping physical (cgs) quantities to code units.
///
/// A code value `q` stands for `q * scale` in physical units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitSystem {
    /// Density scale (g/cm³).
    pub density: f64,
    /// Length scale (cm).
    pub length: f64,
    /// Velocity scale (cm/s).
    pub velocity: f64,
}

impl Default for UnitSystem {
    fn default() -> Self {
        Self {
            density: 1.0,
            length: 1.0,
            velocity: 1.0,
        }
    }
}

impl UnitSystem {
    /// Construct from the three base scales.
    pub const fn new(density: f64, length: f64, velocity: f64) -> Self {
        Self {
            density,
            length,
            velocity,
        }
    }

    /// Pressure scale, `ρ₀ v₀²`.
    pub fn pressure(&self) -> f64 {
        self.density * self.velocity * self.velocity
    }

    /// Time scale, `L₀ / v₀`.
    pub fn time(&self) -> f64 {
        self.length / self.velocity
    }

    /// Magnetic field scale (gauss), `v₀ √(4π ρ₀)`.
    pub fn magnetic_field(&self) -> f64 {
        self.velocity * (4.0 * PI * self.density).sqrt()
    }

    /// Specific energy / gravitational potential scale, `v₀²`.
    pub fn potential(&self) -> f64 {
        self.velocity * self.velocity
    }

    /// The first scale that is not finite and positive, as `(name, value)`.
    pub(crate) fn first_invalid(&self) -> Option<(&'static str, f64)> {
        [
            ("density", self.density),
            ("length", self.length),
            ("velocity", self.velocity),
        ]
        .into_iter()
        .find(|&(_, v)| !v.is_finite() || v <= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_scales() {
        let u = UnitSystem::new(1.0e8, 1.0e10, 1.0e10);
        assert_eq!(u.pressure(), 1.0e28);
        assert_eq!(u.time(), 1.0);
        let b = u.magnetic_field();
        assert!((b / (1.0e10 * (4.0 * PI * 1.0e8).sqrt()) - 1.0).abs() < 1e-15);
    }

    #[test]
    fn invalid_scale_detected() {
        let u = UnitSystem::new(1.0, 0.0, 1.0);
        assert_eq!(u.first_invalid(), Some(("length", 0.0)));
        assert_eq!(UnitSystem::default().first_invalid(), None);
    }

    proptest::proptest! {
        #[test]
        fn derived_scales_are_consistent(
            rho in 1e-30f64..1e30,
            len in 1e-10f64..1e20,
            vel in 1e-10f64..1e12,
        ) {
            let u = UnitSystem::new(rho, len, vel);
            proptest::prop_assert!(u.first_invalid().is_none());
            proptest::prop_assert!((u.time() * vel / len - 1.0).abs() < 1e-12);
            proptest::prop_assert!((u.pressure() / (rho * vel * vel) - 1.0).abs() < 1e-12);
            proptest::prop_assert!((u.potential() / u.pressure() * rho - 1.0).abs() < 1e-12);
        }
    }
}
