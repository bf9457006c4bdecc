//! Per-axis extents and resolution.

use serde::{Deserialize, Serialize};

/// Extent and resolution of one coordinate direction.
///
/// Cells are uniformly spaced: `spacing = (max - min) / resolution`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AxisSpec {
    /// Lower domain bound.
    pub min: f64,
    /// Upper domain bound. Must exceed `min`.
    pub max: f64,
    /// Number of interior cells. Must be positive.
    pub resolution: usize,
}

impl AxisSpec {
    /// Construct an axis specification.
    pub const fn new(min: f64, max: f64, resolution: usize) -> Self {
        Self {
            min,
            max,
            resolution,
        }
    }

    /// Uniform cell width.
    pub fn spacing(&self) -> f64 {
        (self.max - self.min) / self.resolution as f64
    }

    /// Centre of the cell with signed global index `g`.
    ///
    /// Interior cells have `0 <= g < resolution`; ghosts lie outside.
    pub fn center(&self, g: isize) -> f64 {
        self.min + (g as f64 + 0.5) * self.spacing()
    }

    /// Lower and upper faces of the cell with signed global index `g`.
    pub fn faces(&self, g: isize) -> (f64, f64) {
        let dx = self.spacing();
        let lo = self.min + g as f64 * dx;
        (lo, lo + dx)
    }

    /// Whether the bounds are finite and ordered and the resolution positive.
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max && self.resolution > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centres_are_midpoints() {
        let a = AxisSpec::new(0.0, 2.0, 100);
        assert!((a.spacing() - 0.02).abs() < 1e-15);
        assert!((a.center(0) - 0.01).abs() < 1e-15);
        assert!((a.center(99) - 1.99).abs() < 1e-12);
        assert!((a.center(-1) + 0.01).abs() < 1e-15);
    }

    #[test]
    fn faces_bracket_centre() {
        let a = AxisSpec::new(-1.0, 1.0, 8);
        let (lo, hi) = a.faces(3);
        assert!(lo < a.center(3) && a.center(3) < hi);
        assert!((hi - lo - a.spacing()).abs() < 1e-15);
    }

    #[test]
    fn malformed_axes() {
        assert!(!AxisSpec::new(1.0, 1.0, 4).is_well_formed());
        assert!(!AxisSpec::new(0.0, 1.0, 0).is_well_formed());
        assert!(!AxisSpec::new(0.0, f64::INFINITY, 4).is_well_formed());
        assert!(AxisSpec::new(0.0, 1.0, 1).is_well_formed());
    }
}
