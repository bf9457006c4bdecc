//! Positions, cell indices, and domain sides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::physics::Geometry;

/// A read-only coordinate triple in the configured geometry.
///
/// Supplied per cell by the engine; hooks never store it. Coordinates of
/// inactive dimensions are `0.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    /// First coordinate (x, R or r).
    pub x1: f64,
    /// Second coordinate (y, z, φ or θ).
    pub x2: f64,
    /// Third coordinate (z or φ).
    pub x3: f64,
}

impl Position {
    /// Construct from three coordinates.
    pub const fn new(x1: f64, x2: f64, x3: f64) -> Self {
        Self { x1, x2, x3 }
    }

    /// Coordinates as an array.
    pub fn coords(&self) -> [f64; 3] {
        [self.x1, self.x2, self.x3]
    }

    /// Convert to Cartesian `(x, y, z)`.
    ///
    /// Cylindrical positions sit in the `φ = 0` half-plane, so `y = 0`.
    pub fn to_cartesian(&self, geometry: Geometry) -> [f64; 3] {
        match geometry {
            Geometry::Cartesian => self.coords(),
            Geometry::Cylindrical => [self.x1, 0.0, self.x2],
            Geometry::Polar => {
                let (s, c) = self.x2.sin_cos();
                [self.x1 * c, self.x1 * s, self.x3]
            }
            Geometry::Spherical => {
                let (st, ct) = self.x2.sin_cos();
                let (sp, cp) = self.x3.sin_cos();
                [self.x1 * st * cp, self.x1 * st * sp, self.x1 * ct]
            }
        }
    }
}

impl From<[f64; 3]> for Position {
    fn from(c: [f64; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

/// Index of a cell in a process-local mesh array, ghosts included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    /// Index along x1.
    pub i: usize,
    /// Index along x2.
    pub j: usize,
    /// Index along x3.
    pub k: usize,
}

impl CellIndex {
    /// Construct from three indices.
    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    /// Index along `axis` (0-based). Panics if `axis >= 3`.
    pub fn along(&self, axis: usize) -> usize {
        [self.i, self.j, self.k][axis]
    }

    /// Copy with the index along `axis` replaced.
    pub fn with(mut self, axis: usize, value: usize) -> Self {
        match axis {
            0 => self.i = value,
            1 => self.j = value,
            _ => self.k = value,
        }
        self
    }
}

impl fmt::Display for CellIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

/// A domain face whose ghost cells a boundary hook fills, or the internal
/// boundary covering the local interior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Side {
    /// Lower x1 face.
    X1Beg,
    /// Upper x1 face.
    X1End,
    /// Lower x2 face.
    X2Beg,
    /// Upper x2 face.
    X2End,
    /// Lower x3 face.
    X3Beg,
    /// Upper x3 face.
    X3End,
    /// Internal boundary: any interior cell may be overwritten.
    Internal,
}

impl Side {
    /// The six faces in canonical order.
    pub const ALL_FACES: [Side; 6] = [
        Side::X1Beg,
        Side::X1End,
        Side::X2Beg,
        Side::X2End,
        Side::X3Beg,
        Side::X3End,
    ];

    /// Axis normal to the face (0-based), `None` for [`Side::Internal`].
    pub fn axis(self) -> Option<usize> {
        match self {
            Self::X1Beg | Self::X1End => Some(0),
            Self::X2Beg | Self::X2End => Some(1),
            Self::X3Beg | Self::X3End => Some(2),
            Self::Internal => None,
        }
    }

    /// Whether the face is at the lower end of its axis.
    pub fn is_begin(self) -> bool {
        matches!(self, Self::X1Beg | Self::X2Beg | Self::X3Beg)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X1Beg => "X1_BEG",
            Self::X1End => "X1_END",
            Self::X2Beg => "X2_BEG",
            Self::X2End => "X2_END",
            Self::X3Beg => "X3_BEG",
            Self::X3End => "X3_END",
            Self::Internal => "INTERNAL",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn spherical_equator_maps_to_x_axis() {
        let p = Position::new(2.0, FRAC_PI_2, 0.0);
        let [x, y, z] = p.to_cartesian(Geometry::Spherical);
        assert!((x - 2.0).abs() < 1e-12);
        assert!(y.abs() < 1e-12);
        assert!(z.abs() < 1e-12);
    }

    #[test]
    fn cylindrical_second_coordinate_is_height() {
        let p = Position::new(1.5, -3.0, 0.0);
        assert_eq!(p.to_cartesian(Geometry::Cylindrical), [1.5, 0.0, -3.0]);
    }

    #[test]
    fn side_axes() {
        assert_eq!(Side::X2End.axis(), Some(1));
        assert_eq!(Side::Internal.axis(), None);
        assert!(Side::X3Beg.is_begin());
        assert!(!Side::X1End.is_begin());
    }

    #[test]
    fn cell_index_with_replaces_one_axis() {
        let c = CellIndex::new(1, 2, 3).with(1, 7);
        assert_eq!(c, CellIndex::new(1, 7, 3));
        assert_eq!(c.along(2), 3);
    }
}
