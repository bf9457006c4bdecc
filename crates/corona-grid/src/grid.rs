//! The process-local mesh description handed to every hook.

use std::f64::consts::PI;
use std::ops::Range;

use corona_core::{CellIndex, Geometry, Position, Side};

use crate::axis::AxisSpec;
use crate::error::GridError;
use crate::partition::Partition;
use crate::region::BoundaryRegion;

/// Read-only mesh metadata for the local partition.
///
/// Local arrays include `ghost` cells on both ends of each active axis;
/// inactive axes have exactly one cell. Cell `(i, j, k)` maps to flat index
/// `i + nx * (j + ny * k)`.
///
/// # Examples
///
/// ```
/// use corona_core::{CellIndex, Geometry};
/// use corona_grid::{AxisSpec, Grid};
///
/// let grid = Grid::whole(Geometry::Cartesian, &[AxisSpec::new(0.0, 1.0, 4)], 2).unwrap();
/// assert_eq!(grid.shape(), [8, 1, 1]);
/// assert_eq!(grid.interior_ranges()[0], 2..6);
/// let p = grid.position(CellIndex::new(2, 0, 0));
/// assert!((p.x1 - 0.125).abs() < 1e-15);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    geometry: Geometry,
    axes: [Option<AxisSpec>; 3],
    ghost: usize,
    partition: Partition,
    shape: [usize; 3],
}

impl Grid {
    /// Build the local grid for `partition`.
    ///
    /// `axes` holds one spec per active dimension, in axis order.
    pub fn new(
        geometry: Geometry,
        axes: &[AxisSpec],
        ghost: usize,
        partition: Partition,
    ) -> Result<Self, GridError> {
        if axes.is_empty() || axes.len() > 3 {
            return Err(GridError::AxisCount { count: axes.len() });
        }
        let mut specs = [None; 3];
        let mut shape = [1usize; 3];
        for (axis, spec) in axes.iter().enumerate() {
            if spec.resolution == 0 {
                return Err(GridError::EmptyAxis { axis });
            }
            if !spec.is_well_formed() {
                return Err(GridError::InvalidExtent {
                    axis,
                    min: spec.min,
                    max: spec.max,
                });
            }
            let end = partition.end(axis);
            if partition.count[axis] == 0 || end > spec.resolution {
                return Err(GridError::PartitionOutOfRange {
                    axis,
                    begin: partition.begin[axis],
                    end,
                    resolution: spec.resolution,
                });
            }
            specs[axis] = Some(*spec);
            shape[axis] = partition.count[axis]
                .checked_add(2 * ghost)
                .ok_or(GridError::TooManyCells)?;
        }
        shape
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or(GridError::TooManyCells)?;

        let mut partition = partition;
        for axis in axes.len()..3 {
            partition.begin[axis] = 0;
            partition.count[axis] = 1;
        }
        Ok(Self {
            geometry,
            axes: specs,
            ghost,
            partition,
            shape,
        })
    }

    /// Build a grid that owns the whole domain.
    pub fn whole(geometry: Geometry, axes: &[AxisSpec], ghost: usize) -> Result<Self, GridError> {
        let mut res = [1; 3];
        for (axis, spec) in axes.iter().enumerate().take(3) {
            res[axis] = spec.resolution;
        }
        Self::new(geometry, axes, ghost, Partition::whole(res))
    }

    /// Coordinate system.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Number of active dimensions.
    pub fn dimensions(&self) -> usize {
        self.axes.iter().filter(|a| a.is_some()).count()
    }

    /// Global specification of `axis`, `None` if inactive.
    pub fn axis(&self, axis: usize) -> Option<&AxisSpec> {
        self.axes.get(axis).and_then(|a| a.as_ref())
    }

    /// Ghost cells on each end of an active axis.
    pub fn ghost(&self) -> usize {
        self.ghost
    }

    /// Owned block of the global interior.
    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    /// Local array extent per axis, ghosts included.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Number of local cells, ghosts included.
    pub fn cell_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Number of `f64` values needed to store `variables` per local cell.
    ///
    /// # Errors
    ///
    /// [`GridError::StorageOverflow`] if the total, in values or bytes,
    /// does not fit an allocation.
    pub fn storage_len(&self, variables: usize) -> Result<usize, GridError> {
        let cells = self.cell_count();
        cells
            .checked_mul(variables)
            .filter(|&n| {
                n.checked_mul(std::mem::size_of::<f64>())
                    .is_some_and(|bytes| bytes <= isize::MAX as usize)
            })
            .ok_or(GridError::StorageOverflow { cells, variables })
    }

    /// Flat index of `cell`.
    pub fn flat(&self, cell: CellIndex) -> usize {
        let [nx, ny, _] = self.shape;
        cell.i + nx * (cell.j + ny * cell.k)
    }

    /// Inverse of [`flat`](Self::flat).
    pub fn unflat(&self, index: usize) -> CellIndex {
        let [nx, ny, _] = self.shape;
        CellIndex::new(index % nx, (index / nx) % ny, index / (nx * ny))
    }

    /// Whether `cell` lies inside the local array.
    pub fn contains(&self, cell: CellIndex) -> bool {
        cell.i < self.shape[0] && cell.j < self.shape[1] && cell.k < self.shape[2]
    }

    /// Every local cell in flat order, ghosts included.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..self.cell_count()).map(move |n| self.unflat(n))
    }

    /// Local index ranges of owned (non-ghost) cells.
    pub fn interior_ranges(&self) -> [Range<usize>; 3] {
        std::array::from_fn(|axis| {
            if self.axes[axis].is_some() {
                self.ghost..self.ghost + self.partition.count[axis]
            } else {
                0..1
            }
        })
    }

    /// Owned cells in flat order.
    pub fn interior_cells(&self) -> impl Iterator<Item = CellIndex> {
        box_cells(self.interior_ranges())
    }

    /// Whether `cell` is owned (not a ghost).
    pub fn is_interior(&self, cell: CellIndex) -> bool {
        let r = self.interior_ranges();
        r[0].contains(&cell.i) && r[1].contains(&cell.j) && r[2].contains(&cell.k)
    }

    /// Signed global index of local index `local` along an active `axis`.
    pub fn global_index(&self, axis: usize, local: usize) -> isize {
        self.partition.begin[axis] as isize + local as isize - self.ghost as isize
    }

    /// Coordinate of the cell centre along `axis`.
    ///
    /// An inactive angular axis reports the midpoint of its natural range
    /// (see [`faces`](Self::faces)), so 1D spherical cells sit on the
    /// equator. Other inactive axes report `0.0`.
    pub fn center(&self, axis: usize, local: usize) -> f64 {
        match &self.axes[axis] {
            Some(spec) => spec.center(self.global_index(axis, local)),
            None if self.is_angular(axis) => {
                let (lo, hi) = self.faces(axis, local);
                0.5 * (lo + hi)
            }
            None => 0.0,
        }
    }

    fn is_angular(&self, axis: usize) -> bool {
        (self.geometry == Geometry::Spherical && axis == 1)
            || self.geometry.azimuthal_axis() == Some(axis)
    }

    /// Cell faces along `axis`.
    ///
    /// Inactive axes span their full natural range: `[0, π]` for the
    /// spherical polar angle, `[0, 2π]` for an azimuth, unit width otherwise.
    pub fn faces(&self, axis: usize, local: usize) -> (f64, f64) {
        match &self.axes[axis] {
            Some(spec) => spec.faces(self.global_index(axis, local)),
            None => match (self.geometry, axis) {
                (Geometry::Spherical, 1) => (0.0, PI),
                _ if self.is_angular(axis) => (0.0, 2.0 * PI),
                _ => (0.0, 1.0),
            },
        }
    }

    /// Position of the centre of `cell`.
    pub fn position(&self, cell: CellIndex) -> Position {
        Position::new(
            self.center(0, cell.i),
            self.center(1, cell.j),
            self.center(2, cell.k),
        )
    }

    /// Finite-volume measure of `cell` in the grid geometry.
    ///
    /// Cylindrical cells are full rings around the symmetry axis.
    pub fn volume(&self, cell: CellIndex) -> f64 {
        let (r1, r2) = self.faces(0, cell.i);
        let (a1, a2) = self.faces(1, cell.j);
        let (b1, b2) = self.faces(2, cell.k);
        match self.geometry {
            Geometry::Cartesian => (r2 - r1) * (a2 - a1) * (b2 - b1),
            Geometry::Cylindrical => PI * (r2 * r2 - r1 * r1) * (a2 - a1),
            Geometry::Polar => 0.5 * (r2 * r2 - r1 * r1) * (a2 - a1) * (b2 - b1),
            Geometry::Spherical => {
                (r2.powi(3) - r1.powi(3)) / 3.0 * (a1.cos() - a2.cos()) * (b2 - b1)
            }
        }
    }

    /// Whether `side` is a face of the global domain owned by this
    /// partition. [`Side::Internal`] is always local.
    pub fn is_physical_boundary(&self, side: Side) -> bool {
        let Some(axis) = side.axis() else {
            return true;
        };
        match &self.axes[axis] {
            None => false,
            Some(_) if side.is_begin() => self.partition.begin[axis] == 0,
            Some(spec) => self.partition.end(axis) == spec.resolution,
        }
    }

    /// Ghost box filled for `side`, spanning the full local extent of the
    /// other axes. `None` if the axis is inactive or there are no ghosts.
    ///
    /// [`Side::Internal`] yields the interior box.
    pub fn boundary_region(&self, side: Side) -> Option<BoundaryRegion> {
        let Some(axis) = side.axis() else {
            return Some(BoundaryRegion::new(side, self.interior_ranges()));
        };
        if self.axes[axis].is_none() || self.ghost == 0 {
            return None;
        }
        let mut ranges: [Range<usize>; 3] = std::array::from_fn(|a| 0..self.shape[a]);
        ranges[axis] = if side.is_begin() {
            0..self.ghost
        } else {
            self.shape[axis] - self.ghost..self.shape[axis]
        };
        Some(BoundaryRegion::new(side, ranges))
    }
}

/// Cells of an index box in flat (i fastest) order.
pub(crate) fn box_cells(ranges: [Range<usize>; 3]) -> impl Iterator<Item = CellIndex> {
    let [ri, rj, rk] = ranges;
    rk.flat_map(move |k| {
        let ri = ri.clone();
        rj.clone()
            .flat_map(move |j| ri.clone().map(move |i| CellIndex::new(i, j, k)))
    })
}
