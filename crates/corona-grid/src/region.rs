//! Ghost-cell boxes handed to boundary hooks.

use std::ops::Range;

use corona_core::{CellIndex, Side};

use crate::grid::box_cells;

/// One contiguous box of local cells on one side of the domain.
///
/// Allocated by the engine; a boundary hook may write only the cells it
/// [`contains`](Self::contains).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryRegion {
    side: Side,
    ranges: [Range<usize>; 3],
}

impl BoundaryRegion {
    /// Construct a region for `side` covering `ranges` (local indices).
    pub fn new(side: Side, ranges: [Range<usize>; 3]) -> Self {
        Self { side, ranges }
    }

    /// The side this region fills.
    pub fn side(&self) -> Side {
        self.side
    }

    /// Local index ranges per axis.
    pub fn ranges(&self) -> &[Range<usize>; 3] {
        &self.ranges
    }

    /// Whether `cell` lies inside the region.
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.ranges[0].contains(&cell.i)
            && self.ranges[1].contains(&cell.j)
            && self.ranges[2].contains(&cell.k)
    }

    /// Number of cells in the region.
    pub fn len(&self) -> usize {
        self.ranges.iter().map(|r| r.len()).product()
    }

    /// Whether the region has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells of the region in flat (i fastest) order.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> {
        box_cells(self.ranges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_match_len_and_contains() {
        let region = BoundaryRegion::new(Side::X2Beg, [0..3, 0..2, 1..2]);
        let cells: Vec<CellIndex> = region.cells().collect();
        assert_eq!(cells.len(), region.len());
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|&c| region.contains(c)));
        assert!(!region.contains(CellIndex::new(0, 2, 1)));
        assert_eq!(cells[0], CellIndex::new(0, 0, 1));
        assert_eq!(cells[1], CellIndex::new(1, 0, 1));
    }

    #[test]
    fn empty_region() {
        let region = BoundaryRegion::new(Side::X1Beg, [0..0, 0..1, 0..1]);
        assert!(region.is_empty());
        assert_eq!(region.cells().count(), 0);
    }
}
