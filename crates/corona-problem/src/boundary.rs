//! Region-restricted state access for boundary hooks.

use corona_core::{CellIndex, HookError, PrimitiveState, Side, Variable};
use corona_grid::{BoundaryRegion, StateArray};

/// Outcome of a boundary hook call for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundaryFill {
    /// The hook wrote every cell of the region.
    Written,
    /// The hook does not treat this side. Ghost values are retained.
    Untouched,
}

/// State access for one boundary hook call.
///
/// Reads are allowed anywhere in the local array so interior values can be
/// reflected or extrapolated. Writes are allowed only inside the region;
/// anything else returns [`HookError::OutsideRegion`] and leaves the state
/// unchanged.
#[derive(Debug)]
pub struct BoundaryView<'a> {
    state: &'a mut StateArray,
    region: &'a BoundaryRegion,
    writes: usize,
}

impl<'a> BoundaryView<'a> {
    /// Wrap `state` for writes into `region`.
    pub fn new(state: &'a mut StateArray, region: &'a BoundaryRegion) -> Self {
        Self {
            state,
            region,
            writes: 0,
        }
    }

    /// Side being filled.
    pub fn side(&self) -> Side {
        self.region.side()
    }

    /// Target ghost region.
    pub fn region(&self) -> &BoundaryRegion {
        self.region
    }

    /// Cells of the region in flat order.
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> {
        self.region.cells()
    }

    /// Read-only view of the whole local array.
    pub fn array(&self) -> &StateArray {
        self.state
    }

    /// Full state of any local cell.
    pub fn state(&self, cell: CellIndex) -> PrimitiveState {
        self.state.state(cell)
    }

    /// One variable of any local cell.
    pub fn get(&self, var: Variable, cell: CellIndex) -> Option<f64> {
        self.state.get(var, cell)
    }

    /// Write one variable of a region cell.
    pub fn set(&mut self, var: Variable, cell: CellIndex, value: f64) -> Result<(), HookError> {
        self.check(cell)?;
        self.state.set(var, cell, value);
        self.writes += 1;
        Ok(())
    }

    /// Write the full state of a region cell.
    pub fn set_state(&mut self, cell: CellIndex, state: &PrimitiveState) -> Result<(), HookError> {
        self.check(cell)?;
        self.state.set_state(cell, state);
        self.writes += 1;
        Ok(())
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn check(&self, cell: CellIndex) -> Result<(), HookError> {
        if self.region.contains(cell) {
            Ok(())
        } else {
            Err(HookError::OutsideRegion {
                cell,
                side: self.region.side(),
            })
        }
    }
}
