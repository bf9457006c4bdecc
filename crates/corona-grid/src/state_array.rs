//! Per-cell primitive state storage for the local partition.

use corona_core::{check_physical, CellIndex, InvariantViolation, PrimitiveState, Variable, VariableLayout};

use crate::grid::Grid;

/// Primitive state of every local cell, ghosts included.
///
/// Stored variable-major: all densities, then all `VX1`, and so on, each
/// block in the grid's flat cell order. Owned by the engine; hooks receive
/// `&StateArray` or `&mut StateArray` for the duration of one call.
#[derive(Clone, Debug, PartialEq)]
pub struct StateArray {
    layout: VariableLayout,
    shape: [usize; 3],
    cells: usize,
    data: Vec<f64>,
}

impl StateArray {
    /// A zero-filled array shaped like `grid`.
    ///
    /// # Panics
    ///
    /// Panics if [`Grid::storage_len`] rejects the layout; callers building
    /// from untrusted sizes check it first.
    pub fn new(layout: VariableLayout, grid: &Grid) -> Self {
        let cells = grid.cell_count();
        Self {
            layout,
            shape: grid.shape(),
            cells,
            data: vec![0.0; cells * layout.len()],
        }
    }

    /// Fill every cell from `f`, visiting cells in flat order.
    pub fn from_fn(
        layout: VariableLayout,
        grid: &Grid,
        mut f: impl FnMut(CellIndex) -> PrimitiveState,
    ) -> Self {
        let mut array = Self::new(layout, grid);
        for cell in grid.cells() {
            let state = f(cell);
            array.set_state(cell, &state);
        }
        array
    }

    /// Variable layout of every cell.
    pub fn layout(&self) -> VariableLayout {
        self.layout
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells
    }

    fn flat(&self, cell: CellIndex) -> usize {
        let [nx, ny, _] = self.shape;
        cell.i + nx * (cell.j + ny * cell.k)
    }

    /// Value of `var` at `cell`; `None` if the layout lacks `var`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the array.
    pub fn get(&self, var: Variable, cell: CellIndex) -> Option<f64> {
        let slot = self.layout.index_of(var)?;
        Some(self.data[slot * self.cells + self.flat(cell)])
    }

    /// Set `var` at `cell`. No-op if the layout lacks `var`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the array.
    pub fn set(&mut self, var: Variable, cell: CellIndex, value: f64) {
        if let Some(slot) = self.layout.index_of(var) {
            let n = slot * self.cells + self.flat(cell);
            self.data[n] = value;
        }
    }

    /// Gather the full state of `cell`.
    pub fn state(&self, cell: CellIndex) -> PrimitiveState {
        let at = self.flat(cell);
        let mut state = PrimitiveState::zeroed(self.layout);
        for (slot, var) in self.layout.iter().enumerate() {
            state.set(var, self.data[slot * self.cells + at]);
        }
        state
    }

    /// Scatter `state` into `cell`, matching variables by name.
    ///
    /// Variables the incoming state lacks are left unchanged.
    pub fn set_state(&mut self, cell: CellIndex, state: &PrimitiveState) {
        let at = self.flat(cell);
        for (slot, var) in self.layout.iter().enumerate() {
            if let Some(value) = state.get(var) {
                self.data[slot * self.cells + at] = value;
            }
        }
    }

    /// Contiguous block of `var` in flat cell order.
    pub fn variable(&self, var: Variable) -> Option<&[f64]> {
        let slot = self.layout.index_of(var)?;
        Some(&self.data[slot * self.cells..(slot + 1) * self.cells])
    }

    /// First invariant violation among `cells`, if any.
    pub fn check_physical(
        &self,
        cells: impl IntoIterator<Item = CellIndex>,
    ) -> Result<(), InvariantViolation> {
        cells
            .into_iter()
            .try_for_each(|cell| check_physical(&self.state(cell), cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisSpec;
    use corona_core::{DivergenceControl, Eos, EquationSystem, Geometry};

    fn setup() -> (VariableLayout, Grid) {
        let layout = VariableLayout::new(
            EquationSystem::Mhd,
            3,
            Eos::Ideal,
            DivergenceControl::DivCleaning,
            0,
        );
        let grid = Grid::whole(
            Geometry::Cartesian,
            &[AxisSpec::new(0.0, 1.0, 4), AxisSpec::new(0.0, 1.0, 3)],
            1,
        )
        .unwrap();
        (layout, grid)
    }

    #[test]
    fn set_then_get() {
        let (layout, grid) = setup();
        let mut a = StateArray::new(layout, &grid);
        let c = CellIndex::new(2, 3, 0);
        a.set(Variable::Bx2, c, 7.5);
        assert_eq!(a.get(Variable::Bx2, c), Some(7.5));
        assert_eq!(a.get(Variable::Bx2, CellIndex::new(1, 3, 0)), Some(0.0));
        assert_eq!(a.get(Variable::Tracer(0), c), None);
    }

    #[test]
    fn variable_block_is_flat_ordered() {
        let (layout, grid) = setup();
        let a = StateArray::from_fn(layout, &grid, |cell| {
            PrimitiveState::zeroed(layout).with(Variable::Rho, grid.flat(cell) as f64)
        });
        let rho = a.variable(Variable::Rho).unwrap();
        assert_eq!(rho.len(), grid.cell_count());
        for (n, &v) in rho.iter().enumerate() {
            assert_eq!(v, n as f64);
        }
    }

    #[test]
    fn state_gather_matches_scatter() {
        let (layout, grid) = setup();
        let mut a = StateArray::new(layout, &grid);
        let s = PrimitiveState::from_values(layout, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0])
            .unwrap();
        let c = CellIndex::new(4, 1, 0);
        a.set_state(c, &s);
        assert_eq!(a.state(c), s);
    }

    #[test]
    fn check_physical_reports_first_bad_cell() {
        let (layout, grid) = setup();
        let mut a = StateArray::from_fn(layout, &grid, |_| {
            PrimitiveState::zeroed(layout)
                .with(Variable::Rho, 1.0)
                .with(Variable::Prs, 1.0)
        });
        assert!(a.check_physical(grid.cells()).is_ok());
        let bad = CellIndex::new(3, 2, 0);
        a.set(Variable::Prs, bad, -2.0);
        match a.check_physical(grid.cells()) {
            Err(InvariantViolation::NonPositive { cell, .. }) => assert_eq!(cell, bad),
            other => panic!("expected NonPositive, got {other:?}"),
        }
    }
}
