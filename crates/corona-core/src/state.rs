//! The per-cell primitive state vector.

use smallvec::SmallVec;

use crate::error::InvariantViolation;
use crate::position::CellIndex;
use crate::variable::{Variable, VariableLayout};

/// Primitive variables at one mesh cell, in [`VariableLayout`] order.
///
/// Writes to variables the layout does not carry are ignored, so the same
/// initializer can serve a hydrodynamic and an MHD build.
///
/// # Examples
///
/// ```
/// use corona_core::{DivergenceControl, Eos, EquationSystem, PrimitiveState, Variable, VariableLayout};
///
/// let layout = VariableLayout::new(
///     EquationSystem::Hydrodynamics, 2, Eos::Ideal, DivergenceControl::None, 0,
/// );
/// let state = PrimitiveState::zeroed(layout)
///     .with(Variable::Rho, 1.0)
///     .with(Variable::Prs, 2.5)
///     .with(Variable::Bx1, 9.0); // not in a hydro layout: ignored
/// assert_eq!(state.get(Variable::Prs), Some(2.5));
/// assert_eq!(state.get(Variable::Bx1), None);
/// assert_eq!(state.values(), &[1.0, 0.0, 0.0, 2.5]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveState {
    layout: VariableLayout,
    values: SmallVec<[f64; 12]>,
}

impl PrimitiveState {
    /// All variables set to zero.
    pub fn zeroed(layout: VariableLayout) -> Self {
        Self {
            layout,
            values: SmallVec::from_elem(0.0, layout.len()),
        }
    }

    /// Build from raw values in layout order.
    ///
    /// Returns `None` if `values.len()` does not match the layout.
    pub fn from_values(layout: VariableLayout, values: &[f64]) -> Option<Self> {
        (values.len() == layout.len()).then(|| Self {
            layout,
            values: SmallVec::from_slice(values),
        })
    }

    /// The layout this state follows.
    pub fn layout(&self) -> VariableLayout {
        self.layout
    }

    /// Value of `var`, or `None` if the layout lacks it.
    pub fn get(&self, var: Variable) -> Option<f64> {
        self.layout.index_of(var).map(|i| self.values[i])
    }

    /// Set `var`. No-op if the layout lacks it.
    pub fn set(&mut self, var: Variable, value: f64) {
        if let Some(i) = self.layout.index_of(var) {
            self.values[i] = value;
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, var: Variable, value: f64) -> Self {
        self.set(var, value);
        self
    }

    /// Raw values in layout order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Check the physical-validity invariants of a state at `cell`.
///
/// Density and pressure (when present) must be strictly positive and every
/// value must be finite.
pub fn check_physical(state: &PrimitiveState, cell: CellIndex) -> Result<(), InvariantViolation> {
    for (var, &value) in state.layout.iter().zip(state.values.iter()) {
        if !value.is_finite() {
            return Err(InvariantViolation::NonFinite {
                variable: var,
                cell,
            });
        }
        if var.is_positive_definite() && value <= 0.0 {
            return Err(InvariantViolation::NonPositive {
                variable: var,
                cell,
                value,
            });
        }
    }
    Ok(())
}
