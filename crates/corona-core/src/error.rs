//! Error types raised by problem hooks and state checks.
//!
//! Configuration errors live in `corona-config`; this module covers what
//! can go wrong once hooks start producing state.

use crate::position::{CellIndex, Side};
use crate::variable::Variable;

/// A cell holds a state the engine cannot evolve.
///
/// Always fatal at the point of detection.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InvariantViolation {
    /// Density or pressure is zero or negative.
    #[error("{variable} must be positive, got {value} at cell {cell}")]
    NonPositive {
        /// The offending variable.
        variable: Variable,
        /// Where it was found.
        cell: CellIndex,
        /// The stored value.
        value: f64,
    },
    /// A value is NaN or infinite.
    #[error("{variable} is not finite at cell {cell}")]
    NonFinite {
        /// The offending variable.
        variable: Variable,
        /// Where it was found.
        cell: CellIndex,
    },
}

/// Errors returned by problem hooks.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum HookError {
    /// The hook produced or detected an unphysical state.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    /// A boundary hook tried to write a cell outside its region.
    #[error("write to cell {cell} is outside the {side} boundary region")]
    OutsideRegion {
        /// The cell that was written.
        cell: CellIndex,
        /// The side being filled.
        side: Side,
    },
    /// A boundary hook reported its side written without writing a cell.
    #[error("{side} boundary hook reported a fill but wrote nothing")]
    EmptyFill {
        /// The side being filled.
        side: Side,
    },
    /// A boundary hook wrote into its region but reported it untouched.
    #[error("{side} boundary hook wrote {writes} values but reported the side untouched")]
    UndeclaredWrites {
        /// The side being filled.
        side: Side,
        /// Number of writes the view recorded.
        writes: usize,
    },
    /// The hook failed for a problem-specific reason.
    #[error("hook failed: {reason}")]
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl HookError {
    /// Shorthand for [`HookError::Failed`].
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_display_names_variable_and_cell() {
        let err = InvariantViolation::NonPositive {
            variable: Variable::Prs,
            cell: CellIndex::new(3, 0, 0),
            value: -1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("PRS"));
        assert!(msg.contains("(3, 0, 0)"));
    }

    #[test]
    fn outside_region_display() {
        let err = HookError::OutsideRegion {
            cell: CellIndex::new(0, 1, 0),
            side: Side::X1End,
        };
        assert!(err.to_string().contains("X1_END"));
    }
}
