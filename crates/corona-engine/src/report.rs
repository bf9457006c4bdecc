//! Simulation clock and per-step reports.

use corona_core::Side;

/// Completed steps and elapsed time in code units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Clock {
    /// Completed steps.
    pub step: u64,
    /// Simulation time.
    pub time: f64,
}

/// Outcome of one [`Simulation::step`](crate::Simulation::step).
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport {
    /// Step number just completed (1-based).
    pub step: u64,
    /// Time after the step.
    pub time: f64,
    /// Sides whose boundary hook wrote its region.
    pub filled_sides: Vec<Side>,
    /// Declared sides the boundary hook left untouched; their ghost
    /// cells kept the values from before the step.
    pub untouched_sides: Vec<Side>,
}
