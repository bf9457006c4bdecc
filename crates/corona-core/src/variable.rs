//! Primitive variables and their per-configuration ordering.

use std::fmt;

use crate::physics::{DivergenceControl, Eos, EquationSystem};

/// Upper bound on passive tracers carried in the state.
pub const MAX_TRACERS: u8 = 8;

/// A named slot in the primitive state vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    /// Mass density (`RHO`).
    Rho,
    /// Velocity along x1 (`VX1`).
    Vx1,
    /// Velocity along x2 (`VX2`).
    Vx2,
    /// Velocity along x3 (`VX3`).
    Vx3,
    /// Magnetic field along x1 (`BX1`).
    Bx1,
    /// Magnetic field along x2 (`BX2`).
    Bx2,
    /// Magnetic field along x3 (`BX3`).
    Bx3,
    /// Thermal pressure (`PRS`).
    Prs,
    /// GLM cleaning scalar (`PSI_GLM`).
    PsiGlm,
    /// Passive tracer `n` (`TRC + n`).
    Tracer(u8),
}

impl Variable {
    /// Velocity component along axis `axis` (0-based), if `axis < 3`.
    pub fn velocity(axis: usize) -> Option<Self> {
        [Self::Vx1, Self::Vx2, Self::Vx3].get(axis).copied()
    }

    /// Magnetic field component along axis `axis` (0-based), if `axis < 3`.
    pub fn magnetic(axis: usize) -> Option<Self> {
        [Self::Bx1, Self::Bx2, Self::Bx3].get(axis).copied()
    }

    /// Whether the variable must stay strictly positive in a physical state.
    pub fn is_positive_definite(self) -> bool {
        matches!(self, Self::Rho | Self::Prs)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rho => write!(f, "RHO"),
            Self::Vx1 => write!(f, "VX1"),
            Self::Vx2 => write!(f, "VX2"),
            Self::Vx3 => write!(f, "VX3"),
            Self::Bx1 => write!(f, "BX1"),
            Self::Bx2 => write!(f, "BX2"),
            Self::Bx3 => write!(f, "BX3"),
            Self::Prs => write!(f, "PRS"),
            Self::PsiGlm => write!(f, "PSI_GLM"),
            Self::Tracer(n) => write!(f, "TRC{n}"),
        }
    }
}

/// The ordered set of primitive variables for one configuration.
///
/// Order: `RHO, VX1..VXc, [BX1..BXc], [PRS], [PSI_GLM], TRC0..`, where `c`
/// is the number of vector components, the magnetic block is present only
/// for MHD, pressure is absent for an isothermal EOS, and the GLM scalar is
/// present only under divergence cleaning.
///
/// # Examples
///
/// ```
/// use corona_core::{DivergenceControl, Eos, EquationSystem, Variable, VariableLayout};
///
/// let layout = VariableLayout::new(
///     EquationSystem::Mhd, 3, Eos::Ideal, DivergenceControl::DivCleaning, 0,
/// );
/// assert_eq!(layout.len(), 9);
/// assert_eq!(layout.index_of(Variable::Rho), Some(0));
/// assert_eq!(layout.index_of(Variable::Prs), Some(7));
/// assert_eq!(layout.index_of(Variable::PsiGlm), Some(8));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VariableLayout {
    equation: EquationSystem,
    components: u8,
    eos: Eos,
    divergence: DivergenceControl,
    tracers: u8,
}

impl VariableLayout {
    /// Build a layout. `components` is clamped to `1..=3` and `tracers`
    /// to [`MAX_TRACERS`]; range checking is the configuration's job.
    pub fn new(
        equation: EquationSystem,
        components: u8,
        eos: Eos,
        divergence: DivergenceControl,
        tracers: u8,
    ) -> Self {
        Self {
            equation,
            components: components.clamp(1, 3),
            eos,
            divergence,
            tracers: tracers.min(MAX_TRACERS),
        }
    }

    /// Equation system this layout was built for.
    pub fn equation(&self) -> EquationSystem {
        self.equation
    }

    /// Number of vector components.
    pub fn components(&self) -> usize {
        self.components as usize
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        let mut n = 1 + self.components();
        if self.equation.has_magnetic_field() {
            n += self.components();
        }
        if self.has_pressure() {
            n += 1;
        }
        if self.has_glm() {
            n += 1;
        }
        n + self.tracers as usize
    }

    /// Always `false`: density is always present.
    pub fn is_empty(&self) -> bool {
        false
    }

    fn has_pressure(&self) -> bool {
        self.eos != Eos::Isothermal
    }

    fn has_glm(&self) -> bool {
        self.equation.has_magnetic_field() && self.divergence == DivergenceControl::DivCleaning
    }

    /// Slot of `var` in the state vector, or `None` if absent.
    pub fn index_of(&self, var: Variable) -> Option<usize> {
        let c = self.components();
        let mag = if self.equation.has_magnetic_field() { c } else { 0 };
        let prs = usize::from(self.has_pressure());
        let glm = usize::from(self.has_glm());
        match var {
            Variable::Rho => Some(0),
            Variable::Vx1 => (c > 0).then_some(1),
            Variable::Vx2 => (c > 1).then_some(2),
            Variable::Vx3 => (c > 2).then_some(3),
            Variable::Bx1 => (mag > 0).then_some(1 + c),
            Variable::Bx2 => (mag > 1).then_some(2 + c),
            Variable::Bx3 => (mag > 2).then_some(3 + c),
            Variable::Prs => (prs == 1).then_some(1 + c + mag),
            Variable::PsiGlm => (glm == 1).then_some(1 + c + mag + prs),
            Variable::Tracer(n) => (n < self.tracers).then_some(1 + c + mag + prs + glm + n as usize),
        }
    }

    /// Whether `var` is part of this layout.
    pub fn contains(&self, var: Variable) -> bool {
        self.index_of(var).is_some()
    }

    /// Variables in state-vector order.
    pub fn iter(&self) -> impl Iterator<Item = Variable> + '_ {
        let c = self.components();
        let velocity = (0..c).filter_map(Variable::velocity);
        let magnetic = (0..c)
            .filter(|_| self.equation.has_magnetic_field())
            .filter_map(Variable::magnetic);
        std::iter::once(Variable::Rho)
            .chain(velocity)
            .chain(magnetic)
            .chain(self.has_pressure().then_some(Variable::Prs))
            .chain(self.has_glm().then_some(Variable::PsiGlm))
            .chain((0..self.tracers).map(Variable::Tracer))
    }
}
