//! Magnetized neutron star.
//!
//! The star is an n = 1 polytrope of unit radius (lengths in stellar
//! radii) embedded in a tenuous atmosphere:
//!
//! ```text
//! ρ(r) = ρc sin(πr) / (πr)   (r < 1),   ρ = ρvac   (r ≥ 1),   P = K ρ²
//! ```
//!
//! threaded by a mixed poloidal–toroidal field that matches a dipole at the
//! surface, and held together by the potential `Φ = −GM/R − 2Kρ` inside,
//! `Φ = −GM/(R r)` outside. Physical quantities are cgs and converted with
//! the configured unit scales.

use std::f64::consts::PI;

use corona_config::PhysicsConfig;
use corona_core::{
    CellIndex, EquationSystem, Geometry, HookError, Position, PrimitiveState, Side, Variable,
};
use corona_grid::{Grid, StateArray};
use corona_problem::{BoundaryFill, BoundaryView, HookContext, Problem};

use crate::inertia::InertiaMonitor;

/// Physical parameters of the star (cgs).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagnetarParams {
    /// Central density (g/cm³).
    pub central_density: f64,
    /// Atmosphere density (g/cm³); also the floor inside the star.
    pub vacuum_density: f64,
    /// Polytropic constant `K` in `P = K ρ²`.
    pub polytropic_constant: f64,
    /// Field scale `Bmax` (gauss).
    pub max_field: f64,
    /// Surface potential depth `GM/R` (cm²/s²).
    pub surface_potential: f64,
}

impl Default for MagnetarParams {
    fn default() -> Self {
        Self {
            central_density: 2.2e15,
            vacuum_density: 5.0e10,
            polytropic_constant: 4.25e4,
            max_field: 1.0e15,
            surface_potential: 1.857595e20,
        }
    }
}

/// Polytropic magnetar with custom radial and polar-axis boundaries.
///
/// Boundary sides handled: `X1_BEG` (reflective at the centre), `X1_END`
/// (zero-gradient matter at rest, field frozen at the outer dipole),
/// `X2_BEG`/`X2_END` (polar axis). Other sides are left untouched.
/// [`analysis`](Problem::analysis) records moments of inertia.
#[derive(Clone, Debug)]
pub struct MagnetarProblem {
    params: MagnetarParams,
    monitor: InertiaMonitor,
}

impl Default for MagnetarProblem {
    fn default() -> Self {
        Self {
            params: MagnetarParams::default(),
            monitor: InertiaMonitor::new(),
        }
    }
}

impl MagnetarProblem {
    /// Create a problem from `params`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a parameter is not finite and positive or the
    /// atmosphere is at least as dense as the centre.
    pub fn new(params: MagnetarParams) -> Result<Self, String> {
        let fields = [
            ("central_density", params.central_density),
            ("vacuum_density", params.vacuum_density),
            ("polytropic_constant", params.polytropic_constant),
            ("max_field", params.max_field),
            ("surface_potential", params.surface_potential),
        ];
        if let Some((name, v)) = fields.iter().find(|(_, v)| !v.is_finite() || *v <= 0.0) {
            return Err(format!("{name} must be finite and positive, got {v}"));
        }
        if params.vacuum_density >= params.central_density {
            return Err(format!(
                "vacuum_density ({}) must be below central_density ({})",
                params.vacuum_density, params.central_density
            ));
        }
        Ok(Self {
            params,
            monitor: InertiaMonitor::new(),
        })
    }

    /// Physical parameters.
    pub fn params(&self) -> &MagnetarParams {
        &self.params
    }

    /// Recorded inertia samples.
    pub fn monitor(&self) -> &InertiaMonitor {
        &self.monitor
    }

    /// Polytrope density without the atmosphere floor.
    fn polytrope(&self, r: f64) -> f64 {
        let x = PI * r.abs();
        let sinc = if x == 0.0 { 1.0 } else { x.sin() / x };
        self.params.central_density * sinc
    }

    /// Density (g/cm³) at radius `r`.
    pub fn density(&self, r: f64) -> f64 {
        if r.abs() < 1.0 {
            self.polytrope(r).max(self.params.vacuum_density)
        } else {
            self.params.vacuum_density
        }
    }

    /// Pressure (dyn/cm²) of gas at density `rho`.
    pub fn pressure(&self, rho: f64) -> f64 {
        self.params.polytropic_constant * rho * rho
    }

    /// `(Br, Bθ, Bφ)` in gauss at radius `r`, polar angle `theta`.
    pub fn field(&self, r: f64, theta: f64) -> [f64; 3] {
        let bmax = self.params.max_field;
        let (s, c) = theta.sin_cos();
        if r.abs() < 1.0 {
            let x = PI * r;
            let (sx, cx) = x.sin_cos();
            let denom = PI * (PI * PI - 6.0);
            let br = bmax * c * (x.powi(3) + 3.0 * (x * x - 2.0) * sx + 6.0 * x * cx) / denom;
            let bt = bmax * s * (-2.0 * x.powi(3) + 3.0 * (x * x - 2.0) * (sx - x * cx))
                / (2.0 * denom);
            let bp = bmax * sx * s / PI;
            [br, bt, bp]
        } else {
            let r3 = r.powi(3);
            [bmax * c / r3, bmax * s / (2.0 * r3), 0.0]
        }
    }

    /// Gravitational potential (cm²/s²) at radius `r`.
    pub fn potential(&self, r: f64) -> f64 {
        let gm_r = self.params.surface_potential;
        if r.abs() < 1.0 {
            -gm_r - 2.0 * self.params.polytropic_constant * self.polytrope(r)
        } else {
            -gm_r / r
        }
    }

    fn code_field(config: &PhysicsConfig, b: [f64; 3]) -> [f64; 3] {
        let b0 = config.units.magnetic_field();
        b.map(|v| v / b0)
    }

    fn outer_boundary(
        &self,
        ctx: &HookContext<'_>,
        view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        let grid = ctx.grid();
        let rmax = grid
            .axis(0)
            .map(|a| a.max)
            .ok_or_else(|| HookError::failed("radial axis inactive"))?;
        let last = grid.interior_ranges()[0].end - 1;
        let cells: Vec<CellIndex> = view.cells().collect();
        for cell in cells {
            let mut state = view.state(cell.with(0, last));
            for axis in 0..3 {
                if let Some(v) = Variable::velocity(axis) {
                    state.set(v, 0.0);
                }
            }
            let theta = grid.center(1, cell.j);
            let b = Self::code_field(ctx.config(), self.field(rmax, theta));
            set_field(&mut state, b);
            view.set_state(cell, &state)?;
        }
        Ok(BoundaryFill::Written)
    }

    fn axis_boundary(
        &self,
        ctx: &HookContext<'_>,
        view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        let grid = ctx.grid();
        let side = view.side();
        // Polar angle of the axis being filled.
        let pole = if side.is_begin() { 0.0 } else { PI };
        let cells: Vec<CellIndex> = view.cells().collect();
        for cell in cells {
            let mut state = view.state(mirror(grid, side, cell));
            negate(&mut state, Variable::Vx2);
            let r = grid.center(0, cell.i);
            let [br, _, _] = Self::code_field(ctx.config(), self.field(r, pole));
            set_field(&mut state, [br, 0.0, 0.0]);
            view.set_state(cell, &state)?;
        }
        Ok(BoundaryFill::Written)
    }
}

fn set_field(state: &mut PrimitiveState, b: [f64; 3]) {
    for (axis, value) in b.into_iter().enumerate() {
        if let Some(var) = Variable::magnetic(axis) {
            state.set(var, value);
        }
    }
}

fn negate(state: &mut PrimitiveState, var: Variable) {
    if let Some(v) = state.get(var) {
        state.set(var, -v);
    }
}

/// Interior cell mirroring ghost `cell` across `side`.
fn mirror(grid: &Grid, side: Side, cell: CellIndex) -> CellIndex {
    let Some(axis) = side.axis() else {
        return cell;
    };
    let g = grid.ghost();
    let l = cell.along(axis);
    let m = if side.is_begin() {
        2 * g - 1 - l
    } else {
        2 * (grid.shape()[axis] - g) - 1 - l
    };
    cell.with(axis, m)
}

impl Problem for MagnetarProblem {
    fn name(&self) -> &str {
        "magnetar"
    }

    fn check_config(&self, config: &PhysicsConfig) -> Result<(), String> {
        if config.physics.geometry != Geometry::Spherical {
            return Err(format!(
                "needs spherical geometry, got {:?}",
                config.physics.geometry
            ));
        }
        if config.physics.equation_system != EquationSystem::Mhd {
            return Err("needs MHD".into());
        }
        if config.components() < 3 {
            return Err(format!(
                "needs 3 field components for the toroidal field, got {}",
                config.components()
            ));
        }
        Ok(())
    }

    fn init(&self, config: &PhysicsConfig, position: &Position) -> PrimitiveState {
        let units = &config.units;
        let rho = self.density(position.x1);
        let mut state = PrimitiveState::zeroed(config.layout())
            .with(Variable::Rho, rho / units.density)
            .with(Variable::Prs, self.pressure(rho) / units.pressure());
        set_field(
            &mut state,
            Self::code_field(config, self.field(position.x1, position.x2)),
        );
        state
    }

    fn user_def_boundary(
        &self,
        ctx: &HookContext<'_>,
        view: &mut BoundaryView<'_>,
    ) -> Result<BoundaryFill, HookError> {
        match view.side() {
            Side::X1End => self.outer_boundary(ctx, view),
            Side::X1Beg => {
                let grid = ctx.grid();
                let cells: Vec<CellIndex> = view.cells().collect();
                for cell in cells {
                    let mut state = view.state(mirror(grid, Side::X1Beg, cell));
                    negate(&mut state, Variable::Vx1);
                    negate(&mut state, Variable::Bx1);
                    view.set_state(cell, &state)?;
                }
                Ok(BoundaryFill::Written)
            }
            Side::X2Beg | Side::X2End => self.axis_boundary(ctx, view),
            _ => Ok(BoundaryFill::Untouched),
        }
    }

    fn analysis(&mut self, ctx: &HookContext<'_>, state: &StateArray) -> Result<(), HookError> {
        self.monitor.observe(ctx, state).map(|_| ())
    }

    fn body_force_potential(&self, config: &PhysicsConfig, position: &Position) -> Option<f64> {
        Some(self.potential(position.x1) / config.units.potential())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corona_config::{BodyForce, UnitSystem};
    use corona_core::DivergenceControl;
    use corona_grid::AxisSpec;

    fn config() -> PhysicsConfig {
        PhysicsConfig::builder(EquationSystem::Mhd, Geometry::Spherical)
            .axis(AxisSpec::new(0.0, 2.0, 40))
            .axis(AxisSpec::new(0.0, PI, 16))
            .components(3)
            .divergence_control(DivergenceControl::DivCleaning)
            .body_force(BodyForce::Potential)
            .units(UnitSystem::new(1.0e8, 1.0e10, 1.0e10))
            .user_side(Side::X1Beg)
            .user_side(Side::X1End)
            .user_side(Side::X2Beg)
            .user_side(Side::X2End)
            .build()
    }

    fn rel(a: f64, b: f64) -> f64 {
        (a - b).abs() / a.abs().max(b.abs())
    }

    #[test]
    fn field_is_continuous_at_surface() {
        let star = MagnetarProblem::default();
        for theta in [0.1, PI / 4.0, PI / 2.0, 2.5] {
            let inside = star.field(1.0 - 1e-9, theta);
            let outside = star.field(1.0, theta);
            assert!(rel(inside[0], outside[0]) < 1e-6, "Br at θ={theta}");
            assert!(rel(inside[1], outside[1]) < 1e-6, "Bθ at θ={theta}");
            assert!(inside[2].abs() < 1e-6 * star.params().max_field);
            assert_eq!(outside[2], 0.0);
        }
    }

    #[test]
    fn potential_is_continuous_and_deepest_at_centre() {
        let star = MagnetarProblem::default();
        let gm_r = star.params().surface_potential;
        assert!(rel(star.potential(1.0 - 1e-9), -gm_r) < 1e-6);
        assert_eq!(star.potential(1.0), -gm_r);
        assert_eq!(star.potential(2.0), -gm_r / 2.0);
        assert!(star.potential(0.0) < star.potential(0.5));
    }

    #[test]
    fn init_is_physical_everywhere() {
        let cfg = config();
        let grid = Grid::whole(Geometry::Spherical, &cfg.grid.axes, cfg.ghost_width()).unwrap();
        let star = MagnetarProblem::default();
        for cell in grid.cells() {
            let s = star.init(&cfg, &grid.position(cell));
            corona_core::check_physical(&s, cell).unwrap();
        }
    }

    #[test]
    fn centre_density_in_code_units() {
        let cfg = config();
        let s = MagnetarProblem::default().init(&cfg, &Position::new(0.0, PI / 2.0, 0.0));
        assert_eq!(s.get(Variable::Rho), Some(2.2e15 / 1.0e8));
        let prs = s.get(Variable::Prs).unwrap();
        assert!(rel(prs, 4.25e4 * 2.2e15 * 2.2e15 / 1.0e28) < 1e-12);
        assert_eq!(s.get(Variable::PsiGlm), Some(0.0));
    }

    #[test]
    fn rejects_non_spherical_or_hydro() {
        let star = MagnetarProblem::default();
        let mut cfg = config();
        assert!(star.check_config(&cfg).is_ok());
        cfg.physics.geometry = Geometry::Cartesian;
        assert!(star.check_config(&cfg).is_err());
        let mut cfg = config();
        cfg.physics.equation_system = EquationSystem::Hydrodynamics;
        assert!(star.check_config(&cfg).is_err());
    }

    #[test]
    fn radial_runs_sample_the_equator() {
        let cfg = PhysicsConfig::builder(EquationSystem::Mhd, Geometry::Spherical)
            .axis(AxisSpec::new(0.0, 2.0, 40))
            .components(3)
            .divergence_control(DivergenceControl::DivCleaning)
            .body_force(BodyForce::Potential)
            .units(UnitSystem::new(1.0e8, 1.0e10, 1.0e10))
            .build();
        let grid = Grid::whole(Geometry::Spherical, &cfg.grid.axes, cfg.ghost_width()).unwrap();
        let cell = CellIndex::new(grid.ghost() + 10, 0, 0);
        let at = grid.position(cell);
        assert!(at.x1 < 1.0);
        assert_eq!(at.x2, PI / 2.0);
        let s = MagnetarProblem::default().init(&cfg, &at);
        assert!(s.get(Variable::Bx1).unwrap().abs() < 1e-12 * s.get(Variable::Bx3).unwrap());
        assert!(s.get(Variable::Bx2).unwrap() != 0.0);
        assert!(s.get(Variable::Bx3).unwrap() > 0.0);
    }

    #[test]
    fn rejects_fewer_than_three_components() {
        let mut cfg = config();
        cfg.physics.components = Some(2);
        cfg.validate().unwrap();
        match MagnetarProblem::default().check_config(&cfg) {
            Err(reason) => assert!(reason.contains("toroidal"), "{reason}"),
            Ok(()) => panic!("expected rejection with 2 components"),
        }
    }

    #[test]
    fn params_validated() {
        let bad = MagnetarParams {
            vacuum_density: 1.0e16,
            ..MagnetarParams::default()
        };
        assert!(MagnetarProblem::new(bad).is_err());
        let bad = MagnetarParams {
            max_field: f64::NAN,
            ..MagnetarParams::default()
        };
        assert!(MagnetarProblem::new(bad).is_err());
        assert!(MagnetarProblem::new(MagnetarParams::default()).is_ok());
    }

    fn initial_state(cfg: &PhysicsConfig, grid: &Grid, star: &MagnetarProblem) -> StateArray {
        StateArray::from_fn(cfg.layout(), grid, |cell| {
            star.init(cfg, &grid.position(cell))
        })
    }

    #[test]
    fn outer_boundary_freezes_dipole_and_stops_flow() {
        let cfg = config();
        let grid = Grid::whole(Geometry::Spherical, &cfg.grid.axes, cfg.ghost_width()).unwrap();
        let star = MagnetarProblem::default();
        let mut state = initial_state(&cfg, &grid, &star);
        let region = grid.boundary_region(Side::X1End).unwrap();
        let ctx = HookContext::new(&cfg, &grid, 1, 0.1);
        let mut view = BoundaryView::new(&mut state, &region);
        assert_eq!(
            star.user_def_boundary(&ctx, &mut view).unwrap(),
            BoundaryFill::Written
        );
        assert_eq!(view.writes(), region.len());

        let b0 = cfg.units.magnetic_field();
        let last = grid.interior_ranges()[0].end - 1;
        for cell in region.cells() {
            let theta = grid.center(1, cell.j);
            let expected = star.field(2.0, theta);
            assert_eq!(state.get(Variable::Bx1, cell), Some(expected[0] / b0));
            assert_eq!(state.get(Variable::Vx1, cell), Some(0.0));
            assert_eq!(
                state.get(Variable::Rho, cell),
                state.get(Variable::Rho, cell.with(0, last))
            );
        }
    }

    #[test]
    fn polar_axis_boundary_zeroes_transverse_field() {
        let cfg = config();
        let grid = Grid::whole(Geometry::Spherical, &cfg.grid.axes, cfg.ghost_width()).unwrap();
        let star = MagnetarProblem::default();
        let mut state = initial_state(&cfg, &grid, &star);
        let g = grid.ghost();
        let interior = CellIndex::new(g + 3, g, 0);
        state.set(Variable::Vx2, interior, 0.25);

        let ctx = HookContext::new(&cfg, &grid, 1, 0.1);
        for side in [Side::X2Beg, Side::X2End] {
            let region = grid.boundary_region(side).unwrap();
            let mut view = BoundaryView::new(&mut state, &region);
            star.user_def_boundary(&ctx, &mut view).unwrap();
        }

        let ghost = CellIndex::new(g + 3, g - 1, 0);
        assert_eq!(state.get(Variable::Vx2, ghost), Some(-0.25));
        assert_eq!(state.get(Variable::Bx2, ghost), Some(0.0));
        assert_eq!(state.get(Variable::Bx3, ghost), Some(0.0));
        assert_eq!(
            state.get(Variable::Rho, ghost),
            state.get(Variable::Rho, interior)
        );
        let top = CellIndex::new(g + 3, grid.shape()[1] - 1, 0);
        let north = state.get(Variable::Bx1, ghost).unwrap();
        let south = state.get(Variable::Bx1, top).unwrap();
        assert_eq!(north, -south);
    }

    #[test]
    fn inner_boundary_reflects_radial_velocity() {
        let cfg = config();
        let grid = Grid::whole(Geometry::Spherical, &cfg.grid.axes, cfg.ghost_width()).unwrap();
        let star = MagnetarProblem::default();
        let mut state = initial_state(&cfg, &grid, &star);
        let g = grid.ghost();
        let first = CellIndex::new(g, g + 2, 0);
        state.set(Variable::Vx1, first, 3.0);
        let region = grid.boundary_region(Side::X1Beg).unwrap();
        let ctx = HookContext::new(&cfg, &grid, 1, 0.1);
        let mut view = BoundaryView::new(&mut state, &region);
        star.user_def_boundary(&ctx, &mut view).unwrap();
        assert_eq!(state.get(Variable::Vx1, first.with(0, g - 1)), Some(-3.0));
    }

    #[test]
    fn unhandled_side_is_untouched() {
        let mut cfg = config();
        cfg.physics.dimensions = 3;
        cfg.grid.axes.push(AxisSpec::new(0.0, 2.0 * PI, 8));
        let grid = Grid::whole(Geometry::Spherical, &cfg.grid.axes, cfg.ghost_width()).unwrap();
        let star = MagnetarProblem::default();
        let mut state = initial_state(&cfg, &grid, &star);
        let before = state.clone();
        let region = grid.boundary_region(Side::X3Beg).unwrap();
        let ctx = HookContext::new(&cfg, &grid, 1, 0.1);
        let mut view = BoundaryView::new(&mut state, &region);
        assert_eq!(
            star.user_def_boundary(&ctx, &mut view).unwrap(),
            BoundaryFill::Untouched
        );
        assert_eq!(state, before);
    }

    #[test]
    fn analysis_records_inertia() {
        let cfg = config();
        let grid = Grid::whole(Geometry::Spherical, &cfg.grid.axes, cfg.ghost_width()).unwrap();
        let mut star = MagnetarProblem::default();
        let state = initial_state(&cfg, &grid, &star);
        let ctx = HookContext::new(&cfg, &grid, 0, 0.0);
        star.analysis(&ctx, &state).unwrap();
        let sample = *star.monitor().latest().unwrap();
        assert!(sample.izz > 0.0);
        assert_eq!(sample.ixx, sample.iyy);
        assert_eq!(star.monitor().ellipticity(&sample), Some((sample.izz - sample.ixx) / sample.izz));
    }

    #[test]
    fn potential_in_code_units() {
        let cfg = config();
        let star = MagnetarProblem::default();
        let phi = star
            .body_force_potential(&cfg, &Position::new(2.0, 1.0, 0.0))
            .unwrap();
        assert!(rel(phi, -1.857595e20 / 2.0 / 1.0e20) < 1e-12);
    }
}
