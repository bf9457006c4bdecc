//! The configuration table and its validation.

use std::collections::BTreeSet;
use std::f64::consts::PI;

use corona_core::{
    DivergenceControl, Eos, EquationSystem, Geometry, Side, VariableLayout, MAX_TRACERS,
};
use corona_grid::AxisSpec;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::switches::{BodyForce, Cooling, ParabolicTerm, Reconstruction, TimeStepping};
use crate::units::UnitSystem;

/// Slack for angular extents entered as decimal approximations of π.
const ANGLE_TOLERANCE: f64 = 1e-9;

// ── Sections ────────────────────────────────────────────────────

/// Equation system, dimensionality and physical closures.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicsSection {
    /// Conservation laws integrated.
    pub equation_system: EquationSystem,
    /// Spatial dimensions, `1..=3`.
    pub dimensions: usize,
    /// Vector components; defaults to `dimensions`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<usize>,
    /// Coordinate system.
    pub geometry: Geometry,
    /// Gravitational body force model.
    #[serde(default)]
    pub body_force: BodyForce,
    /// Equation of state.
    #[serde(default)]
    pub eos: Eos,
    /// Passive tracers advected with the flow.
    #[serde(default)]
    pub tracers: usize,
    /// Number of free problem parameters read at runtime.
    #[serde(default)]
    pub user_parameters: usize,
}

/// Numerical scheme selection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumericsSection {
    /// Spatial reconstruction.
    #[serde(default)]
    pub reconstruction: Reconstruction,
    /// Time integration.
    #[serde(default)]
    pub time_stepping: TimeStepping,
    /// Magnetic divergence control. Must be set for MHD.
    #[serde(default)]
    pub divergence_control: DivergenceControl,
    /// Operator-split sweeps instead of unsplit updates.
    #[serde(default)]
    pub dimensional_splitting: bool,
    /// Entropy equation in strongly supersonic regions.
    #[serde(default)]
    pub entropy_switch: bool,
    /// Ghost width override; defaults to the reconstruction's requirement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghost_cells: Option<usize>,
}

/// Mesh axes, one per dimension.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridSection {
    /// Axis specs in axis order.
    pub axes: Vec<AxisSpec>,
}

/// Which boundaries the problem fills itself.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundarySection {
    /// Call the boundary hook with [`Side::Internal`] every step.
    #[serde(default)]
    pub internal: bool,
    /// Domain faces whose ghost cells the boundary hook fills.
    #[serde(default)]
    pub user_sides: Vec<Side>,
}

/// Optional physics modules.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSection {
    /// Optically thin cooling.
    #[serde(default)]
    pub cooling: Cooling,
    /// Ohmic resistivity (MHD only).
    #[serde(default)]
    pub resistivity: ParabolicTerm,
    /// Viscosity.
    #[serde(default)]
    pub viscosity: ParabolicTerm,
    /// Thermal conduction (needs an energy equation).
    #[serde(default)]
    pub thermal_conduction: ParabolicTerm,
    /// Ambipolar diffusion (MHD only).
    #[serde(default)]
    pub ambipolar_diffusion: ParabolicTerm,
    /// Hall term (MHD only).
    #[serde(default)]
    pub hall_mhd: bool,
    /// Background field splitting (MHD only).
    #[serde(default)]
    pub background_field: bool,
    /// Rotating reference frame.
    #[serde(default)]
    pub rotating_frame: bool,
    /// Driven turbulence forcing.
    #[serde(default)]
    pub forced_turbulence: bool,
}

/// Output toggles forwarded to the engine's writers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Write vectors as VTK vector fields rather than scalars.
    #[serde(default)]
    pub vtk_vector_dump: bool,
    /// Embed simulation time in VTK files.
    #[serde(default)]
    pub vtk_time_info: bool,
    /// Emit engine warnings.
    #[serde(default = "default_true")]
    pub warning_messages: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            vtk_vector_dump: false,
            vtk_time_info: false,
            warning_messages: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ── PhysicsConfig ───────────────────────────────────────────────

/// The configuration table read by the engine before a run.
///
/// Construct with [`PhysicsConfig::builder`], [`from_toml_str`](Self::from_toml_str)
/// or [`from_definitions`](Self::from_definitions), then call
/// [`validate()`](Self::validate). The engine validates again on build and
/// shares the table immutably with every hook.
///
/// # Examples
///
/// ```
/// use corona_config::PhysicsConfig;
/// use corona_core::{DivergenceControl, EquationSystem, Geometry};
/// use corona_grid::AxisSpec;
///
/// let cfg = PhysicsConfig::builder(EquationSystem::Mhd, Geometry::Spherical)
///     .axis(AxisSpec::new(0.0, 2.0, 100))
///     .divergence_control(DivergenceControl::DivCleaning)
///     .build();
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.ghost_width(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhysicsConfig {
    /// Equation system and closures.
    pub physics: PhysicsSection,
    /// Numerical scheme.
    #[serde(default)]
    pub numerics: NumericsSection,
    /// Unit scales.
    #[serde(default)]
    pub units: UnitSystem,
    /// Mesh axes.
    pub grid: GridSection,
    /// User boundary declarations.
    #[serde(default)]
    pub boundaries: BoundarySection,
    /// Optional modules.
    #[serde(default)]
    pub modules: ModuleSection,
    /// Output toggles.
    #[serde(default)]
    pub output: OutputSection,
}

impl PhysicsConfig {
    /// Start a builder. Dimensions follow the number of axes added.
    pub fn builder(equation: EquationSystem, geometry: Geometry) -> PhysicsConfigBuilder {
        PhysicsConfigBuilder::new(equation, geometry)
    }

    /// Spatial dimensions.
    pub fn dimensions(&self) -> usize {
        self.physics.dimensions
    }

    /// Vector components (velocity and field), defaulting to the dimensions.
    pub fn components(&self) -> usize {
        self.physics.components.unwrap_or(self.physics.dimensions)
    }

    /// Ghost cells per side: the declared width, else the reconstruction's
    /// requirement.
    pub fn ghost_width(&self) -> usize {
        self.numerics
            .ghost_cells
            .unwrap_or_else(|| self.numerics.reconstruction.required_ghosts())
    }

    /// Ordered primitive variables per cell.
    pub fn layout(&self) -> VariableLayout {
        VariableLayout::new(
            self.physics.equation_system,
            self.components().min(3) as u8,
            self.physics.eos,
            self.numerics.divergence_control,
            self.physics.tracers.min(MAX_TRACERS as usize) as u8,
        )
    }

    /// Global interior resolution per axis; inactive axes report 1.
    pub fn resolution(&self) -> [usize; 3] {
        let mut res = [1; 3];
        for (axis, spec) in self.grid.axes.iter().enumerate().take(3) {
            res[axis] = spec.resolution;
        }
        res
    }

    /// Whether `side` is declared as user-filled (or is the enabled
    /// internal boundary).
    pub fn is_user_side(&self, side: Side) -> bool {
        match side {
            Side::Internal => self.boundaries.internal,
            face => self.boundaries.user_sides.contains(&face),
        }
    }

    /// Check every consistency rule, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dims = self.physics.dimensions;
        // 1. Dimensionality and vector components.
        if !(1..=3).contains(&dims) {
            return Err(ConfigError::InvalidDimensions { value: dims });
        }
        let components = self.components();
        if !(dims..=3).contains(&components) {
            return Err(ConfigError::InvalidComponents {
                value: components,
                dimensions: dims,
            });
        }
        if self.grid.axes.len() != dims {
            return Err(ConfigError::AxisCountMismatch {
                dimensions: dims,
                axes: self.grid.axes.len(),
            });
        }
        // 2. Axis extents.
        for (axis, spec) in self.grid.axes.iter().enumerate() {
            if spec.resolution == 0 {
                return Err(ConfigError::InvalidAxis {
                    axis,
                    reason: "resolution must be positive".into(),
                });
            }
            if !spec.is_well_formed() {
                return Err(ConfigError::InvalidAxis {
                    axis,
                    reason: format!(
                        "bounds must be finite with min < max, got [{}, {}]",
                        spec.min, spec.max
                    ),
                });
            }
        }
        // 3. Unit scales.
        if let Some((name, value)) = self.units.first_invalid() {
            return Err(ConfigError::InvalidUnit { name, value });
        }
        // 4. Divergence control matches the equation system.
        let mhd = self.physics.equation_system.has_magnetic_field();
        let divergence = self.numerics.divergence_control;
        match (mhd, divergence) {
            (true, DivergenceControl::None) => return Err(ConfigError::MissingDivergenceControl),
            (false, d) if d != DivergenceControl::None => {
                return Err(ConfigError::DivergenceControlWithoutField)
            }
            _ => {}
        }
        if divergence == DivergenceControl::ConstrainedTransport {
            if dims < 2 {
                return Err(ConfigError::IncompatibleSwitches {
                    reason: "constrained transport needs at least 2 dimensions".into(),
                });
            }
            if self.numerics.dimensional_splitting {
                return Err(ConfigError::IncompatibleSwitches {
                    reason: "constrained transport cannot use dimensional splitting".into(),
                });
            }
        }
        // 5. Scheme compatibility and ghost width.
        let reconstruction = self.numerics.reconstruction;
        if self.numerics.time_stepping == TimeStepping::CharacteristicTracing
            && !matches!(
                reconstruction,
                Reconstruction::Linear | Reconstruction::Parabolic
            )
        {
            return Err(ConfigError::IncompatibleSwitches {
                reason: format!(
                    "characteristic tracing needs linear or parabolic reconstruction, got {reconstruction:?}"
                ),
            });
        }
        let required = reconstruction.required_ghosts();
        if self.ghost_width() < required {
            return Err(ConfigError::InsufficientGhostCells {
                declared: self.ghost_width(),
                required,
            });
        }
        // 6. Geometry extents.
        self.validate_geometry()?;
        // 7. Module prerequisites.
        self.validate_modules(mhd)?;
        if self.physics.tracers > MAX_TRACERS as usize {
            return Err(ConfigError::TooManyTracers {
                value: self.physics.tracers,
                max: MAX_TRACERS,
            });
        }
        // 8. User boundary sides.
        let mut seen = BTreeSet::new();
        for &side in &self.boundaries.user_sides {
            let reason = match side.axis() {
                None => Some("use `internal = true` for the internal boundary".to_string()),
                Some(axis) if axis >= dims => {
                    Some(format!("axis x{} is not active", axis + 1))
                }
                Some(_) if !seen.insert(side) => Some("declared twice".to_string()),
                Some(_) => None,
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidBoundarySide { side, reason });
            }
        }
        Ok(())
    }

    fn validate_geometry(&self) -> Result<(), ConfigError> {
        let geometry = self.physics.geometry;
        let axes = &self.grid.axes;
        if geometry.is_curvilinear() && axes[0].min < 0.0 {
            return Err(ConfigError::InvalidAxis {
                axis: 0,
                reason: format!("radius must be non-negative, got {}", axes[0].min),
            });
        }
        if geometry == Geometry::Cylindrical && axes.len() > 2 {
            return Err(ConfigError::IncompatibleSwitches {
                reason: "cylindrical geometry supports at most 2 dimensions".into(),
            });
        }
        if geometry == Geometry::Spherical {
            if let Some(theta) = axes.get(1) {
                if theta.min < -ANGLE_TOLERANCE || theta.max > PI + ANGLE_TOLERANCE {
                    return Err(ConfigError::InvalidAxis {
                        axis: 1,
                        reason: format!(
                            "polar angle must lie in [0, π], got [{}, {}]",
                            theta.min, theta.max
                        ),
                    });
                }
            }
        }
        if let Some(axis) = geometry.azimuthal_axis() {
            if let Some(phi) = axes.get(axis) {
                if phi.max - phi.min > 2.0 * PI + ANGLE_TOLERANCE {
                    return Err(ConfigError::InvalidAxis {
                        axis,
                        reason: format!(
                            "azimuthal extent exceeds 2π: [{}, {}]",
                            phi.min, phi.max
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_modules(&self, mhd: bool) -> Result<(), ConfigError> {
        let m = &self.modules;
        let mhd_only = [
            ("resistivity", m.resistivity.is_enabled()),
            ("ambipolar diffusion", m.ambipolar_diffusion.is_enabled()),
            ("Hall MHD", m.hall_mhd),
            ("background field", m.background_field),
        ];
        if !mhd {
            if let Some(&(module, _)) = mhd_only.iter().find(|(_, on)| *on) {
                return Err(ConfigError::RequiresMhd { module });
            }
        }
        if self.physics.eos == Eos::Isothermal {
            let energy = [
                ("thermal conduction", m.thermal_conduction.is_enabled()),
                ("cooling", m.cooling != Cooling::None),
                ("entropy switch", self.numerics.entropy_switch),
            ];
            if let Some(&(module, _)) = energy.iter().find(|(_, on)| *on) {
                return Err(ConfigError::RequiresEnergyEquation { module });
            }
        }
        Ok(())
    }
}

// ── Builder ─────────────────────────────────────────────────────

/// Incremental construction of a [`PhysicsConfig`].
///
/// Starts from the section defaults. Nothing is checked until
/// [`PhysicsConfig::validate`].
#[derive(Clone, Debug)]
pub struct PhysicsConfigBuilder {
    config: PhysicsConfig,
    components: Option<usize>,
}

impl PhysicsConfigBuilder {
    fn new(equation: EquationSystem, geometry: Geometry) -> Self {
        Self {
            config: PhysicsConfig {
                physics: PhysicsSection {
                    equation_system: equation,
                    dimensions: 0,
                    components: None,
                    geometry,
                    body_force: BodyForce::None,
                    eos: Eos::Ideal,
                    tracers: 0,
                    user_parameters: 0,
                },
                numerics: NumericsSection::default(),
                units: UnitSystem::default(),
                grid: GridSection::default(),
                boundaries: BoundarySection::default(),
                modules: ModuleSection::default(),
                output: OutputSection::default(),
            },
            components: None,
        }
    }

    /// Append an axis; dimensions become the axis count.
    pub fn axis(mut self, spec: AxisSpec) -> Self {
        self.config.grid.axes.push(spec);
        self
    }

    /// Vector components (defaults to the dimensions).
    pub fn components(mut self, n: usize) -> Self {
        self.components = Some(n);
        self
    }

    /// Body force model.
    pub fn body_force(mut self, force: BodyForce) -> Self {
        self.config.physics.body_force = force;
        self
    }

    /// Equation of state.
    pub fn eos(mut self, eos: Eos) -> Self {
        self.config.physics.eos = eos;
        self
    }

    /// Passive tracer count.
    pub fn tracers(mut self, n: usize) -> Self {
        self.config.physics.tracers = n;
        self
    }

    /// Reconstruction scheme.
    pub fn reconstruction(mut self, r: Reconstruction) -> Self {
        self.config.numerics.reconstruction = r;
        self
    }

    /// Time stepping scheme.
    pub fn time_stepping(mut self, t: TimeStepping) -> Self {
        self.config.numerics.time_stepping = t;
        self
    }

    /// Divergence control strategy.
    pub fn divergence_control(mut self, d: DivergenceControl) -> Self {
        self.config.numerics.divergence_control = d;
        self
    }

    /// Explicit ghost width.
    pub fn ghost_cells(mut self, n: usize) -> Self {
        self.config.numerics.ghost_cells = Some(n);
        self
    }

    /// Unit scales.
    pub fn units(mut self, units: UnitSystem) -> Self {
        self.config.units = units;
        self
    }

    /// Enable the internal boundary.
    pub fn internal_boundary(mut self, enabled: bool) -> Self {
        self.config.boundaries.internal = enabled;
        self
    }

    /// Declare a user-filled domain face.
    pub fn user_side(mut self, side: Side) -> Self {
        self.config.boundaries.user_sides.push(side);
        self
    }

    /// Replace the module section.
    pub fn modules(mut self, modules: ModuleSection) -> Self {
        self.config.modules = modules;
        self
    }

    /// Finish. The result is not validated.
    pub fn build(mut self) -> PhysicsConfig {
        self.config.physics.dimensions = self.config.grid.axes.len();
        self.config.physics.components = self.components;
        self.config
    }
}
