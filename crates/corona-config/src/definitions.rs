//! `#define NAME VALUE` switch tables.
//!
//! Problem directories traditionally carry a header of preprocessor
//! switches selecting physics and numerics. [`SwitchTable`] parses such a
//! header against a closed vocabulary; [`PhysicsConfig::from_definitions`]
//! turns it into a configuration table.

use std::str::FromStr;

use corona_core::{DivergenceControl, Eos, EquationSystem, Geometry};
use corona_grid::AxisSpec;
use indexmap::IndexMap;

use crate::config::{
    BoundarySection, GridSection, ModuleSection, NumericsSection, OutputSection, PhysicsConfig,
    PhysicsSection,
};
use crate::error::ConfigError;
use crate::switches::{BodyForce, Cooling, ParabolicTerm, Reconstruction, TimeStepping};
use crate::units::UnitSystem;

/// Every switch name a table may define.
pub const KNOWN_SWITCHES: &[&str] = &[
    "PHYSICS",
    "DIMENSIONS",
    "COMPONENTS",
    "GEOMETRY",
    "BODY_FORCE",
    "FORCED_TURB",
    "COOLING",
    "RECONSTRUCTION",
    "TIME_STEPPING",
    "DIMENSIONAL_SPLITTING",
    "NTRACER",
    "USER_DEF_PARAMETERS",
    "EOS",
    "ENTROPY_SWITCH",
    "DIVB_CONTROL",
    "BACKGROUND_FIELD",
    "AMBIPOLAR_DIFFUSION",
    "RESISTIVITY",
    "HALL_MHD",
    "THERMAL_CONDUCTION",
    "VISCOSITY",
    "ROTATING_FRAME",
    "UNIT_DENSITY",
    "UNIT_LENGTH",
    "UNIT_VELOCITY",
    "VTK_VECTOR_DUMP",
    "VTK_TIME_INFO",
    "WARNING_MESSAGES",
    "INTERNAL_BOUNDARY",
    "GHOST_CELLS",
    "X1_MIN",
    "X1_MAX",
    "X1_GRID",
    "X2_MIN",
    "X2_MAX",
    "X2_GRID",
    "X3_MIN",
    "X3_MAX",
    "X3_GRID",
];

/// Radial shorthands for the first axis.
const ALIASES: &[(&str, &str)] = &[("RMIN", "X1_MIN"), ("RMAX", "X1_MAX"), ("RGRID", "X1_GRID")];

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    value: String,
    line: usize,
}

/// Parsed switch table, in definition order.
///
/// Aliases are stored under their canonical name.
///
/// # Examples
///
/// ```
/// use corona_config::SwitchTable;
///
/// let table = SwitchTable::parse("#define PHYSICS MHD\n/* radius */\n#define RMAX 2.0\n").unwrap();
/// assert_eq!(table.get("PHYSICS"), Some("MHD"));
/// assert_eq!(table.get("X1_MAX"), Some("2.0"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SwitchTable {
    entries: IndexMap<String, Entry>,
}

impl SwitchTable {
    /// Parse `text`. Blank lines and C comments are skipped; every other
    /// line must be `#define NAME VALUE` with a known, not yet defined name.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut entries = IndexMap::new();
        let mut in_comment = false;
        for (n, raw) in text.lines().enumerate() {
            let line = n + 1;
            let code = strip_comments(raw, &mut in_comment);
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            let mut words = code.split_whitespace();
            let (Some("#define"), Some(name), Some(value), None) =
                (words.next(), words.next(), words.next(), words.next())
            else {
                return Err(ConfigError::MalformedLine {
                    line,
                    text: code.to_string(),
                });
            };
            let canonical = canonical_name(name).ok_or_else(|| ConfigError::UnknownSwitch {
                name: name.to_string(),
                line,
            })?;
            if entries.contains_key(canonical) {
                return Err(ConfigError::DuplicateSwitch {
                    name: name.to_string(),
                    line,
                });
            }
            entries.insert(
                canonical.to_string(),
                Entry {
                    value: value.to_string(),
                    line,
                },
            );
        }
        tracing::debug!(switches = entries.len(), "parsed switch table");
        Ok(Self { entries })
    }

    /// Raw value of `name` (canonical name).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.value.as_str())
    }

    /// Source line of `name`.
    pub fn line_of(&self, name: &str) -> Option<usize> {
        self.entries.get(name).map(|e| e.line)
    }

    /// Number of defined switches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no switch is defined.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Defined names in definition order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn required(&self, name: &str) -> Result<&str, ConfigError> {
        self.get(name).ok_or_else(|| ConfigError::MissingSwitch {
            name: name.to_string(),
        })
    }

    fn number<T: FromStr>(&self, name: &str) -> Result<Option<T>, ConfigError> {
        self.get(name)
            .map(|v| v.parse().map_err(|_| invalid(name, v)))
            .transpose()
    }

    fn required_number<T: FromStr>(&self, name: &str) -> Result<T, ConfigError> {
        let v = self.required(name)?;
        v.parse().map_err(|_| invalid(name, v))
    }

    fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        match self.get(name) {
            None | Some("NO") => Ok(false),
            Some("YES") => Ok(true),
            Some(v) => Err(invalid(name, v)),
        }
    }

    fn choice<T: Copy>(
        &self,
        name: &str,
        default: Option<T>,
        options: &[(&str, T)],
    ) -> Result<T, ConfigError> {
        let Some(v) = self.get(name) else {
            return default.ok_or_else(|| ConfigError::MissingSwitch {
                name: name.to_string(),
            });
        };
        options
            .iter()
            .find(|(token, _)| *token == v)
            .map(|&(_, t)| t)
            .ok_or_else(|| invalid(name, v))
    }

    fn parabolic(&self, name: &str) -> Result<ParabolicTerm, ConfigError> {
        self.choice(
            name,
            Some(ParabolicTerm::No),
            &[
                ("NO", ParabolicTerm::No),
                ("EXPLICIT", ParabolicTerm::Explicit),
                ("SUPER_TIME_STEPPING", ParabolicTerm::SuperTimeStepping),
            ],
        )
    }
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidSwitchValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn canonical_name(name: &str) -> Option<&'static str> {
    KNOWN_SWITCHES
        .iter()
        .copied()
        .find(|&known| known == name)
        .or_else(|| {
            ALIASES
                .iter()
                .find(|(alias, _)| *alias == name)
                .map(|&(_, canonical)| canonical)
        })
}

/// Remove `/* */` (possibly spanning lines) and `//` comments from one line.
fn strip_comments(line: &str, in_comment: &mut bool) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    loop {
        if *in_comment {
            match rest.find("*/") {
                Some(end) => {
                    rest = &rest[end + 2..];
                    *in_comment = false;
                }
                None => return out,
            }
        } else {
            let block = rest.find("/*");
            let line_comment = rest.find("//");
            match (block, line_comment) {
                (Some(b), Some(l)) if l < b => {
                    out.push_str(&rest[..l]);
                    return out;
                }
                (Some(b), _) => {
                    out.push_str(&rest[..b]);
                    out.push(' ');
                    rest = &rest[b + 2..];
                    *in_comment = true;
                }
                (None, Some(l)) => {
                    out.push_str(&rest[..l]);
                    return out;
                }
                (None, None) => {
                    out.push_str(rest);
                    return out;
                }
            }
        }
    }
}

impl PhysicsConfig {
    /// Build a configuration from a `#define` switch table.
    ///
    /// `PHYSICS`, `DIMENSIONS`, `GEOMETRY` and the bounds and resolution of
    /// every active axis (`X<n>_MIN`, `X<n>_MAX`, `X<n>_GRID`) are required;
    /// everything else falls back to the section defaults. The result is not
    /// validated.
    pub fn from_definitions(text: &str) -> Result<Self, ConfigError> {
        let table = SwitchTable::parse(text)?;
        Self::from_switch_table(&table)
    }

    /// Build a configuration from an already parsed table.
    pub fn from_switch_table(t: &SwitchTable) -> Result<Self, ConfigError> {
        let equation_system = t.choice(
            "PHYSICS",
            None,
            &[
                ("HD", EquationSystem::Hydrodynamics),
                ("MHD", EquationSystem::Mhd),
            ],
        )?;
        let dimensions: usize = t.required_number("DIMENSIONS")?;
        let geometry = t.choice(
            "GEOMETRY",
            None,
            &[
                ("CARTESIAN", Geometry::Cartesian),
                ("CYLINDRICAL", Geometry::Cylindrical),
                ("POLAR", Geometry::Polar),
                ("SPHERICAL", Geometry::Spherical),
            ],
        )?;
        let physics = PhysicsSection {
            equation_system,
            dimensions,
            components: t.number("COMPONENTS")?,
            geometry,
            body_force: t.choice(
                "BODY_FORCE",
                Some(BodyForce::None),
                &[
                    ("NO", BodyForce::None),
                    ("VECTOR", BodyForce::ConstantGravity),
                    ("POTENTIAL", BodyForce::Potential),
                ],
            )?,
            eos: t.choice(
                "EOS",
                Some(Eos::Ideal),
                &[("IDEAL", Eos::Ideal), ("ISOTHERMAL", Eos::Isothermal)],
            )?,
            tracers: t.number("NTRACER")?.unwrap_or(0),
            user_parameters: t.number("USER_DEF_PARAMETERS")?.unwrap_or(0),
        };

        let numerics = NumericsSection {
            reconstruction: t.choice(
                "RECONSTRUCTION",
                Some(Reconstruction::default()),
                &[
                    ("FLAT", Reconstruction::Flat),
                    ("LINEAR", Reconstruction::Linear),
                    ("LimO3", Reconstruction::LimO3),
                    ("WENO3", Reconstruction::Weno3),
                    ("PARABOLIC", Reconstruction::Parabolic),
                    ("WENOZ", Reconstruction::WenoZ),
                ],
            )?,
            time_stepping: t.choice(
                "TIME_STEPPING",
                Some(TimeStepping::default()),
                &[
                    ("EULER", TimeStepping::Euler),
                    ("RK2", TimeStepping::Rk2),
                    ("RK3", TimeStepping::Rk3),
                    ("CHARACTERISTIC_TRACING", TimeStepping::CharacteristicTracing),
                ],
            )?,
            divergence_control: t.choice(
                "DIVB_CONTROL",
                Some(DivergenceControl::None),
                &[
                    ("NO", DivergenceControl::None),
                    ("EIGHT_WAVES", DivergenceControl::EightWave),
                    ("DIV_CLEANING", DivergenceControl::DivCleaning),
                    ("CONSTRAINED_TRANSPORT", DivergenceControl::ConstrainedTransport),
                ],
            )?,
            dimensional_splitting: t.flag("DIMENSIONAL_SPLITTING")?,
            entropy_switch: t.choice(
                "ENTROPY_SWITCH",
                Some(false),
                &[
                    ("NO", false),
                    ("YES", true),
                    ("SELECTIVE", true),
                    ("ALWAYS", true),
                ],
            )?,
            ghost_cells: t.number("GHOST_CELLS")?,
        };

        let units = UnitSystem {
            density: t.number("UNIT_DENSITY")?.unwrap_or(1.0),
            length: t.number("UNIT_LENGTH")?.unwrap_or(1.0),
            velocity: t.number("UNIT_VELOCITY")?.unwrap_or(1.0),
        };

        let mut axes = Vec::with_capacity(dimensions.min(3));
        for n in 1..=dimensions.min(3) {
            axes.push(AxisSpec::new(
                t.required_number(&format!("X{n}_MIN"))?,
                t.required_number(&format!("X{n}_MAX"))?,
                t.required_number(&format!("X{n}_GRID"))?,
            ));
        }

        let modules = ModuleSection {
            cooling: t.choice(
                "COOLING",
                Some(Cooling::None),
                &[
                    ("NO", Cooling::None),
                    ("POWER_LAW", Cooling::PowerLaw),
                    ("TABULATED", Cooling::Tabulated),
                ],
            )?,
            resistivity: t.parabolic("RESISTIVITY")?,
            viscosity: t.parabolic("VISCOSITY")?,
            thermal_conduction: t.parabolic("THERMAL_CONDUCTION")?,
            ambipolar_diffusion: t.parabolic("AMBIPOLAR_DIFFUSION")?,
            hall_mhd: t.choice(
                "HALL_MHD",
                Some(false),
                &[("NO", false), ("EXPLICIT", true), ("YES", true)],
            )?,
            background_field: t.flag("BACKGROUND_FIELD")?,
            rotating_frame: t.flag("ROTATING_FRAME")?,
            forced_turbulence: t.flag("FORCED_TURB")?,
        };

        let output = OutputSection {
            vtk_vector_dump: t.flag("VTK_VECTOR_DUMP")?,
            vtk_time_info: t.flag("VTK_TIME_INFO")?,
            warning_messages: match t.get("WARNING_MESSAGES") {
                None => true,
                Some(_) => t.flag("WARNING_MESSAGES")?,
            },
        };

        Ok(Self {
            physics,
            numerics,
            units,
            grid: GridSection { axes },
            boundaries: BoundarySection {
                internal: t.flag("INTERNAL_BOUNDARY")?,
                user_sides: Vec::new(),
            },
            modules,
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAGNETAR_DEFINITIONS: &str = "\
#define  PHYSICS                        MHD
#define  DIMENSIONS                     3
#define  COMPONENTS                     3
#define  GEOMETRY                       SPHERICAL
#define  BODY_FORCE                     POTENTIAL
#define  FORCED_TURB                    NO
#define  COOLING                        NO
#define  RECONSTRUCTION                 WENO3
#define  TIME_STEPPING                  RK3
#define  DIMENSIONAL_SPLITTING          NO
#define  NTRACER                        0
#define  USER_DEF_PARAMETERS            1

/* -- physics dependent declarations -- */

#define  EOS                            IDEAL
#define  ENTROPY_SWITCH                 NO
#define  DIVB_CONTROL                   DIV_CLEANING
#define  BACKGROUND_FIELD               NO
#define  AMBIPOLAR_DIFFUSION            NO
#define  RESISTIVITY                    NO
#define  HALL_MHD                       NO
#define  THERMAL_CONDUCTION             NO
#define  VISCOSITY                      NO
#define  ROTATING_FRAME                 NO

/* -- user-defined parameters (labels) -- */

/* -- user-defined symbolic constants -- */

#define  UNIT_DENSITY                   1.e8
#define  UNIT_LENGTH                    1.e10
#define  UNIT_VELOCITY                  1.e10
#define  VTK_VECTOR_DUMP                YES
#define  VTK_TIME_INFO                  YES
#define  WARNING_MESSAGES               NO
#define  INTERNAL_BOUNDARY              YES
#define  RMAX                           2.0
#define  RMIN                           0.0
#define  RGRID                          100
";

    const ANGULAR_AXES: &str = "\
#define  X2_MIN 0.0
#define  X2_MAX 3.141592653589793
#define  X2_GRID 32
#define  X3_MIN 0.0
#define  X3_MAX 6.283185307179586
#define  X3_GRID 64
";

    #[test]
    fn table_keeps_definition_order_and_aliases() {
        let table = SwitchTable::parse(MAGNETAR_DEFINITIONS).unwrap();
        assert_eq!(table.names().next(), Some("PHYSICS"));
        assert_eq!(table.get("X1_MAX"), Some("2.0"));
        assert_eq!(table.get("RMAX"), None);
        assert_eq!(table.get("UNIT_DENSITY"), Some("1.e8"));
        assert_eq!(table.line_of("PHYSICS"), Some(1));
        assert_eq!(table.len(), 32);
    }

    #[test]
    fn radial_only_table_misses_angular_axes() {
        match PhysicsConfig::from_definitions(MAGNETAR_DEFINITIONS) {
            Err(ConfigError::MissingSwitch { name }) => assert_eq!(name, "X2_MIN"),
            other => panic!("expected MissingSwitch, got {other:?}"),
        }
    }

    #[test]
    fn magnetar_table_builds_valid_config() {
        let text = format!("{MAGNETAR_DEFINITIONS}{ANGULAR_AXES}");
        let cfg = PhysicsConfig::from_definitions(&text).unwrap();
        assert_eq!(cfg.physics.equation_system, EquationSystem::Mhd);
        assert_eq!(cfg.physics.geometry, Geometry::Spherical);
        assert_eq!(cfg.physics.body_force, BodyForce::Potential);
        assert_eq!(cfg.physics.user_parameters, 1);
        assert_eq!(cfg.numerics.reconstruction, Reconstruction::Weno3);
        assert_eq!(cfg.numerics.time_stepping, TimeStepping::Rk3);
        assert_eq!(
            cfg.numerics.divergence_control,
            DivergenceControl::DivCleaning
        );
        assert_eq!(cfg.units.density, 1.0e8);
        assert_eq!(cfg.units.length, 1.0e10);
        assert_eq!(cfg.grid.axes[0], AxisSpec::new(0.0, 2.0, 100));
        assert_eq!(cfg.grid.axes[2].resolution, 64);
        assert!(cfg.boundaries.internal);
        assert!(cfg.output.vtk_vector_dump);
        assert!(!cfg.output.warning_messages);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_switch_rejected() {
        let text = "#define PHYSICS MHD\n#define SHOCK_FLATTENING MULTID\n";
        match SwitchTable::parse(text) {
            Err(ConfigError::UnknownSwitch { name, line: 2 }) => {
                assert_eq!(name, "SHOCK_FLATTENING");
            }
            other => panic!("expected UnknownSwitch, got {other:?}"),
        }
    }

    #[test]
    fn alias_collision_is_duplicate() {
        let text = "#define X1_MAX 2.0\n#define RMAX 3.0\n";
        match SwitchTable::parse(text) {
            Err(ConfigError::DuplicateSwitch { name, line: 2 }) => assert_eq!(name, "RMAX"),
            other => panic!("expected DuplicateSwitch, got {other:?}"),
        }
    }

    #[test]
    fn malformed_lines_rejected() {
        for text in ["#include \"pluto.h\"", "#define PHYSICS", "#define A B C"] {
            match SwitchTable::parse(text) {
                Err(ConfigError::MalformedLine { line: 1, .. }) => {}
                other => panic!("expected MalformedLine for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_value_rejected() {
        let text = format!(
            "{}{ANGULAR_AXES}",
            MAGNETAR_DEFINITIONS.replace("RK3", "RK4")
        );
        match PhysicsConfig::from_definitions(&text) {
            Err(ConfigError::InvalidSwitchValue { name, value }) => {
                assert_eq!(name, "TIME_STEPPING");
                assert_eq!(value, "RK4");
            }
            other => panic!("expected InvalidSwitchValue, got {other:?}"),
        }
    }

    #[test]
    fn comments_are_skipped() {
        let text = "/* multi\n   #define NOT_A_SWITCH 1\n*/ #define PHYSICS HD // hydro\n";
        let table = SwitchTable::parse(text).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("PHYSICS"), Some("HD"));
        assert_eq!(table.line_of("PHYSICS"), Some(3));
    }
}
