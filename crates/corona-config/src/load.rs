//! TOML loading.

use std::path::Path;

use crate::config::PhysicsConfig;
use crate::error::ConfigError;

impl PhysicsConfig {
    /// Parse a TOML document. Unknown keys are rejected at every level.
    ///
    /// The result is not validated.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        tracing::debug!(
            equation = ?config.physics.equation_system,
            geometry = ?config.physics.geometry,
            dimensions = config.physics.dimensions,
            "parsed TOML configuration"
        );
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::switches::{BodyForce, Reconstruction, TimeStepping};
    use corona_core::{DivergenceControl, EquationSystem, Geometry, Side};

    const MAGNETAR: &str = r#"
[physics]
equation_system = "mhd"
dimensions = 2
components = 3
geometry = "spherical"
body_force = "potential"

[numerics]
reconstruction = "weno3"
time_stepping = "rk3"
divergence_control = "div-cleaning"

[units]
density = 1.0e8
length = 1.0e10
velocity = 1.0e10

[[grid.axes]]
min = 0.0
max = 2.0
resolution = 100

[[grid.axes]]
min = 0.0
max = 3.141592653589793
resolution = 64

[boundaries]
internal = true
user_sides = ["x1-beg", "x1-end"]
"#;

    #[test]
    fn parses_full_document() {
        let cfg = PhysicsConfig::from_toml_str(MAGNETAR).unwrap();
        assert_eq!(cfg.physics.equation_system, EquationSystem::Mhd);
        assert_eq!(cfg.physics.geometry, Geometry::Spherical);
        assert_eq!(cfg.physics.body_force, BodyForce::Potential);
        assert_eq!(cfg.numerics.reconstruction, Reconstruction::Weno3);
        assert_eq!(cfg.numerics.time_stepping, TimeStepping::Rk3);
        assert_eq!(
            cfg.numerics.divergence_control,
            DivergenceControl::DivCleaning
        );
        assert_eq!(cfg.grid.axes.len(), 2);
        assert_eq!(cfg.grid.axes[0].resolution, 100);
        assert_eq!(cfg.boundaries.user_sides, vec![Side::X1Beg, Side::X1End]);
        assert!(cfg.boundaries.internal);
        assert!(cfg.output.warning_messages);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_key_rejected() {
        let text = MAGNETAR.replace("body_force", "body_forces");
        match PhysicsConfig::from_toml_str(&text) {
            Err(ConfigError::Toml(_)) => {}
            other => panic!("expected Toml error, got {other:?}"),
        }
    }

    #[test]
    fn unknown_enum_value_rejected() {
        let text = MAGNETAR.replace("\"weno3\"", "\"weno7\"");
        assert!(matches!(
            PhysicsConfig::from_toml_str(&text),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn serialization_reparses_identically() {
        let cfg = PhysicsConfig::from_toml_str(MAGNETAR).unwrap();
        let text = cfg.to_toml_string().unwrap();
        assert_eq!(PhysicsConfig::from_toml_str(&text).unwrap(), cfg);
    }

    #[test]
    fn missing_file_reports_path() {
        match PhysicsConfig::from_toml_file("/nonexistent/corona.toml") {
            Err(ConfigError::Io { path, .. }) => {
                assert!(path.ends_with("corona.toml"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
