//! Configuration errors.
//!
//! Every variant is fatal at configure time; nothing is corrected silently.

use std::path::PathBuf;

use corona_core::Side;

/// Errors detected while loading or validating a [`PhysicsConfig`](crate::PhysicsConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Dimensions outside `1..=3`.
    #[error("dimensions must be 1, 2 or 3, got {value}")]
    InvalidDimensions {
        /// The configured value.
        value: usize,
    },
    /// Vector components outside `1..=3` or fewer than the dimensions.
    #[error("components must be in {dimensions}..=3, got {value}")]
    InvalidComponents {
        /// The configured value.
        value: usize,
        /// Configured dimensions.
        dimensions: usize,
    },
    /// Number of axis specs differs from the dimensions.
    #[error("{dimensions} dimensions declared but {axes} axes given")]
    AxisCountMismatch {
        /// Configured dimensions.
        dimensions: usize,
        /// Number of axis specs.
        axes: usize,
    },
    /// An axis has bad bounds or zero resolution.
    #[error("axis x{} invalid: {reason}", axis + 1)]
    InvalidAxis {
        /// 0-based axis index.
        axis: usize,
        /// What is wrong.
        reason: String,
    },
    /// A unit scale is not finite and positive.
    #[error("unit {name} must be finite and positive, got {value}")]
    InvalidUnit {
        /// Which scale.
        name: &'static str,
        /// The configured value.
        value: f64,
    },
    /// MHD was selected without a divergence-control strategy.
    #[error("MHD requires a divergence-control strategy")]
    MissingDivergenceControl,
    /// Divergence control was requested without a magnetic field.
    #[error("divergence control requires MHD")]
    DivergenceControlWithoutField,
    /// The ghost width cannot hold the reconstruction stencil.
    #[error("{declared} ghost cells declared but the reconstruction needs {required}")]
    InsufficientGhostCells {
        /// Declared width.
        declared: usize,
        /// Width required by the stencil.
        required: usize,
    },
    /// Two switches cannot be combined.
    #[error("incompatible switches: {reason}")]
    IncompatibleSwitches {
        /// Which combination and why.
        reason: String,
    },
    /// A module requires MHD.
    #[error("{module} requires MHD")]
    RequiresMhd {
        /// The module name.
        module: &'static str,
    },
    /// A module requires an energy equation (non-isothermal EOS).
    #[error("{module} requires an energy equation")]
    RequiresEnergyEquation {
        /// The module name.
        module: &'static str,
    },
    /// Too many passive tracers.
    #[error("at most {max} tracers are supported, got {value}")]
    TooManyTracers {
        /// The configured count.
        value: usize,
        /// The supported maximum.
        max: u8,
    },
    /// A declared user boundary side is not usable.
    #[error("boundary side {side} rejected: {reason}")]
    InvalidBoundarySide {
        /// The side.
        side: Side,
        /// Why it was rejected.
        reason: String,
    },
    /// A switch table line is not `#define NAME VALUE`.
    #[error("line {line}: malformed switch `{text}`")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending text.
        text: String,
    },
    /// A switch name outside the closed vocabulary.
    #[error("line {line}: unknown switch `{name}`")]
    UnknownSwitch {
        /// The unrecognized name.
        name: String,
        /// 1-based line number.
        line: usize,
    },
    /// A switch was defined twice (aliases count as the same switch).
    #[error("line {line}: switch `{name}` already defined")]
    DuplicateSwitch {
        /// The repeated name.
        name: String,
        /// 1-based line number of the repeat.
        line: usize,
    },
    /// A required switch is absent.
    #[error("required switch `{name}` is missing")]
    MissingSwitch {
        /// The missing name.
        name: String,
    },
    /// A switch value is not in the switch's vocabulary.
    #[error("switch `{name}` has invalid value `{value}`")]
    InvalidSwitchValue {
        /// The switch.
        name: String,
        /// The rejected value.
        value: String,
    },
    /// TOML parse or schema failure (including unknown keys).
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
    /// TOML serialization failure.
    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The configuration file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The problem definition refused the configuration.
    #[error("problem '{problem}' rejects configuration: {reason}")]
    ProblemRejected {
        /// Problem name.
        problem: String,
        /// Problem-supplied reason.
        reason: String,
    },
    /// A body force is configured but the problem does not supply it.
    #[error("body force {model} configured but problem '{problem}' does not provide it")]
    MissingBodyForce {
        /// The configured model.
        model: String,
        /// Problem name.
        problem: String,
    },
}
