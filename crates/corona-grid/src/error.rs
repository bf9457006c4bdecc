//! Error types for grid construction.

/// Errors arising from grid or partition construction.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GridError {
    /// No axes were supplied, or more than three.
    #[error("a grid needs 1 to 3 axes, got {count}")]
    AxisCount {
        /// Number of axes supplied.
        count: usize,
    },
    /// An axis has zero resolution.
    #[error("axis {axis} has zero resolution")]
    EmptyAxis {
        /// 0-based axis index.
        axis: usize,
    },
    /// An axis has non-finite or unordered bounds.
    #[error("axis {axis} extent [{min}, {max}] is invalid")]
    InvalidExtent {
        /// 0-based axis index.
        axis: usize,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },
    /// The local partition does not fit inside the global domain.
    #[error("partition on axis {axis} covers [{begin}, {end}) but the axis has {resolution} cells")]
    PartitionOutOfRange {
        /// 0-based axis index.
        axis: usize,
        /// First owned global cell.
        begin: usize,
        /// One past the last owned global cell.
        end: usize,
        /// Global resolution along the axis.
        resolution: usize,
    },
    /// The local cell count overflows `usize`.
    #[error("local cell count overflows")]
    TooManyCells,
    /// State storage for the local cells exceeds the addressable size.
    #[error("{cells} cells of {variables} variables exceed the addressable storage size")]
    StorageOverflow {
        /// Local cell count, ghosts included.
        cells: usize,
        /// Variables stored per cell.
        variables: usize,
    },
}
