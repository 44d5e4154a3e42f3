//! Error types for configuration, grid access and generation.

/// Invalid or unreadable generator configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Grid side length must be at least 1.
    #[error("scale must be a positive integer, got {0}")]
    InvalidScale(i64),

    /// `scale * scale` cells do not fit in memory addressing.
    #[error("scale {0} is too large for a grid")]
    ScaleTooLarge(i64),

    /// Seed fraction outside `[0, 1]` (or NaN).
    #[error("percentFill must be within [0, 1], got {0}")]
    InvalidPercentFill(f64),

    /// `biome-dist` must carry one weight per biome.
    #[error("biome-dist must have {expected} weights, got {got}")]
    BiomeDistLength { expected: usize, got: usize },

    /// A weight in `biome-dist` or `direct-dist` is negative or not finite.
    #[error("{field} contains an invalid weight {value} for {key}")]
    NegativeWeight {
        field: &'static str,
        key: String,
        value: f64,
    },

    /// A distribution whose weights sum to zero can never be sampled.
    #[error("{0} weights sum to zero")]
    ZeroTotalWeight(&'static str),

    #[error("direct-dist is missing direction {0}")]
    MissingDirection(char),

    #[error("direct-dist has unknown direction key {0:?}")]
    UnknownDirection(String),

    /// Fixed growth count must be at least 1.
    #[error("rolls must be at least 1, got {0}")]
    InvalidRolls(i64),

    #[error("failed to read config: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Grid access outside its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: isize,
        col: isize,
        width: usize,
        height: usize,
    },
}

/// Failure of a generation run. The grid of a failed run is discarded.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The planter ran out of free cells before placing every seed.
    #[error("grid full: planted {planted} of {requested} seeds")]
    CapacityExhausted { requested: usize, planted: usize },

    #[error(transparent)]
    OutOfBounds(#[from] GridError),

    /// Mode is recognised but not implemented, or not recognised at all.
    #[error("unsupported generation mode {0:?}")]
    UnsupportedMode(String),
}
