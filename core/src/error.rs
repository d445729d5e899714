//! Configuration errors.
//!
//! Every invariant of the filter is checked once, when a corridor, a model or a
//! simulation configuration is built. Per-step computation has no failure path.
use thiserror::Error;

/// Result alias for construction-time validation.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Invalid configuration detected at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("corridor must contain at least one cell")]
    EmptyCorridor,

    #[error("invalid cell label '{symbol}' at position {position}; expected 'W' (wall) or 'D' (door)")]
    InvalidCellLabel { symbol: char, position: usize },

    #[error("probability '{name}' must lie strictly within (0, 1), got {value}")]
    ProbabilityOutOfRange { name: String, value: f64 },

    #[error("tolerance must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    #[error("trace precision must be at most {max} decimal places, got {precision}")]
    InvalidPrecision { precision: usize, max: usize },

    #[error("start location {location} is outside a corridor of length {length}")]
    StartOutOfRange { location: usize, length: usize },

    #[error("belief has {belief} entries but the corridor has {corridor} cells")]
    LengthMismatch { belief: usize, corridor: usize },

    #[error("invalid belief: {0}")]
    InvalidBelief(String),
}
