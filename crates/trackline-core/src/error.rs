//! Error types for Trackline

use thiserror::Error;

/// Configuration and construction errors.
///
/// Everything here is raised while a scenario is being set up. Nothing in the
/// per-tick path returns a `TracklineError`.
#[derive(Debug, Error)]
pub enum TracklineError {
    #[error("Degenerate curve: needs at least {required} waypoints, got {got}")]
    DegenerateCurve { required: usize, got: usize },

    #[error("Waypoint {index} is not finite")]
    NonFiniteWaypoint { index: usize },

    #[error("Invalid waypoint parameters: {0}")]
    InvalidWaypoints(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Trackline operations
pub type Result<T> = std::result::Result<T, TracklineError>;

impl From<toml::de::Error> for TracklineError {
    fn from(err: toml::de::Error) -> Self {
        TracklineError::TomlParseError(err.to_string())
    }
}
