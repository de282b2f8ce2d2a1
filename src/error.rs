//! Error types
//!
//! Only startup can fail. The simulation itself is infallible.

use thiserror::Error;

/// Fatal setup failures. Logged at the entry point, never retried.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Game container element `{0}` not found")]
    ContainerMissing(String),
    #[error("Display initialization failed: {0}")]
    DisplayInit(String),
    #[error("Invalid configuration")]
    InvalidConfig(#[from] ConfigError),
    #[error("Platform error: {0}")]
    Platform(String),
}

/// Rejected game configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("field must have a positive size, got {width}x{height}")]
    EmptyField { width: f32, height: f32 },
    #[error("{what} ({size}) does not fit in a field {field} wide")]
    TooWide {
        what: &'static str,
        size: f32,
        field: f32,
    },
    #[error("player ({size} including its bottom margin) does not fit in a field {field} tall")]
    TooTall { size: f32, field: f32 },
    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f32 },
    #[error("{what} must be a finite non-negative number, got {value}")]
    BadSpeed { what: &'static str, value: f32 },
    #[error("{what} must be positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },
    #[error("spawn interval must be at least 1 ms")]
    ZeroSpawnInterval,
    #[error("unknown preset `{0}`")]
    UnknownPreset(String),
    #[error("malformed config: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
