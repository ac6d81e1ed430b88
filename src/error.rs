//! Error types for MargaPlan

use thiserror::Error;

/// MargaPlan error type
///
/// Only configuration-time failures are errors: an unreachable goal or an
/// exceeded step ceiling is a search outcome carried in the report, not an
/// error.
#[derive(Error, Debug)]
pub enum MargaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("start pose ({x:.1}, {y:.1}) is outside the workspace or inside an obstacle")]
    InvalidStart { x: f32, y: f32 },

    #[error("goal ({x:.1}, {y:.1}) is outside the workspace or inside an obstacle")]
    InvalidGoal { x: f32, y: f32 },
}

impl From<toml::de::Error> for MargaError {
    fn from(e: toml::de::Error) -> Self {
        MargaError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MargaError>;
