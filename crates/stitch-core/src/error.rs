//! Error types for stitch

use crate::issue::StructuralError;
use thiserror::Error;

/// The main error type for stitch operations
#[derive(Debug, Error)]
pub enum StitchError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Generation error: {0}")]
    GenerationError(String),
}

/// Result type alias for stitch operations
pub type Result<T> = std::result::Result<T, StitchError>;

impl From<serde_json::Error> for StitchError {
    fn from(err: serde_json::Error) -> Self {
        StitchError::Json(err.to_string())
    }
}

impl From<toml::de::Error> for StitchError {
    fn from(err: toml::de::Error) -> Self {
        StitchError::TomlParseError(err.to_string())
    }
}
