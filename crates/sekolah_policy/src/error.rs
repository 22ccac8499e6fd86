//! Error types for policy module.

use thiserror::Error;

use sekolah_data::DataError;

/// Result type alias for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;

/// Errors that can occur while configuring or running checks.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Invalid policy configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Check evaluation failed: {check} - {message}")]
    CheckFailed { check: String, message: String },

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
