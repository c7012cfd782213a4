//! Error types for the pt-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Run limit exceeded: {what} = {value} (limit {limit})")]
    LimitExceeded {
        what: &'static str,
        value: u64,
        limit: u64,
    },

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for pt-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<pt_project::ProjectError> for AppError {
    fn from(err: pt_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<pt_sim::SimError> for AppError {
    fn from(err: pt_sim::SimError) -> Self {
        match err {
            pt_sim::SimError::InvalidConfig { message } => AppError::Config(message),
            other => AppError::Simulation(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
