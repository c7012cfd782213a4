//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or running the integrator.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invalid pipe configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Non-finite {series} sample at index {index}: {value}")]
    NonFiniteSample {
        series: &'static str,
        index: usize,
        value: f64,
    },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<pt_core::PtError> for SimError {
    fn from(e: pt_core::PtError) -> Self {
        SimError::InvalidConfig {
            message: e.to_string(),
        }
    }
}
