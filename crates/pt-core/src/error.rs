use thiserror::Error;

pub type PtResult<T> = Result<T, PtError>;

#[derive(Error, Debug)]
pub enum PtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Value for {what} must be strictly positive: {value}")]
    NotPositive { what: &'static str, value: f64 },

    #[error("Value for {what} must be non-negative: {value}")]
    Negative { what: &'static str, value: f64 },
}
