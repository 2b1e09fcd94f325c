//! Error types for the quality_forecast crate

use thiserror::Error;

/// Custom error types for the quality_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// No usable raw records for a series
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Too few monthly observations to pick a seasonal period
    #[error("Insufficient history: need at least {required} monthly observations, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// Seasonal decomposition cannot run with the chosen period
    #[error("Decomposition error: {0}")]
    DecompositionError(String),

    /// Model estimation or prediction failed numerically
    #[error("Forecasting error: {0}")]
    ForecastingError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to decoding upstream payloads
    #[error("Data error: {0}")]
    DataError(String),

    /// Fetching records from the upstream source failed
    #[error("Upstream error: {0}")]
    UpstreamError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::DataError(err.to_string())
    }
}

impl ForecastError {
    /// Short machine-friendly name of the error kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ForecastError::InsufficientData(_) => "insufficient_data",
            ForecastError::InsufficientHistory { .. } => "insufficient_history",
            ForecastError::DecompositionError(_) => "decomposition",
            ForecastError::ForecastingError(_) => "forecasting",
            ForecastError::InvalidParameter(_) => "invalid_parameter",
            ForecastError::DataError(_) => "data",
            ForecastError::UpstreamError(_) => "upstream",
        }
    }
}
