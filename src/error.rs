//! Error handling for the aggregation pipeline
//!
//! Every failure surfaces as a single typed variant carrying enough detail
//! (status code, field list, or cause message) for the routing layer to
//! react programmatically.

use thiserror::Error;

/// Pipeline error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing caller-supplied parameters. Raised before any
    /// network call is made; never retried.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Non-success response (or transport failure) from an upstream
    /// collaborator service.
    #[error("upstream service error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Bounded wait exceeded on the prediction forwarding call.
    #[error("prediction service request timed out")]
    Timeout,

    /// Post-fallback completeness failure. Lists every missing field, not
    /// just the first.
    #[error("missing critical data: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// Transport-level failure reaching the prediction service.
    #[error("failed to get prediction: {0}")]
    Forwarding(String),
}

impl AppError {
    /// Numeric status-like code for the routing layer to translate into a
    /// protocol response.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::Upstream { status, .. } => *status,
            AppError::Timeout => 504,
            AppError::MissingFields { .. } => 500,
            AppError::Forwarding(_) => 500,
        }
    }
}

/// Result type alias for the pipeline
pub type AppResult<T> = Result<T, AppError>;
