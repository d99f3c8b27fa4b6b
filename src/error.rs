//! Error types and handling.

use thiserror::Error;

use crate::contract::AssertionError;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Contract assertion failed
    #[error("{0}")]
    Assertion(#[from] AssertionError),

    /// Unknown suite requested
    #[error("Unknown suite: {0}")]
    UnknownSuite(String),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Create an assertion error with message
    pub fn assertion(msg: impl Into<String>) -> Self {
        Self::Assertion(AssertionError::new(msg))
    }
}
