//! Error types for the common utilities.

use thiserror::Error;

/// Errors produced by the common utilities (session persistence).
#[derive(Debug, Error)]
pub enum CommonError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for common operations.
pub type CommonResult<T> = std::result::Result<T, CommonError>;

impl From<std::io::Error> for CommonError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
