//! Client error types
//!
//! Provides the error classification every pipeline call rejects with.
//! Nothing here is fatal to the process; every failure is scoped to the
//! call that produced it.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

/// Categories of client errors, for callers that branch on failure class
/// rather than on individual variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCategory {
    /// Forced logout (envelope code 401 or transport status 401)
    Session,
    /// Application-level failure carried inside a well-formed envelope
    Application,
    /// HTTP status outside 2xx with no usable envelope
    Transport,
    /// No response at all (connectivity, timeout)
    Network,
    /// Client-side failure (configuration, payload decoding)
    Client,
}

/// Errors produced by the request pipeline.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The session is no longer valid; the host should treat this as a
    /// forced logout. Raised identically for envelope `code == 401` and
    /// transport status 401.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// The backend returned a well-formed envelope with a non-success code.
    /// `body` carries the original response for callers that need detail.
    #[error("{message}")]
    Application { code: Option<i64>, message: String, body: Value },

    /// The backend answered outside 2xx and no envelope could be salvaged.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// No response was received.
    #[error("network request failed, please check connectivity: {0}")]
    Network(String),

    /// The request exceeded its time budget.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A payload could not be converted: either the request body failed to
    /// serialize, or the resolved `data` did not match the type the caller
    /// asked for.
    #[error("failed to convert payload: {0}")]
    Decode(String),

    /// The client could not be constructed or configured.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Get the error category for this error.
    pub fn category(&self) -> ApiErrorCategory {
        match self {
            Self::SessionExpired => ApiErrorCategory::Session,
            Self::Application { .. } => ApiErrorCategory::Application,
            Self::Status { .. } => ApiErrorCategory::Transport,
            Self::Network(_) | Self::Timeout(_) => ApiErrorCategory::Network,
            Self::Decode(_) | Self::Config(_) => ApiErrorCategory::Client,
        }
    }

    /// Whether this failure should force the host back to the login entry
    /// point.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// The HTTP status attached to this error, when one was observed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::SessionExpired => Some(401),
            _ => None,
        }
    }
}

/// Result type alias for pipeline operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
