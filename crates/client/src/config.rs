//! Client configuration
//!
//! The base address and timeout are environment-supplied; everything else
//! about the pipeline is fixed by the wire contract.
//!
//! ## Environment Variables
//! - `SCHOLARKG_API_URL`: backend base URL (e.g. `https://kg.example.edu/api`)
//! - `SCHOLARKG_API_TIMEOUT_SECS`: per-request timeout budget in seconds

use std::time::Duration;

use scholarkg_domain::constants::DEFAULT_REQUEST_TIMEOUT;
use scholarkg_domain::{ApiError, ApiResult};

/// Environment variable holding the backend base URL.
pub const ENV_API_URL: &str = "SCHOLARKG_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const ENV_API_TIMEOUT_SECS: &str = "SCHOLARKG_API_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL every path is joined onto (no trailing slash expected).
    pub base_url: String,
    /// Time budget for a single request round-trip.
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: DEFAULT_REQUEST_TIMEOUT }
    }
}

impl ApiClientConfig {
    /// Create a configuration for the given base URL with the default
    /// timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: normalize_base_url(base_url.into()), ..Self::default() }
    }

    /// Load configuration from the environment, falling back to defaults
    /// for unset variables.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if a variable is set but invalid.
    pub fn from_env() -> ApiResult<Self> {
        let base_url = match std::env::var(ENV_API_URL) {
            Ok(url) if !url.trim().is_empty() => normalize_base_url(url),
            _ => DEFAULT_BASE_URL.to_string(),
        };

        let timeout = match std::env::var(ENV_API_TIMEOUT_SECS) {
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ApiError::Config(format!("invalid {ENV_API_TIMEOUT_SECS} value: {raw:?}"))
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => DEFAULT_REQUEST_TIMEOUT,
        };

        Ok(Self { base_url, timeout })
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
