//! # ScholarKG Client
//!
//! Request pipeline for the ScholarKG knowledge-graph QA backend.
//!
//! This crate contains:
//! - The HTTP transport wrapper (reqwest, fixed timeout, no retry)
//! - The API client: bearer-token injection, timing instrumentation,
//!   envelope unwrapping, error classification, session-expiry handling
//! - Multipart upload support and per-call request options
//! - Configuration loading from the environment
//!
//! ## Architecture
//! - Endpoint modules are external collaborators of the four-verb surface
//!   (`get`/`post`/`put`/`delete`); they map domain operations to paths and
//!   payloads, and optionally bridge key casing at their boundary
//! - All UI side effects (login redirect, error notifications) go through
//!   the [`api::ClientEvents`] seam supplied by the host

pub mod api;
pub mod config;
pub mod http;

// Re-export commonly used items
pub use api::{
    ApiClient, ApiClientBuilder, ClientEvents, FilePayload, MultipartForm, NoopEvents,
    RequestOptions,
};
pub use config::ApiClientConfig;
pub use http::{HttpClient, HttpClientBuilder};
pub use scholarkg_domain::{ApiError, ApiErrorCategory, ApiResult};
