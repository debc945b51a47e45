//! API request pipeline
//!
//! The single choke point for every backend call: token attachment, timing,
//! envelope unwrapping, error classification, and session-expiry handling.

mod client;
mod events;
mod multipart;
mod options;

pub use client::{ApiClient, ApiClientBuilder};
pub use events::{ClientEvents, NoopEvents};
pub use multipart::{FilePayload, MultipartForm};
pub use options::RequestOptions;
