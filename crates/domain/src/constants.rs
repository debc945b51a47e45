//! Wire-level constants shared across the client crates.

use std::time::Duration;

/// Envelope codes the backend uses to signal success.
pub const SUCCESS_CODES: [i64; 2] = [200, 0];

/// Envelope code (and HTTP status) signalling an expired session.
pub const SESSION_EXPIRED_CODE: i64 = 401;

/// Default budget for a single request round-trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Multipart field name for batch file uploads.
pub const MULTIPART_FILES_FIELD: &str = "files";

/// Multipart field name for a single image attachment.
pub const MULTIPART_IMAGE_FIELD: &str = "image";

/// Fallback text when the backend provides no failure message.
pub const GENERIC_FAILURE_MESSAGE: &str = "request failed";
