//! Host-side effect seam
//!
//! The pipeline's only UI side effects are a forced navigation to the
//! login entry point and user-facing error notifications. Hosts supply
//! both through this trait; the default implementations do nothing, so a
//! headless embedding works without ceremony.

/// Side effects the pipeline may trigger on the host.
pub trait ClientEvents: Send + Sync {
    /// Navigate the user to the login entry point after a forced logout.
    ///
    /// Debounced by the pipeline: concurrent calls failing on the same
    /// expired session trigger this at most once per window.
    fn redirect_to_login(&self) {}

    /// Surface a user-facing error notification.
    ///
    /// Suppressed for calls issued with the `silent` option.
    fn show_error(&self, message: &str) {
        let _ = message;
    }
}

/// Event sink that ignores everything; the default for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl ClientEvents for NoopEvents {}
