//! Per-call request options

/// Options applied to a single pipeline call.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters appended to the URL.
    pub params: Vec<(String, String)>,
    /// Extra headers for this call only.
    pub headers: Vec<(String, String)>,
    /// Suppress the user-facing error notification. The rejection itself
    /// still propagates to the caller.
    pub silent: bool,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Append one header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Mark this call silent.
    pub fn silent(mut self) -> Self {
        self.silent = true;
        self
    }
}
