//! Session data types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The signed-in user as persisted in the session slot.
///
/// `token` is the opaque bearer credential attached to outgoing requests;
/// every other attribute the backend returned at login (id, username, role,
/// ...) is kept verbatim in `profile` so the slot survives backend schema
/// additions without a client release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub token: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl UserSession {
    /// Create a session holding only a token.
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into(), profile: Map::new() }
    }

    /// Create a session with profile attributes.
    pub fn with_profile(token: impl Into<String>, profile: Map<String, Value>) -> Self {
        Self { token: token.into(), profile }
    }

    /// Look up a profile attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.profile.get(name)
    }
}
