//! Persisted session slot
//!
//! One durable key-value slot holds the signed-in user: an opaque bearer
//! token plus whatever profile attributes the backend returned at login.
//! The slot is written at login, read on every outgoing request, and
//! cleared on logout or whenever the backend reports the session expired.
//!
//! Access is last-write-wins; any in-flight call's expiry handling may
//! clear the slot while other calls are still running, and those calls
//! must tolerate the token disappearing underneath them.

mod file;
mod store;
mod types;

pub use file::FileSessionStore;
pub use store::{MemorySessionStore, SessionStore};
pub use types::UserSession;
