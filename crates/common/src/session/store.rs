//! Session store abstraction

use parking_lot::RwLock;

use super::UserSession;
use crate::error::CommonResult;

/// A single-slot store for the signed-in session.
///
/// Implementations must be safe to share across concurrent in-flight
/// requests: `get` never mutates, and `set`/`clear` are last-write-wins.
pub trait SessionStore: Send + Sync {
    /// Read the current session, if one is present.
    fn get(&self) -> Option<UserSession>;

    /// Replace the slot with `session`.
    fn set(&self, session: UserSession) -> CommonResult<()>;

    /// Empty the slot. Clearing an already-empty slot is a no-op.
    fn clear(&self) -> CommonResult<()>;
}

/// In-memory session store, for tests and hosts that manage persistence
/// themselves.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: RwLock<Option<UserSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a store that starts signed in.
    pub fn with_session(session: UserSession) -> Self {
        Self { slot: RwLock::new(Some(session)) }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<UserSession> {
        self.slot.read().clone()
    }

    fn set(&self, session: UserSession) -> CommonResult<()> {
        *self.slot.write() = Some(session);
        Ok(())
    }

    fn clear(&self) -> CommonResult<()> {
        *self.slot.write() = None;
        Ok(())
    }
}
