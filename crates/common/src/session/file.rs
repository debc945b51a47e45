//! File-backed session store

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use tracing::debug;

use super::store::SessionStore;
use super::UserSession;
use crate::error::{CommonError, CommonResult};

/// Durable single-slot session store backed by one JSON file.
///
/// The file holds the serialized [`UserSession`]; it is written on `set`
/// and removed on `clear`. Reads are served from an in-memory copy loaded
/// at open, so the hot path (one read per outgoing request) never touches
/// the filesystem.
pub struct FileSessionStore {
    path: PathBuf,
    cache: RwLock<Option<UserSession>>,
}

impl FileSessionStore {
    /// Open a store at `path`, loading an existing session if the file is
    /// present. A corrupt file is treated as signed-out rather than an
    /// error: the next `set` overwrites it.
    pub fn open(path: impl Into<PathBuf>) -> CommonResult<Self> {
        let path = path.into();
        let cache = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(session) => Some(session),
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "ignoring corrupt session file");
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, cache: RwLock::new(cache) })
    }

    /// The file this store persists to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<UserSession> {
        self.cache.read().clone()
    }

    fn set(&self, session: UserSession) -> CommonResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let bytes = serde_json::to_vec(&session)?;
        fs::write(&self.path, bytes)?;
        *self.cache.write() = Some(session);
        debug!(path = %self.path.display(), "session persisted");
        Ok(())
    }

    fn clear(&self) -> CommonResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(CommonError::from(err)),
        }
        *self.cache.write() = None;
        debug!(path = %self.path.display(), "session cleared");
        Ok(())
    }
}
