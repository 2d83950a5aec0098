//! Registry of transient resource handles.
//!
//! Uploaded files are not referenced by path directly; they get a
//! `session:<uuid>` token that resolves to the file only while this process
//! runs and only until it is revoked.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use super::model::HandleId;

#[derive(Debug, Default)]
pub struct SessionHandles {
    live: HashMap<HandleId, PathBuf>,
    revoked: usize,
}

impl SessionHandles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` and return a fresh handle for it.
    pub fn create(&mut self, path: PathBuf) -> HandleId {
        let id = HandleId(format!("session:{}", Uuid::new_v4()));
        debug!(handle = %id, path = %path.display(), "created session handle");
        self.live.insert(id.clone(), path);
        id
    }

    pub fn resolve(&self, id: &HandleId) -> Option<&Path> {
        self.live.get(id).map(PathBuf::as_path)
    }

    /// Release `id`. Returns true only the first time a live handle is revoked.
    pub fn revoke(&mut self, id: &HandleId) -> bool {
        let released = self.live.remove(id).is_some();
        if released {
            self.revoked += 1;
            debug!(handle = %id, "revoked session handle");
        }
        released
    }

    pub fn revoked_count(&self) -> usize {
        self.revoked
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
