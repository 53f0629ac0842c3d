//! In-memory store backend using a Tokio `RwLock`.
//!
//! Suitable for single-node deployments and tests. One lock guards both
//! the directory tree and the file chains, so a cascade delete and a
//! revision are each applied as one unit. Reads share the lock and run in
//! parallel.

mod directory;
mod file;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use assethub_core::types::id::{DirectoryId, FileId};
use assethub_entity::directory::Directory;
use assethub_entity::file::File;

/// Internal state for the memory store.
#[derive(Debug, Default)]
struct InnerState {
    /// Directories by id.
    directories: HashMap<DirectoryId, Directory>,
    /// File records by id.
    files: HashMap<FileId, File>,
}

/// Process-local implementation of both store traits.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file record verbatim, skipping every chain check.
    ///
    /// Loads fixtures and imported data whose chain links are already
    /// assigned. Nothing stops the record from breaking chain invariants.
    pub async fn import_file(&self, file: File) {
        let mut state = self.state.write().await;
        state.files.insert(file.id, file);
    }

    /// Remove a single file record, leaving its neighbours' links dangling.
    pub async fn evict_file(&self, id: FileId) -> Option<File> {
        let mut state = self.state.write().await;
        state.files.remove(&id)
    }
}
