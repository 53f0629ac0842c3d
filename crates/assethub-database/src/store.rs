//! Store traits for the directory tree and the file version chains.
//!
//! Both traits are implemented by the PostgreSQL repositories and by
//! [`MemoryStore`](crate::memory::MemoryStore). Stores are shared across
//! concurrent request workers; none of them holds a lock across calls.

use async_trait::async_trait;
use serde::Serialize;

use assethub_core::result::AppResult;
use assethub_core::types::id::{DirectoryId, FileId};
use assethub_entity::directory::{CreateDirectory, Directory, DirectoryQuery};
use assethub_entity::file::{CreateFile, File, FileQuery, ReviseFile};

/// What a directory deletion removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubtreeDeletion {
    /// Directories removed, including the target.
    pub directories: u64,
    /// File records removed (every version counts).
    pub files: u64,
}

/// The directory tree store.
#[async_trait]
pub trait DirectoryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a directory by ID.
    async fn find_by_id(&self, id: DirectoryId) -> AppResult<Option<Directory>>;

    /// List directories matching a scoped query.
    async fn list(&self, query: &DirectoryQuery) -> AppResult<Vec<Directory>>;

    /// Ids on the path from `id` up to its top-level ancestor, `id` first.
    ///
    /// Returns an empty list when `id` does not exist.
    async fn ancestor_ids(&self, id: DirectoryId) -> AppResult<Vec<DirectoryId>>;

    /// Insert a directory.
    ///
    /// Fails with `NotFound` or `Validation` if the parent is missing or
    /// belongs to another project.
    async fn create(&self, data: &CreateDirectory) -> AppResult<Directory>;

    /// Move a directory under a new parent (or to the top level).
    ///
    /// Fails with `Validation` if the new parent is in another project or
    /// is the directory itself or one of its descendants.
    async fn reparent(
        &self,
        id: DirectoryId,
        parent_id: Option<DirectoryId>,
    ) -> AppResult<Directory>;

    /// Delete a directory, its descendants, and every file inside them.
    ///
    /// All-or-nothing. Fails with `NotFound` if the directory does not exist.
    async fn delete_subtree(&self, id: DirectoryId) -> AppResult<SubtreeDeletion>;
}

/// The file version chain store.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file record by ID.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>>;

    /// Records whose `previous_version_id` is `id`.
    ///
    /// A healthy chain yields at most one; more than one is a branch.
    async fn find_successors(&self, id: FileId) -> AppResult<Vec<File>>;

    /// List file records matching a scoped query.
    async fn list(&self, query: &FileQuery) -> AppResult<Vec<File>>;

    /// Insert a new chain root marked latest.
    async fn create_root(&self, data: &CreateFile) -> AppResult<File>;

    /// Supersede the chain's latest record.
    ///
    /// Demoting the predecessor and inserting the new latest happen as one
    /// atomic step. If the predecessor is no longer latest the call fails
    /// with `Conflict` and nothing is written.
    async fn append_revision(&self, data: &ReviseFile) -> AppResult<File>;

    /// Delete every record of a chain. Returns the number removed.
    async fn delete_chain(&self, chain_id: FileId) -> AppResult<u64>;
}
