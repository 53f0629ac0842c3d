//! Version history resolution.
//!
//! A chain is reconstructed in two phases: ascend `previous_version_id`
//! links from any record to the chain root, then descend by repeatedly
//! asking the store for the record whose predecessor is the current one.
//!
//! The walk trusts nothing. A predecessor that no longer exists fails with
//! `NotFound`; a cycle, a branch, or a revisited record fails with
//! `Corruption`. History is never truncated to hide a broken link.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, error};

use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::id::FileId;
use assethub_database::store::FileStore;
use assethub_entity::file::File;

/// Resolves the full version chain containing a file record.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    files: Arc<dyn FileStore>,
}

impl VersionResolver {
    /// Creates a new resolver.
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self { files }
    }

    /// Every version of the chain containing `file_id`, oldest first.
    pub async fn list_versions(&self, file_id: FileId) -> AppResult<Vec<File>> {
        let root = self.ascend(file_id).await?;
        let chain = self.descend(root).await?;

        debug!(file_id = %file_id, versions = chain.len(), "Version chain resolved");
        Ok(chain)
    }

    /// The single latest record of the chain containing `file_id`.
    pub async fn latest_version(&self, file_id: FileId) -> AppResult<File> {
        let chain = self.list_versions(file_id).await?;
        let mut latest = chain.into_iter().filter(|f| f.is_latest);

        match (latest.next(), latest.next()) {
            (Some(file), None) => Ok(file),
            (None, _) => Err(corrupt(file_id, "chain has no latest version")),
            (Some(_), Some(_)) => Err(corrupt(file_id, "chain has more than one latest version")),
        }
    }

    async fn ascend(&self, file_id: FileId) -> AppResult<File> {
        let mut current = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {file_id} not found")))?;
        let mut visited = HashSet::from([current.id]);

        while let Some(previous_id) = current.previous_version_id {
            if !visited.insert(previous_id) {
                return Err(corrupt(file_id, &format!("cycle through {previous_id}")));
            }
            let from = current.id;
            current = self.files.find_by_id(previous_id).await?.ok_or_else(|| {
                AppError::not_found(format!("Predecessor {previous_id} of file {from} not found"))
            })?;
        }

        Ok(current)
    }

    async fn descend(&self, root: File) -> AppResult<Vec<File>> {
        let start = root.id;
        let mut seen = HashSet::from([root.id]);
        let mut chain = vec![root];

        loop {
            let Some(tail) = chain.last() else { break };
            let tail_id = tail.id;
            let mut successors = self.files.find_successors(tail_id).await?;

            let next = match successors.len() {
                0 => break,
                1 => successors.remove(0),
                _ => return Err(corrupt(start, &format!("chain branches at {tail_id}"))),
            };
            if !seen.insert(next.id) {
                return Err(corrupt(start, &format!("record {} revisited", next.id)));
            }
            chain.push(next);
        }

        Ok(chain)
    }
}

fn corrupt(file_id: FileId, detail: &str) -> AppError {
    error!(file_id = %file_id, detail, "Version chain is corrupt");
    AppError::corruption(format!("Version chain of file {file_id} is corrupt: {detail}"))
}
