//! [`FileStore`] for [`MemoryStore`].

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::id::FileId;
use assethub_entity::file::{CreateFile, File, FileQuery, ReviseFile};

use super::MemoryStore;
use crate::store::FileStore;

#[async_trait]
impl FileStore for MemoryStore {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        let state = self.state.read().await;
        Ok(state.files.get(&id).cloned())
    }

    async fn find_successors(&self, id: FileId) -> AppResult<Vec<File>> {
        let state = self.state.read().await;
        let mut successors: Vec<File> = state
            .files
            .values()
            .filter(|f| f.previous_version_id == Some(id))
            .cloned()
            .collect();
        successors.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(successors)
    }

    async fn list(&self, query: &FileQuery) -> AppResult<Vec<File>> {
        let state = self.state.read().await;
        let mut files: Vec<File> = state
            .files
            .values()
            .filter(|f| query.matches(f))
            .cloned()
            .collect();
        files.sort_by(|a, b| query.compare(a, b));
        Ok(files)
    }

    async fn create_root(&self, data: &CreateFile) -> AppResult<File> {
        let mut state = self.state.write().await;

        if let Some(directory_id) = data.directory_id {
            match state.directories.get(&directory_id) {
                None => {
                    return Err(AppError::not_found(format!(
                        "Directory {directory_id} not found"
                    )));
                }
                Some(dir) if dir.project_id != data.project_id => {
                    return Err(AppError::validation(format!(
                        "Directory {directory_id} belongs to another project"
                    )));
                }
                Some(_) => {}
            }
        }

        let id = FileId::new();
        let file = File {
            id,
            name: data.name.clone(),
            project_id: data.project_id,
            directory_id: data.directory_id,
            size_bytes: data.size_bytes,
            content_ref: data.content_ref.clone(),
            mime_type: data.mime_type.clone(),
            is_latest: true,
            previous_version_id: None,
            chain_id: id,
            version_number: 1,
            uploaded_by: data.uploaded_by,
            created_at: Utc::now(),
        };
        state.files.insert(id, file.clone());
        Ok(file)
    }

    async fn append_revision(&self, data: &ReviseFile) -> AppResult<File> {
        let previous_id = data.previous_version_id;
        let mut state = self.state.write().await;

        let previous = state
            .files
            .get(&previous_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("File {previous_id} not found")))?;

        // Compare-and-swap on the predecessor's latest flag, under the write lock.
        if !previous.is_latest {
            warn!(file_id = %previous_id, "Revision rejected: predecessor is no longer latest");
            return Err(AppError::conflict(format!(
                "File {previous_id} is no longer the latest version of its chain"
            )));
        }

        let revision = File {
            id: FileId::new(),
            name: data.name.clone().unwrap_or_else(|| previous.name.clone()),
            project_id: previous.project_id,
            directory_id: previous.directory_id,
            size_bytes: data.size_bytes,
            content_ref: data.content_ref.clone(),
            mime_type: data.mime_type.clone(),
            is_latest: true,
            previous_version_id: Some(previous.id),
            chain_id: previous.chain_id,
            version_number: previous.version_number + 1,
            uploaded_by: data.uploaded_by,
            created_at: Utc::now(),
        };

        if let Some(prev) = state.files.get_mut(&previous_id) {
            prev.is_latest = false;
        }
        state.files.insert(revision.id, revision.clone());

        debug!(
            chain_id = %revision.chain_id,
            version = revision.version_number,
            "Chain advanced"
        );
        Ok(revision)
    }

    async fn delete_chain(&self, chain_id: FileId) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.files.len();
        state.files.retain(|_, f| f.chain_id != chain_id);
        let removed = (before - state.files.len()) as u64;

        if removed == 0 {
            return Err(AppError::not_found(format!("File chain {chain_id} not found")));
        }
        Ok(removed)
    }
}
