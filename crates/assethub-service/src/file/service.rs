//! File chain CRUD: upload, revise, list, and delete.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use assethub_auth::{Mutation, MutationPolicy};
use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::filter::ScopeFilter;
use assethub_core::types::id::{DirectoryId, FileId, ProjectId};
use assethub_database::store::{DirectoryStore, FileStore};
use assethub_entity::file::{CreateFile, File, FileQuery, ReviseFile};
use assethub_entity::normalize_name;
use assethub_entity::ordering::ListOrder;

use crate::context::RequestContext;

/// Scoping parameters for a file listing.
#[derive(Debug, Clone, Default)]
pub struct ListFilesRequest {
    /// Project to list; required.
    pub project_id: Option<ProjectId>,
    /// Directory filter.
    pub directory: ScopeFilter<DirectoryId>,
    /// Only current versions. Defaults to true.
    pub latest_only: Option<bool>,
    /// Case-insensitive name substring.
    pub search: Option<String>,
    /// Raw `ordering` parameter.
    pub ordering: Option<String>,
}

/// Request to upload the first version of a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRequest {
    /// File name.
    pub name: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Containing directory (None for the project root).
    pub directory_id: Option<DirectoryId>,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// Opaque payload reference.
    pub content_ref: String,
    /// MIME type.
    pub mime_type: Option<String>,
}

/// Request to supersede a chain's latest record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviseFileRequest {
    /// New name; keeps the predecessor's when absent.
    pub name: Option<String>,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// Opaque payload reference.
    pub content_ref: String,
    /// MIME type.
    pub mime_type: Option<String>,
}

/// Manages file chains.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<dyn FileStore>,
    directories: Arc<dyn DirectoryStore>,
    policy: MutationPolicy,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        directories: Arc<dyn DirectoryStore>,
        policy: MutationPolicy,
    ) -> Self {
        Self {
            files,
            directories,
            policy,
        }
    }

    /// Lists file records of one project.
    ///
    /// Fails with `Validation` when no project is given.
    pub async fn list(&self, req: ListFilesRequest) -> AppResult<Vec<File>> {
        let project_id = req
            .project_id
            .ok_or_else(|| AppError::validation("project is required"))?;

        let mut query = FileQuery::in_project(project_id)
            .with_directory(req.directory)
            .latest_only(req.latest_only.unwrap_or(true));
        if let Some(term) = req.search.filter(|s| !s.trim().is_empty()) {
            query = query.with_search(term.trim());
        }
        query.order = ListOrder::parse(req.ordering.as_deref())?;

        self.files.list(&query).await
    }

    /// Gets a single file record by ID.
    pub async fn get(&self, id: FileId) -> AppResult<File> {
        self.files
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Uploads the first version of a file, starting a new chain.
    pub async fn create(&self, ctx: &RequestContext, req: CreateFileRequest) -> AppResult<File> {
        self.policy.authorize(&ctx.caller, Mutation::CreateFile)?;

        let name = normalize_name(&req.name)
            .map_err(|e| AppError::validation(format!("Invalid file name: {e}")))?;
        validate_payload(req.size_bytes, &req.content_ref)?;

        if let Some(directory_id) = req.directory_id {
            let directory = self
                .directories
                .find_by_id(directory_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Directory {directory_id} not found")))?;
            if directory.project_id != req.project_id {
                return Err(AppError::validation(format!(
                    "Directory {directory_id} does not belong to project {}",
                    req.project_id
                )));
            }
        }

        let file = self
            .files
            .create_root(&CreateFile {
                name,
                project_id: req.project_id,
                directory_id: req.directory_id,
                size_bytes: req.size_bytes,
                content_ref: req.content_ref,
                mime_type: req.mime_type,
                uploaded_by: ctx.user_id(),
            })
            .await?;

        info!(
            request_id = %ctx.request_id,
            file_id = %file.id,
            project_id = %file.project_id,
            directory_id = ?file.directory_id,
            "File uploaded"
        );

        Ok(file)
    }

    /// Supersedes `previous_id` with a new version.
    ///
    /// `previous_id` must still be the chain's latest record; otherwise the
    /// call fails with `Conflict` and the caller may refetch and retry.
    pub async fn revise(
        &self,
        ctx: &RequestContext,
        previous_id: FileId,
        req: ReviseFileRequest,
    ) -> AppResult<File> {
        self.policy.authorize(&ctx.caller, Mutation::ReviseFile)?;

        let name = req
            .name
            .as_deref()
            .map(normalize_name)
            .transpose()
            .map_err(|e| AppError::validation(format!("Invalid file name: {e}")))?;
        validate_payload(req.size_bytes, &req.content_ref)?;

        let revision = self
            .files
            .append_revision(&ReviseFile {
                previous_version_id: previous_id,
                name,
                size_bytes: req.size_bytes,
                content_ref: req.content_ref,
                mime_type: req.mime_type,
                uploaded_by: ctx.user_id(),
            })
            .await?;

        info!(
            request_id = %ctx.request_id,
            file_id = %revision.id,
            previous_id = %previous_id,
            chain_id = %revision.chain_id,
            version = revision.version_number,
            "File revised"
        );

        Ok(revision)
    }

    /// Deletes every version of the chain containing `id`.
    pub async fn delete(&self, ctx: &RequestContext, id: FileId) -> AppResult<u64> {
        self.policy.authorize(&ctx.caller, Mutation::DeleteFile)?;

        let file = self.get(id).await?;
        let removed = self.files.delete_chain(file.chain_id).await?;

        info!(
            request_id = %ctx.request_id,
            chain_id = %file.chain_id,
            versions = removed,
            "File chain deleted"
        );

        Ok(removed)
    }
}

fn validate_payload(size_bytes: i64, content_ref: &str) -> AppResult<()> {
    if size_bytes < 0 {
        return Err(AppError::validation("size cannot be negative"));
    }
    if content_ref.trim().is_empty() {
        return Err(AppError::validation("content_ref cannot be empty"));
    }
    Ok(())
}
