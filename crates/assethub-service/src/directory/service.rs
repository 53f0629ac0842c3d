//! Directory CRUD with project scoping and the mutation policy.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use assethub_auth::{Mutation, MutationPolicy};
use assethub_core::error::AppError;
use assethub_core::result::AppResult;
use assethub_core::types::filter::ScopeFilter;
use assethub_core::types::id::{DirectoryId, ProjectId};
use assethub_database::store::{DirectoryStore, SubtreeDeletion};
use assethub_entity::directory::{CreateDirectory, Directory, DirectoryQuery};
use assethub_entity::ordering::ListOrder;
use assethub_entity::normalize_name;

use crate::context::RequestContext;

/// Scoping parameters for a directory listing.
#[derive(Debug, Clone, Default)]
pub struct ListDirectoriesRequest {
    /// Project to list; required.
    pub project_id: Option<ProjectId>,
    /// Parent filter.
    pub parent: ScopeFilter<DirectoryId>,
    /// Case-insensitive name substring.
    pub search: Option<String>,
    /// Raw `ordering` parameter.
    pub ordering: Option<String>,
}

/// Request to create a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDirectoryRequest {
    /// Directory name.
    pub name: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Parent directory (None for top-level).
    pub parent_id: Option<DirectoryId>,
    /// Whether the client created this from the sidebar.
    #[serde(default)]
    pub is_sidebar_item: bool,
}

/// Manages the directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryService {
    directories: Arc<dyn DirectoryStore>,
    policy: MutationPolicy,
}

impl DirectoryService {
    /// Creates a new directory service.
    pub fn new(directories: Arc<dyn DirectoryStore>, policy: MutationPolicy) -> Self {
        Self {
            directories,
            policy,
        }
    }

    /// Lists directories of one project.
    ///
    /// Fails with `Validation` when no project is given.
    pub async fn list(&self, req: ListDirectoriesRequest) -> AppResult<Vec<Directory>> {
        let project_id = req
            .project_id
            .ok_or_else(|| AppError::validation("project is required"))?;

        let mut query = DirectoryQuery::in_project(project_id).with_parent(req.parent);
        if let Some(term) = req.search.filter(|s| !s.trim().is_empty()) {
            query = query.with_search(term.trim());
        }
        query.order = ListOrder::parse(req.ordering.as_deref())?;

        self.directories.list(&query).await
    }

    /// Gets a directory by ID.
    pub async fn get(&self, id: DirectoryId) -> AppResult<Directory> {
        self.directories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Directory {id} not found")))
    }

    /// Creates a directory.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateDirectoryRequest,
    ) -> AppResult<Directory> {
        self.policy.authorize(
            &ctx.caller,
            Mutation::CreateDirectory {
                sidebar: req.is_sidebar_item,
            },
        )?;

        let name = normalize_name(&req.name)
            .map_err(|e| AppError::validation(format!("Invalid directory name: {e}")))?;

        if let Some(parent_id) = req.parent_id {
            self.require_parent(parent_id, req.project_id).await?;
        }

        let directory = self
            .directories
            .create(&CreateDirectory {
                name,
                project_id: req.project_id,
                parent_id: req.parent_id,
                created_by: ctx.user_id(),
            })
            .await?;

        info!(
            request_id = %ctx.request_id,
            directory_id = %directory.id,
            project_id = %directory.project_id,
            parent_id = ?directory.parent_id,
            "Directory created"
        );

        Ok(directory)
    }

    /// Moves a directory under a new parent, or to the top level.
    pub async fn move_directory(
        &self,
        ctx: &RequestContext,
        id: DirectoryId,
        new_parent_id: Option<DirectoryId>,
    ) -> AppResult<Directory> {
        self.policy.authorize(&ctx.caller, Mutation::MoveDirectory)?;

        let directory = self.get(id).await?;

        if let Some(parent_id) = new_parent_id {
            self.require_parent(parent_id, directory.project_id).await?;

            let ancestry = self.directories.ancestor_ids(parent_id).await?;
            if ancestry.contains(&id) {
                return Err(AppError::validation(format!(
                    "Cannot move directory {id} into itself or one of its descendants"
                )));
            }
        }

        let moved = self.directories.reparent(id, new_parent_id).await?;

        info!(
            request_id = %ctx.request_id,
            directory_id = %id,
            parent_id = ?new_parent_id,
            "Directory moved"
        );

        Ok(moved)
    }

    /// Deletes a directory, its descendants, and every file inside them.
    pub async fn delete(&self, ctx: &RequestContext, id: DirectoryId) -> AppResult<SubtreeDeletion> {
        self.policy.authorize(&ctx.caller, Mutation::DeleteDirectory)?;

        let removed = self.directories.delete_subtree(id).await?;

        info!(
            request_id = %ctx.request_id,
            directory_id = %id,
            directories = removed.directories,
            files = removed.files,
            "Directory subtree deleted"
        );

        Ok(removed)
    }

    async fn require_parent(&self, parent_id: DirectoryId, project_id: ProjectId) -> AppResult<()> {
        let parent = self
            .directories
            .find_by_id(parent_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Parent directory {parent_id} not found")))?;

        if parent.project_id != project_id {
            return Err(AppError::validation(format!(
                "Parent directory {parent_id} does not belong to project {project_id}"
            )));
        }
        Ok(())
    }
}
