//! Directory entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use assethub_core::types::id::{DirectoryId, ProjectId, UserId};

/// A directory in a project's tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Directory {
    /// Unique directory identifier.
    pub id: DirectoryId,
    /// Directory name.
    pub name: String,
    /// The project this directory belongs to.
    pub project_id: ProjectId,
    /// Parent directory in the same project (None for top-level).
    pub parent_id: Option<DirectoryId>,
    /// The user who created it. None for anonymous sidebar creation.
    pub created_by: Option<UserId>,
    /// When the directory was created.
    pub created_at: DateTime<Utc>,
}

impl Directory {
    /// Check if this is a top-level directory (no parent).
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDirectory {
    /// Directory name, already normalized.
    pub name: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Parent directory (None for top-level).
    pub parent_id: Option<DirectoryId>,
    /// Creator, if authenticated.
    pub created_by: Option<UserId>,
}
