//! File entity model.
//!
//! Every upload is its own `File` row. Rows of one logical file form a
//! chain: the first upload is the chain root, and each revision points
//! back at the record it supersedes through `previous_version_id`. The
//! chain is linear, and exactly one row per chain has `is_latest = true`.
//!
//! Each row also carries `chain_id` (the root's id) and a dense
//! `version_number` starting at 1, so "latest" and "history" can be
//! answered by equality queries and a revision race reduces to one
//! conditional update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use assethub_core::types::id::{DirectoryId, FileId, ProjectId, UserId};

/// One version of a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique record identifier.
    pub id: FileId,
    /// File name (including extension).
    pub name: String,
    /// The project this file belongs to.
    pub project_id: ProjectId,
    /// Containing directory. None means the project root.
    pub directory_id: Option<DirectoryId>,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// Opaque reference to the stored payload.
    pub content_ref: String,
    /// MIME type of the payload, if known.
    pub mime_type: Option<String>,
    /// Whether this record is the chain's current version.
    pub is_latest: bool,
    /// The record this one supersedes. None for a chain root.
    pub previous_version_id: Option<FileId>,
    /// Id of the chain root.
    pub chain_id: FileId,
    /// 1-based position in the chain.
    pub version_number: i32,
    /// Uploader, if authenticated.
    pub uploaded_by: Option<UserId>,
    /// When this version was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to upload the first version of a file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// File name, already normalized.
    pub name: String,
    /// Owning project.
    pub project_id: ProjectId,
    /// Containing directory (None for the project root).
    pub directory_id: Option<DirectoryId>,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// Opaque reference to the stored payload.
    pub content_ref: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Uploader.
    pub uploaded_by: Option<UserId>,
}

/// Data required to supersede the current latest version of a chain.
///
/// Project, directory, and chain are inherited from the predecessor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviseFile {
    /// The record being superseded. Must still be the chain's latest.
    pub previous_version_id: FileId,
    /// New name, or None to keep the predecessor's.
    pub name: Option<String>,
    /// Payload size in bytes.
    pub size_bytes: i64,
    /// Opaque reference to the stored payload.
    pub content_ref: String,
    /// MIME type.
    pub mime_type: Option<String>,
    /// Uploader.
    pub uploaded_by: Option<UserId>,
}
