//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use assethub_core::error::AppError;
use assethub_core::types::filter::ScopeFilter;
use assethub_core::types::id::{DirectoryId, ProjectId};

/// Run `validator` rules and fold failures into a `Validation` error.
pub fn validate_body<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))
}

/// Create directory request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDirectoryRequest {
    /// Directory name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Owning project.
    pub project: ProjectId,
    /// Parent directory.
    #[serde(default)]
    pub parent: Option<DirectoryId>,
    /// Set by the sidebar's quick-create control.
    #[serde(default)]
    pub is_sidebar_item: bool,
}

/// Move directory request body. A `null` parent moves to the top level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveDirectoryRequest {
    /// New parent directory.
    #[serde(default)]
    pub parent: Option<DirectoryId>,
}

/// Upload request body for the first version of a file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFileRequest {
    /// File name.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    /// Owning project.
    pub project: ProjectId,
    /// Containing directory.
    #[serde(default)]
    pub directory: Option<DirectoryId>,
    /// Payload size in bytes.
    #[validate(range(min = 0, message = "Size cannot be negative"))]
    pub size: i64,
    /// Opaque payload reference.
    #[validate(length(min = 1, message = "content_ref is required"))]
    pub content_ref: String,
    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Revision request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReviseFileRequest {
    /// New name; keeps the current one when omitted.
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[serde(default)]
    pub name: Option<String>,
    /// Payload size in bytes.
    #[validate(range(min = 0, message = "Size cannot be negative"))]
    pub size: i64,
    /// Opaque payload reference.
    #[validate(length(min = 1, message = "content_ref is required"))]
    pub content_ref: String,
    /// MIME type.
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// `GET /api/directories` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDirectoriesParams {
    /// Project id.
    pub project: Option<String>,
    /// Parent id or `null`.
    pub parent: Option<String>,
    /// Name substring.
    pub search: Option<String>,
    /// `name`, `-name`, `created_at`, `-created_at`.
    pub ordering: Option<String>,
}

/// `GET /api/files` query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListFilesParams {
    /// Project id.
    pub project: Option<String>,
    /// Directory id or `null`.
    pub directory: Option<String>,
    /// `true` (default) to list only latest versions.
    pub latest_only: Option<String>,
    /// Name substring.
    pub search: Option<String>,
    /// `name`, `created_at`, `size`, each optionally prefixed with `-`.
    pub ordering: Option<String>,
}

/// `POST /api/convert-obj` query string.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertParams {
    /// Original file name.
    pub name: Option<String>,
}

/// Parse an optional project id. Absence (or a blank value) is left for the
/// service to reject.
pub fn parse_project(raw: Option<&str>) -> Result<Option<ProjectId>, AppError> {
    raw.map(str::trim).filter(|value| !value.is_empty()).map(|value| {
        value
            .parse::<ProjectId>()
            .map_err(|_| AppError::validation("Invalid project: expected an identifier"))
    })
    .transpose()
}

/// Parse a `parent`/`directory` parameter.
pub fn parse_scope(field: &str, raw: Option<&str>) -> Result<ScopeFilter<DirectoryId>, AppError> {
    ScopeFilter::parse(field, raw)
}

/// Only a case-insensitive `true` enables the latest-only filter.
pub fn parse_latest_only(raw: Option<&str>) -> Option<bool> {
    raw.map(|value| value.trim().eq_ignore_ascii_case("true"))
}
