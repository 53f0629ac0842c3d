//! File version chain handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use assethub_core::types::id::FileId;
use assethub_entity::file::File;
use assethub_service::file::service::{
    CreateFileRequest as SvcCreateFile, ListFilesRequest, ReviseFileRequest as SvcReviseFile,
};

use crate::dto::request::{
    CreateFileRequest, ListFilesParams, ReviseFileRequest, parse_latest_only, parse_project,
    parse_scope, validate_body,
};
use crate::dto::response::{ApiResponse, DeletedChainResponse};
use crate::error::ApiError;
use crate::extractors::{CallerContext, IdPath};
use crate::state::AppState;

/// GET /api/files?project=...&directory=...&latest_only=...
pub async fn list_files(
    State(state): State<AppState>,
    Query(params): Query<ListFilesParams>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let files = state
        .file_service
        .list(ListFilesRequest {
            project_id: parse_project(params.project.as_deref())?,
            directory: parse_scope("directory", params.directory.as_deref())?,
            latest_only: parse_latest_only(params.latest_only.as_deref()),
            search: params.search,
            ordering: params.ordering,
        })
        .await?;

    Ok(Json(ApiResponse::ok(files)))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    IdPath(id): IdPath<FileId>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let file = state.file_service.get(id).await?;
    Ok(Json(ApiResponse::ok(file)))
}

/// POST /api/files
pub async fn create_file(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<CreateFileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<File>>), ApiError> {
    validate_body(&req)?;

    let file = state
        .file_service
        .create(
            &caller,
            SvcCreateFile {
                name: req.name,
                project_id: req.project,
                directory_id: req.directory,
                size_bytes: req.size,
                content_ref: req.content_ref,
                mime_type: req.mime_type,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// POST /api/files/{id}/revisions
pub async fn revise_file(
    State(state): State<AppState>,
    caller: CallerContext,
    IdPath(id): IdPath<FileId>,
    Json(req): Json<ReviseFileRequest>,
) -> Result<(StatusCode, Json<ApiResponse<File>>), ApiError> {
    validate_body(&req)?;

    let file = state
        .file_service
        .revise(
            &caller,
            id,
            SvcReviseFile {
                name: req.name,
                size_bytes: req.size,
                content_ref: req.content_ref,
                mime_type: req.mime_type,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(file))))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    caller: CallerContext,
    IdPath(id): IdPath<FileId>,
) -> Result<Json<ApiResponse<DeletedChainResponse>>, ApiError> {
    let versions = state.file_service.delete(&caller, id).await?;
    Ok(Json(ApiResponse::ok(DeletedChainResponse { versions })))
}

/// GET /api/files/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    IdPath(id): IdPath<FileId>,
) -> Result<Json<ApiResponse<Vec<File>>>, ApiError> {
    let versions = state.version_resolver.list_versions(id).await?;
    Ok(Json(ApiResponse::ok(versions)))
}

/// GET /api/files/{id}/latest
pub async fn latest_version(
    State(state): State<AppState>,
    IdPath(id): IdPath<FileId>,
) -> Result<Json<ApiResponse<File>>, ApiError> {
    let latest = state.version_resolver.latest_version(id).await?;
    Ok(Json(ApiResponse::ok(latest)))
}
