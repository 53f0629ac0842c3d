//! Directory tree handlers.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use assethub_core::types::id::DirectoryId;
use assethub_database::store::SubtreeDeletion;
use assethub_entity::directory::Directory;
use assethub_service::directory::service::{
    CreateDirectoryRequest as SvcCreateDirectory, ListDirectoriesRequest,
};

use crate::dto::request::{
    CreateDirectoryRequest, ListDirectoriesParams, MoveDirectoryRequest, parse_project,
    parse_scope, validate_body,
};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{CallerContext, IdPath};
use crate::state::AppState;

/// GET /api/directories?project=...&parent=...
pub async fn list_directories(
    State(state): State<AppState>,
    Query(params): Query<ListDirectoriesParams>,
) -> Result<Json<ApiResponse<Vec<Directory>>>, ApiError> {
    let directories = state
        .directory_service
        .list(ListDirectoriesRequest {
            project_id: parse_project(params.project.as_deref())?,
            parent: parse_scope("parent", params.parent.as_deref())?,
            search: params.search,
            ordering: params.ordering,
        })
        .await?;

    Ok(Json(ApiResponse::ok(directories)))
}

/// GET /api/directories/{id}
pub async fn get_directory(
    State(state): State<AppState>,
    IdPath(id): IdPath<DirectoryId>,
) -> Result<Json<ApiResponse<Directory>>, ApiError> {
    let directory = state.directory_service.get(id).await?;
    Ok(Json(ApiResponse::ok(directory)))
}

/// POST /api/directories
pub async fn create_directory(
    State(state): State<AppState>,
    caller: CallerContext,
    Json(req): Json<CreateDirectoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Directory>>), ApiError> {
    validate_body(&req)?;

    let directory = state
        .directory_service
        .create(
            &caller,
            SvcCreateDirectory {
                name: req.name,
                project_id: req.project,
                parent_id: req.parent,
                is_sidebar_item: req.is_sidebar_item,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(directory))))
}

/// PUT /api/directories/{id}/move
pub async fn move_directory(
    State(state): State<AppState>,
    caller: CallerContext,
    IdPath(id): IdPath<DirectoryId>,
    Json(req): Json<MoveDirectoryRequest>,
) -> Result<Json<ApiResponse<Directory>>, ApiError> {
    let directory = state
        .directory_service
        .move_directory(&caller, id, req.parent)
        .await?;
    Ok(Json(ApiResponse::ok(directory)))
}

/// DELETE /api/directories/{id}
pub async fn delete_directory(
    State(state): State<AppState>,
    caller: CallerContext,
    IdPath(id): IdPath<DirectoryId>,
) -> Result<Json<ApiResponse<SubtreeDeletion>>, ApiError> {
    let removed = state.directory_service.delete(&caller, id).await?;
    Ok(Json(ApiResponse::ok(removed)))
}
