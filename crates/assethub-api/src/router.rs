//! Route definitions for the AssetHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    let max_convert = usize::try_from(state.config.conversion.max_input_bytes).unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(directory_routes())
        .merge(file_routes())
        .merge(convert_routes(max_convert));

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Health probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Directory tree CRUD and move
fn directory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/directories",
            get(handlers::directory::list_directories).post(handlers::directory::create_directory),
        )
        .route(
            "/directories/{id}",
            get(handlers::directory::get_directory).delete(handlers::directory::delete_directory),
        )
        .route(
            "/directories/{id}/move",
            put(handlers::directory::move_directory),
        )
}

/// File chains, revisions, and history
fn file_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/files",
            get(handlers::file::list_files).post(handlers::file::create_file),
        )
        .route(
            "/files/{id}",
            get(handlers::file::get_file).delete(handlers::file::delete_file),
        )
        .route("/files/{id}/revisions", post(handlers::file::revise_file))
        .route("/files/{id}/versions", get(handlers::file::list_versions))
        .route("/files/{id}/latest", get(handlers::file::latest_version))
}

/// OBJ → glTF conversion
fn convert_routes(max_body: usize) -> Router<AppState> {
    Router::new()
        .route("/convert-obj", post(handlers::convert::convert_obj))
        .layer(DefaultBodyLimit::max(max_body))
}
