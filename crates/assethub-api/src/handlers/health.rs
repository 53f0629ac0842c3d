//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = match &state.db_pool {
        None => None,
        Some(pool) => Some(match pool.health_check().await {
            Ok(true) => "connected".to_string(),
            _ => "unavailable".to_string(),
        }),
    };

    let status = if database.as_deref().is_some_and(|d| d != "connected") {
        "degraded"
    } else {
        "ok"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.config.store.backend.to_string(),
        database,
        uptime_seconds: state.started_at.elapsed().as_secs(),
    }))
}
