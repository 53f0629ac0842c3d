//! Mesh conversion handler.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};

use assethub_core::error::AppError;

use crate::dto::request::ConvertParams;
use crate::error::ApiError;
use crate::extractors::CallerContext;
use crate::state::AppState;

/// POST /api/convert-obj?name=cube.obj
///
/// The raw request body is the OBJ payload; the response body is the glTF.
pub async fn convert_obj(
    State(state): State<AppState>,
    caller: CallerContext,
    Query(params): Query<ConvertParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let name = params
        .name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::validation("name is required"))?;

    let output = state
        .conversion_service
        .convert(&caller, name.trim(), body)
        .await?;

    let content_type = HeaderValue::try_from(output.mime_type)
        .map_err(|_| AppError::internal("Converter returned an invalid content type"))?;
    let disposition = HeaderValue::try_from(format!(
        "attachment; filename=\"{}\"",
        output.file_name.replace('"', "")
    ))
    .map_err(|_| AppError::validation("name cannot be used as a download file name"))?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        output.payload,
    )
        .into_response())
}
