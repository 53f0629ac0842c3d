//! `CallerContext` extractor. Resolves the optional bearer token into a request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use assethub_core::error::AppError;
use assethub_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller behind a request, anonymous or authenticated.
///
/// A request without an `Authorization` header is anonymous. A header that
/// is present but malformed, or carries an invalid token, is rejected with
/// `401` rather than downgraded to anonymous.
#[derive(Debug, Clone)]
pub struct CallerContext(pub RequestContext);

impl std::ops::Deref for CallerContext {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for CallerContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTHORIZATION) {
            None => None,
            Some(value) => {
                let header = value
                    .to_str()
                    .map_err(|_| AppError::unauthorized("Invalid Authorization header"))?;
                let token = header
                    .strip_prefix("Bearer ")
                    .ok_or_else(|| AppError::unauthorized("Invalid Authorization header format"))?;
                Some(token.trim())
            }
        };

        let caller = state.jwt_decoder.resolve(token)?;
        Ok(CallerContext(RequestContext::new(caller)))
    }
}
