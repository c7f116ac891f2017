use axum::{
    Json,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(error_code = ErrorCode::RouteNotFound.code(), %uri, "Route not found");
    let body = Json(ErrorResponse::new(ErrorCode::RouteNotFound.default_message()));
    (StatusCode::NOT_FOUND, body).into_response()
}
