use axum::response::{IntoResponse, Response};

use super::{AppError, ErrorCode};

/// Router fallback for unmatched paths
pub async fn not_found() -> Response {
    AppError::NotFound(ErrorCode::NotFound.default_message().to_string()).into_response()
}

/// Fallback for routes that exist under a different method
pub async fn method_not_allowed() -> Response {
    AppError::MethodNotAllowed.into_response()
}
