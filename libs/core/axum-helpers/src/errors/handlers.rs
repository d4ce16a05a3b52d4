use axum::response::{IntoResponse, Response};

use super::{AppError, ErrorCode};

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    AppError::new("The requested resource was not found", ErrorCode::NotFound).into_response()
}
