pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::error::Error as StdError;
use thiserror::Error;
use utoipa::ToSchema;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Standard error response body.
///
/// Returned for every failed request:
/// - `message`: human-readable message (generic for server-side codes)
/// - `code`: machine-readable kind, see [`ErrorCode`]
/// - `details`: per-field failures, omitted when empty
///
/// # JSON Example
///
/// ```json
/// {
///   "message": "Request validation failed",
///   "code": "invalid",
///   "details": [
///     {
///       "message": "validation failed on field 'title'",
///       "code": "invalid",
///       "context": { "field": "title", "tag": "required", "param": "min=1" }
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

/// One entry of [`ErrorResponse::details`].
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub message: String,
    pub code: ErrorCode,
    #[schema(value_type = Object)]
    pub context: Map<String, Value>,
}

/// Typed error envelope used from the domain model up to the HTTP boundary.
///
/// Carries a message, a closed-set [`ErrorCode`], an optional wrapped
/// cause, a key-value context for server-side logging and an ordered list
/// of sub-errors for multi-field failures.
///
/// ```rust
/// use axum_helpers::{AppError, ErrorCode};
///
/// let err = AppError::new("course not found", ErrorCode::NotFound)
///     .with_context("course_id", "0190c3a4-0000-7000-8000-000000000000");
/// let (status, body) = err.to_response();
/// assert_eq!(status.as_u16(), 404);
/// assert_eq!(body.message, "course not found");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AppError {
    message: String,
    code: ErrorCode,
    #[source]
    source: Option<BoxError>,
    context: Map<String, Value>,
    details: Vec<AppError>,
}

impl AppError {
    pub fn new(message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            code,
            source: None,
            context: Map::new(),
            details: Vec::new(),
        }
    }

    /// Wrap `source` under a new message and code.
    pub fn wrap<E>(source: E, message: impl Into<String>, code: ErrorCode) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            source: Some(source.into()),
            ..Self::new(message, code)
        }
    }

    /// Unexpected failure. The message is always the generic internal one.
    pub fn internal<E>(source: E, context: Map<String, Value>) -> Self
    where
        E: Into<BoxError>,
    {
        Self {
            context,
            ..Self::wrap(
                source,
                ErrorCode::Internal.default_message(),
                ErrorCode::Internal,
            )
        }
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_details(mut self, details: Vec<AppError>) -> Self {
        self.details = details;
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    pub fn details(&self) -> &[AppError] {
        &self.details
    }

    /// First error of type `E` in the source chain.
    pub fn find_cause<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        let mut current = self
            .source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static));
        while let Some(err) = current {
            if let Some(found) = err.downcast_ref::<E>() {
                return Some(found);
            }
            current = err.source();
        }
        None
    }

    /// Maps the error to its wire status and body.
    pub fn to_response(&self) -> (StatusCode, ErrorResponse) {
        let body = ErrorResponse {
            message: self.public_message().to_string(),
            code: self.code,
            details: self.details.iter().map(AppError::to_detail).collect(),
        };
        (self.code.status(), body)
    }

    fn public_message(&self) -> &str {
        if self.code.is_server_error() {
            self.code.default_message()
        } else {
            &self.message
        }
    }

    fn to_detail(&self) -> ErrorDetail {
        ErrorDetail {
            message: self.public_message().to_string(),
            code: self.code,
            context: self.context.clone(),
        }
    }

    /// `message: cause: cause ...`
    fn chain(&self) -> String {
        let mut out = self.message.clone();
        let mut current = StdError::source(self);
        while let Some(err) = current {
            out.push_str(": ");
            out.push_str(&err.to_string());
            current = err.source();
        }
        out
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_response();
        let context = Value::Object(self.context.clone());

        if status.is_server_error() {
            tracing::error!(
                error_code = %self.code,
                context = %context,
                "{}",
                self.chain()
            );
        } else if status == StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!(error_code = %self.code, context = %context, "{}", self.message);
        } else {
            tracing::info!(error_code = %self.code, context = %context, "{}", self.message);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Error)]
    #[error("connection reset")]
    struct ConnectionReset;

    #[test]
    fn test_new_uses_message_and_code() {
        let err = AppError::new("course not found", ErrorCode::NotFound);
        assert_eq!(err.message(), "course not found");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(StdError::source(&err).is_none());
        assert_eq!(err.to_string(), "course not found");
    }

    #[test]
    fn test_wrap_keeps_source_reachable() {
        let err = AppError::wrap(ConnectionReset, "failed to fetch course", ErrorCode::Internal);
        assert!(err.find_cause::<ConnectionReset>().is_some());
        assert_eq!(err.chain(), "failed to fetch course: connection reset");
    }

    #[test]
    fn test_find_cause_walks_nested_app_errors() {
        let inner = AppError::wrap(ConnectionReset, "query failed", ErrorCode::Internal);
        let outer = AppError::wrap(inner, "request failed", ErrorCode::Internal);
        assert!(outer.find_cause::<ConnectionReset>().is_some());
        assert_eq!(
            outer.find_cause::<AppError>().map(AppError::message),
            Some("query failed")
        );
    }

    #[test]
    fn test_find_cause_returns_none_without_match() {
        let err = AppError::new("plain", ErrorCode::Invalid);
        assert!(err.find_cause::<ConnectionReset>().is_none());
    }

    #[test]
    fn test_internal_hides_message_and_context() {
        let mut ctx = Map::new();
        ctx.insert("operation".into(), json!("insert"));
        let err = AppError::internal(ConnectionReset, ctx);

        assert_eq!(err.context()["operation"], json!("insert"));

        let (status, body) = err.to_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "message": "An internal server error occurred",
                "code": "internal",
            })
        );
    }

    #[test]
    fn test_server_codes_never_leak_specific_message() {
        let err = AppError::new("pool exhausted on db-2", ErrorCode::Unavailable);
        let (status, body) = err.to_response();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.message, ErrorCode::Unavailable.default_message());
    }

    #[test]
    fn test_details_serialize_with_context() {
        let detail = AppError::new("validation failed on field 'title'", ErrorCode::Invalid)
            .with_context("field", "title")
            .with_context("tag", "required");
        let err = AppError::new("Request validation failed", ErrorCode::Invalid)
            .with_context("request", "create")
            .with_details(vec![detail]);

        let (status, body) = err.to_response();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "message": "Request validation failed",
                "code": "invalid",
                "details": [{
                    "message": "validation failed on field 'title'",
                    "code": "invalid",
                    "context": { "field": "title", "tag": "required" }
                }]
            })
        );
    }

    #[test]
    fn test_into_response_sets_status() {
        let response = AppError::new("slow down", ErrorCode::TooManyRequests).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
