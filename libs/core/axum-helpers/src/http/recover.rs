//! Envelopes for failures raised by middleware rather than handlers:
//! a panicking handler and a request that ran past its deadline.

use crate::errors::{AppError, ErrorCode};
use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Map, json};
use std::any::Any;
use std::time::Duration;

/// Status `TimeoutLayer` answers with once the deadline passes.
pub const TIMEOUT_STATUS: StatusCode = StatusCode::SERVICE_UNAVAILABLE;

/// Panic handler for `CatchPanicLayer::custom`. The panic message is logged
/// with the `internal` envelope and never sent to the client.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    let mut context = Map::new();
    context.insert("panic".into(), json!(message));
    AppError::internal(format!("handler panicked: {message}"), context).into_response()
}

/// Rewrites the bodyless response `TimeoutLayer` produces into the
/// `unavailable` envelope. Every other response passes through.
pub async fn timeout_response(deadline: Duration, response: Response) -> Response {
    let from_timeout = response.status() == TIMEOUT_STATUS
        && !response.headers().contains_key(header::CONTENT_TYPE);
    if !from_timeout {
        return response;
    }

    AppError::new("request timed out", ErrorCode::Unavailable)
        .with_context("timeout_ms", deadline.as_millis() as u64)
        .into_response()
}
