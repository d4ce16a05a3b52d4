//! JSON extractor that runs the validation gateway after decoding.

use crate::errors::{AppError, ErrorCode};
use crate::validation::validate;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Decode failures (malformed JSON, wrong content type, oversized body)
/// and constraint violations are both reported as `invalid`.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::post;
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateCourse {
///     #[validate(length(min = 1, code = "required"))]
///     title: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateCourse>) -> String {
///     format!("Creating course: {}", payload.title)
/// }
///
/// let app = Router::new().route("/courses", post(create));
/// ```
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await.map_err(|e| {
            AppError::wrap(e, "invalid request body", ErrorCode::Invalid)
                .with_context("reason", "failed to decode request body")
        })?;

        validate(&data)?;

        Ok(ValidatedJson(data))
    }
}
