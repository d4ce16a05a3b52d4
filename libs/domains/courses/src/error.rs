use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course description cannot be empty")]
    EmptyDescription,

    #[error("course not found")]
    NotFound,

    /// Any other failure, already shaped as an [`AppError`].
    #[error(transparent)]
    Fault(#[from] AppError),
}

pub type CourseResult<T> = Result<T, CourseError>;

impl CourseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CourseError::EmptyTitle | CourseError::EmptyDescription => ErrorCode::Invalid,
            CourseError::NotFound => ErrorCode::NotFound,
            CourseError::Fault(e) => e.code(),
        }
    }

    /// The innermost course error kind, looking through `Fault` wrappers.
    ///
    /// `None` when the failure did not originate from a course rule.
    pub fn sentinel(&self) -> Option<&CourseError> {
        match self {
            CourseError::Fault(e) => e.find_cause::<CourseError>().and_then(CourseError::sentinel),
            kind => Some(kind),
        }
    }
}

/// Convert CourseError to AppError for standardized error responses
impl From<CourseError> for AppError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::Fault(e) => e,
            kind => {
                let code = kind.code();
                let message = kind.to_string();
                AppError::wrap(kind, message, code)
            }
        }
    }
}

impl IntoResponse for CourseError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
