//! Closed set of error kinds shared by every layer.
//!
//! Each kind carries its wire identifier, its HTTP status and the generic
//! message used when the specific one must not leave the server.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//! use axum::http::StatusCode;
//!
//! let code = ErrorCode::NotFound;
//! assert_eq!(code.as_str(), "not_found");
//! assert_eq!(code.status(), StatusCode::NOT_FOUND);
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Bad input or failed field validation
    Invalid,
    /// Credentials are missing or invalid
    Unauthorized,
    /// Authenticated but not permitted
    Forbidden,
    /// The referenced resource does not exist
    NotFound,
    /// Request conflicts with current resource state
    Conflict,
    /// Client exceeded its request quota
    TooManyRequests,
    /// A dependency is temporarily unavailable
    Unavailable,
    /// Unexpected storage or infrastructure fault
    Internal,
}

impl ErrorCode {
    /// Wire identifier, identical to the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::TooManyRequests => "too_many_requests",
            Self::Unavailable => "unavailable",
            Self::Internal => "internal",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            Self::Invalid => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Invalid => "The request is invalid",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access forbidden",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::TooManyRequests => "Too many requests",
            Self::Unavailable => "Service is temporarily unavailable",
            Self::Internal => "An internal server error occurred",
        }
    }

    /// Server-side kinds never expose their specific message to clients.
    pub const fn is_server_error(self) -> bool {
        matches!(self, Self::Unavailable | Self::Internal)
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
