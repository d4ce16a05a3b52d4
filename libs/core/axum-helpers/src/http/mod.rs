//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS configuration
//! - Security headers
//! - Per-client rate limiting
//! - Panic and timeout envelopes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{RateLimit, create_cors_layer, rate_limit, security_headers};
//!
//! let app = Router::new()
//!     .layer(axum::middleware::from_fn(security_headers))
//!     .layer(axum::middleware::from_fn_with_state(limit, rate_limit))
//!     .layer(create_cors_layer(&cors_config)?);
//! ```

pub mod cors;
pub mod rate_limit;
pub mod recover;
pub mod security;

pub use cors::create_cors_layer;
pub use rate_limit::{Allowance, RateLimit, client_ip, rate_limit};
pub use recover::{panic_response, timeout_response};
pub use security::security_headers;
