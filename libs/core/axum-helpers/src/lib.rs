//! # Axum Helpers
//!
//! Utilities, middleware and helpers shared by Axum services.
//!
//! ## Modules
//!
//! - **[`errors`]**: typed error envelope and its wire mapping
//! - **[`validation`]**: `validator` results turned into structured errors
//! - **[`extractors`]**: UUID path and validated JSON extractors
//! - **[`http`]**: CORS, security headers, rate limiting, panic and timeout envelopes
//! - **[`server`]**: router assembly, health probes, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{cors::CorsConfig, server::ServerConfig};
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config, &CorsConfig::default())
//!         .await?
//!         .merge(health_router());
//!
//!     create_production_app(router, &config, config.shutdown_timeout(), async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

// Re-export HTTP middleware
pub use http::{RateLimit, create_cors_layer, rate_limit, security_headers};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorDetail, ErrorResponse};

pub use validation::{ValidationFailed, validate};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};
