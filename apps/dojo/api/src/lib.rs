//! Dojo API
//!
//! HTTP service for managing courses.
//!
//! ## Architecture
//!
//! ```text
//! Client
//!   ↓ (JSON over HTTP)
//! axum router + middleware (axum-helpers)
//!   ↓
//! course handlers (domain_courses::handlers)
//!   ↓
//! CourseService (domain layer)
//!   ↓
//! PgCourseRepository (persistence)
//!   ↓
//! PostgreSQL
//! ```
//!
//! ## Modules
//!
//! - `config`: environment-driven configuration
//! - `state`: shared application state
//! - `api`: route composition and the readiness probe
//! - `openapi`: the served OpenAPI document

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

pub use config::Config;
pub use state::AppState;

use axum::Router;
use axum_helpers::server::{create_router, health_router};

/// Full application router: API, docs, probes and middleware.
///
/// - `/api/v1/courses`: course endpoints behind the API middleware
/// - `/`, `/healthz`, `/ping`: liveness endpoints
/// - `/readyz`: readiness check against the database
pub async fn build_app(state: &AppState) -> std::io::Result<Router> {
    let api_routes = api::routes(state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(
        api_routes,
        &state.config.server,
        &state.config.cors,
    )
    .await?;

    Ok(router
        .merge(health_router())
        .merge(api::ready_router(state.clone())))
}
