use axum::Router;
use axum::routing::get;

pub mod courses;
pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest("/v1/courses", courses::router(state))
}

/// Creates a router with the `/readyz` endpoint.
///
/// It has state applied so it can be merged with the stateless router from
/// `create_router`, which keeps it outside the API middleware.
pub fn ready_router(state: crate::state::AppState) -> Router {
    Router::new()
        .route("/readyz", get(health::ready_handler))
        .with_state(state)
}
