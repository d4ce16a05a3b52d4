//! Application state management.
//!
//! The state is built once at startup and cloned into the routers that need
//! it. Clones share the same connection pool.

use database::postgres::DatabaseConnection;

use crate::config::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    /// PostgreSQL database connection pool
    pub db: DatabaseConnection,
}
