use axum_helpers::server::create_production_app;
use core_config::tracing::{init_tracing, install_color_eyre};
use dojo_api::{AppState, Config, build_app};
use migration::Migrator;
use tracing::info;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment, &config.log_level);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    if config.database.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, "dojo_api")
            .await
            .map_err(|e| eyre::eyre!("Database migration failed: {}", e))?;
    }

    let state = AppState { config, db };
    let app = build_app(&state).await?;
    let shutdown_timeout = state.config.server.shutdown_timeout();

    info!(
        "Starting dojo API with graceful shutdown ({:?} timeout)",
        shutdown_timeout
    );

    let server_config = state.config.server.clone();
    create_production_app(app, &server_config, shutdown_timeout, async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Dojo API shutdown complete");
    Ok(())
}
