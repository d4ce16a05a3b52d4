use core_config::{FromEnv, cors::CorsConfig, env_or_default, server::ServerConfig};

// Import database configs from the database library
use database::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub database: PostgresConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let log_level = env_or_default("LOG_LEVEL", "info");
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let cors = CorsConfig::from_env()?;
        let database = PostgresConfig::from_env()?; // Required - will fail if not set

        Ok(Self {
            environment,
            log_level,
            server,
            cors,
            database,
        })
    }
}
