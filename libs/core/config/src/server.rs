use crate::{env_or_default, env_parse, ConfigError, FromEnv};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for handling a single request
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes (applies to `/api`)
    pub max_body_size: usize,
    /// Requests allowed per client and path each minute
    pub rate_limit_per_minute: u32,
    /// Time granted to cleanup tasks once a shutdown signal arrives
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with sensible defaults:
    /// - HOST: defaults to 0.0.0.0 (all interfaces)
    /// - PORT: defaults to 8080
    /// - REQUEST_TIMEOUT_SECS: defaults to 10
    /// - MAX_BODY_SIZE: defaults to 1048576 (1 MiB)
    /// - RATE_LIMIT_PER_MINUTE: defaults to 100
    /// - SHUTDOWN_TIMEOUT_SECS: defaults to 30
    fn from_env() -> Result<Self, ConfigError> {
        let rate_limit_per_minute = env_parse("RATE_LIMIT_PER_MINUTE", "100")?;
        if rate_limit_per_minute == 0 {
            return Err(ConfigError::ParseError {
                key: "RATE_LIMIT_PER_MINUTE".to_string(),
                details: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            host: env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string()),
            port: env_parse("PORT", "8080")?,
            request_timeout_secs: env_parse("REQUEST_TIMEOUT_SECS", "10")?,
            max_body_size: env_parse("MAX_BODY_SIZE", "1048576")?,
            rate_limit_per_minute,
            shutdown_timeout_secs: env_parse("SHUTDOWN_TIMEOUT_SECS", "30")?,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 8080,
            request_timeout_secs: 10,
            max_body_size: 1_048_576,
            rate_limit_per_minute: 100,
            shutdown_timeout_secs: 30,
        }
    }
}
