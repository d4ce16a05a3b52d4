use crate::{env_list, env_parse, ConfigError, FromEnv};

/// Cross-origin policy applied to every route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub allow_credentials: bool,
}

impl CorsConfig {
    /// `*` in the origin list means any origin.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_methods: ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
                .map(String::from)
                .to_vec(),
            allowed_headers: ["Content-Type", "Authorization"].map(String::from).to_vec(),
            exposed_headers: Vec::new(),
            allow_credentials: true,
        }
    }
}

impl FromEnv for CorsConfig {
    /// Environment variables (comma-separated lists):
    /// - CORS_ALLOWED_ORIGIN: defaults to `*`
    /// - CORS_ALLOWED_METHODS: defaults to GET,POST,PUT,DELETE,OPTIONS
    /// - CORS_ALLOWED_HEADERS: defaults to Content-Type,Authorization
    /// - CORS_EXPOSED_HEADERS: defaults to none
    /// - CORS_ALLOW_CREDENTIALS: defaults to true
    fn from_env() -> Result<Self, ConfigError> {
        let allowed_origins = env_list("CORS_ALLOWED_ORIGIN", "*");
        if allowed_origins.is_empty() {
            return Err(ConfigError::ParseError {
                key: "CORS_ALLOWED_ORIGIN".to_string(),
                details: "at least one origin is required".to_string(),
            });
        }

        Ok(Self {
            allowed_origins,
            allowed_methods: env_list("CORS_ALLOWED_METHODS", "GET,POST,PUT,DELETE,OPTIONS"),
            allowed_headers: env_list("CORS_ALLOWED_HEADERS", "Content-Type,Authorization"),
            exposed_headers: env_list("CORS_EXPOSED_HEADERS", ""),
            allow_credentials: env_parse("CORS_ALLOW_CREDENTIALS", "true")?,
        })
    }
}
