//! API configuration

use serde::Deserialize;

/// Seven days, the lifetime of a portal session token
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 7 * 24 * 60 * 60;

/// API configuration
///
/// Every field has a default, so a partial environment is enough.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Comma-separated list of allowed CORS origins, `*` for any
    pub cors_origins: String,
    /// Email of the admin account created at startup
    pub admin_email: String,
    /// Password of the admin account created at startup
    pub admin_password: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            log_level: "info".to_string(),
            cors_origins: "*".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "change-me".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `PORTAL_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("PORTAL").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Allowed origins; `None` means any origin
    pub fn allowed_origins(&self) -> Option<Vec<String>> {
        let origins: Vec<String> = self
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            None
        } else {
            Some(origins)
        }
    }
}
