//! TOML-based configuration for Campaign Desk
//!
//! The server reads a single `campaign.toml` at startup. Secrets are never
//! stored in the file itself: the `[auth]` table names the environment
//! variable that holds the JWT signing key.
//!
//! Loading validates everything up front, so a running server always has a
//! complete, well-formed configuration.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Shortest accepted JWT signing secret, in bytes.
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Longest accepted token lifetime: one year, in seconds.
pub const MAX_ACCESS_EXPIRY: i64 = 365 * 24 * 60 * 60;

/// Root configuration structure loaded from campaign.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    /// Value of the `iss` claim issued and required on every token
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Value of the `aud` claim issued and required on every token
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Token lifetime in seconds
    #[serde(default = "default_access_expiry")]
    pub access_expiry: i64,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

fn default_issuer() -> String {
    "campaign-desk".to_string()
}

fn default_audience() -> String {
    "campaign-desk-web".to_string()
}

fn default_access_expiry() -> i64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            issuer: default_issuer(),
            audience: default_audience(),
            access_expiry: default_access_expiry(),
        }
    }
}

/// Auth settings with the secret resolved from the environment.
#[derive(Clone)]
pub struct ResolvedAuth {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_expiry: i64,
}

impl std::fmt::Debug for ResolvedAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedAuth")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("access_expiry", &self.access_expiry)
            .finish()
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Local database path, or `:memory:`
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Environment variable for Turso URL (optional cloud config)
    pub turso_url_env: Option<String>,

    /// Environment variable for Turso auth token
    pub turso_token_env: Option<String>,
}

fn default_database_url() -> String {
    "./data/campaign.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            turso_url_env: None,
            turso_token_env: None,
        }
    }
}

// ============= CORS Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Browser origins allowed to call the API with credentials
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

fn default_allowed_origins() -> Vec<String> {
    [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration text without validating it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Validate the configuration for internal consistency and env var availability
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve_auth()?;

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "database.url must not be empty".to_string(),
            ));
        }

        if let Some(ref env) = self.database.turso_url_env {
            self.validate_env_var(env)?;
        }
        if let Some(ref env) = self.database.turso_token_env {
            self.validate_env_var(env)?;
        }

        for origin in &self.cors.allowed_origins {
            if origin == "*" {
                return Err(ConfigError::ValidationError(
                    "cors.allowed_origins cannot contain '*' when credentials are allowed"
                        .to_string(),
                ));
            }
            HeaderValue::from_str(origin).map_err(|_| {
                ConfigError::ValidationError(format!("Invalid CORS origin: {}", origin))
            })?;
        }

        Ok(())
    }

    /// Resolve the `[auth]` table into the values the token service needs.
    pub fn resolve_auth(&self) -> Result<ResolvedAuth, ConfigError> {
        let secret = self.jwt_secret()?;
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::ValidationError(format!(
                "JWT secret in '{}' must be at least {} bytes",
                self.auth.jwt_secret_env, MIN_JWT_SECRET_LEN
            )));
        }
        if self.auth.issuer.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.issuer must not be empty".to_string(),
            ));
        }
        if self.auth.audience.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.audience must not be empty".to_string(),
            ));
        }
        if self.auth.access_expiry <= 0 || self.auth.access_expiry > MAX_ACCESS_EXPIRY {
            return Err(ConfigError::ValidationError(format!(
                "auth.access_expiry must be between 1 and {} seconds",
                MAX_ACCESS_EXPIRY
            )));
        }

        Ok(ResolvedAuth {
            secret,
            issuer: self.auth.issuer.clone(),
            audience: self.auth.audience.clone(),
            access_expiry: self.auth.access_expiry,
        })
    }

    fn validate_env_var(&self, name: &str) -> Result<(), ConfigError> {
        std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        Ok(())
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok().filter(|v| !v.is_empty())
    }

    /// Get the JWT secret from the environment
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.auth.jwt_secret_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.jwt_secret_env.clone()))
    }

    /// Turso credentials, when both env vars are configured and set.
    pub fn turso_credentials(&self) -> Option<(String, String)> {
        let url = self.resolve_env(self.database.turso_url_env.as_ref()?)?;
        let token = self.resolve_env(self.database.turso_token_env.as_ref()?)?;
        Some((url, token))
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
