//! Configuration module for Blogun.

use serde::Deserialize;
use std::path::Path;

use crate::{BlogError, Result};

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/blogun.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Object storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored objects.
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// Public base path under which objects are served.
    #[serde(default = "default_public_base")]
    pub public_base: String,
}

fn default_storage_path() -> String {
    "data/objects".to_string()
}

fn default_public_base() -> String {
    "/files".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            public_base: default_public_base(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// JWT secret key (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Access token expiry in seconds.
    #[serde(default = "default_jwt_access_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_jwt_access_expiry() -> u64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_expiry_secs: default_jwt_access_expiry(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional path to a log file; console-only when unset.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(BlogError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| BlogError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `BLOGUN_JWT_SECRET`: Override the JWT secret key
    pub fn apply_env_overrides(&mut self) {
        if let Ok(jwt_secret) = std::env::var("BLOGUN_JWT_SECRET") {
            if !jwt_secret.is_empty() {
                self.auth.jwt_secret = jwt_secret;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the JWT secret is not set.
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(BlogError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via BLOGUN_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        Ok(())
    }
}
