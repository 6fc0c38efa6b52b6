//! Application configuration loaded from environment variables.

use std::env;
use std::path::{Path, PathBuf};

/// Name of the cookie carrying the opaque session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Default values used when a variable is unset.
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 8080;
    pub const DATABASE_PATH: &str = "./vibecoders.db";
    pub const DB_MAX_CONNECTIONS: u32 = 5;
    pub const DEV_CORS_ORIGINS: &[&str] = &["http://localhost:5173", "http://127.0.0.1:5173"];
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// Parse environment from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Check if this is a development environment.
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    /// Check if this is a production environment.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment
    pub environment: Environment,
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Upper bound on pooled SQLite connections
    pub db_max_connections: u32,
    /// Origins allowed by CORS (development only)
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `RUST_ENV`: Environment (development/production, default: production)
    /// - `VC_HOST`: Server host (default: 0.0.0.0)
    /// - `VC_PORT`: Server port (default: 8080)
    /// - `VC_DATABASE_PATH`: SQLite file (default: ./vibecoders.db)
    /// - `VC_DB_MAX_CONNECTIONS`: Pool size (default: 5)
    /// - `VC_CORS_ORIGINS`: Comma-separated origins allowed in development
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("RUST_ENV") {
            Ok(s) => Environment::parse(&s).ok_or(ConfigError::InvalidValue(
                "RUST_ENV must be 'development' or 'production'",
            ))?,
            Err(_) => Environment::Production,
        };

        let host = env::var("VC_HOST").unwrap_or_else(|_| defaults::HOST.to_string());

        let port = env::var("VC_PORT")
            .unwrap_or_else(|_| defaults::PORT.to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue("VC_PORT must be a valid port number"))?;

        let database_path = env::var("VC_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(defaults::DATABASE_PATH));

        let db_max_connections = env::var("VC_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| defaults::DB_MAX_CONNECTIONS.to_string())
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or(ConfigError::InvalidValue(
                "VC_DB_MAX_CONNECTIONS must be a positive number",
            ))?;

        let cors_origins = match env::var("VC_CORS_ORIGINS") {
            Ok(list) => parse_origins(&list),
            Err(_) => defaults::DEV_CORS_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        Ok(Config {
            environment,
            host,
            port,
            database_path,
            db_max_connections,
            cors_origins,
        })
    }

    /// Get the server bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode.
    pub fn is_development(&self) -> bool {
        self.environment.is_development()
    }

    /// SQLite connection URL for the configured file.
    ///
    /// `create` selects `mode=rwc`; the server itself always opens with
    /// `mode=rw` so a missing file is an error rather than a fresh database.
    pub fn database_url(&self, create: bool) -> String {
        sqlite_url(&self.database_path, create)
    }
}

pub(crate) fn sqlite_url(path: &Path, create: bool) -> String {
    let mode = if create { "rwc" } else { "rw" };
    format!("sqlite://{}?mode={}", path.display(), mode)
}

fn parse_origins(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}
