//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VIBE_DATABASE_URL` - `PostgreSQL` connection string, or `memory://` for the
//!   in-process store (falls back to `DATABASE_URL`)
//!
//! ## Optional
//! - `VIBE_HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 5000)
//! - `VIBE_CORS_ORIGIN` - Browser origin allowed to call the API
//!   (default: `http://localhost:5173`)
//! - `VIBE_SEED_ON_STARTUP` - Seed an empty catalog at boot (default: true)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Connection string that selects [`crate::db::MemoryRepository`].
pub const MEMORY_STORE_URL: &str = "memory://";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Which store implementation the connection string selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Catalog & order service configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Store connection string (may contain a password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origin allowed by the CORS layer
    pub cors_origin: String,
    /// Insert the fixed catalog when the product collection is empty
    pub seed_on_startup: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = var("VIBE_DATABASE_URL")
            .or_else(|| var("DATABASE_URL"))
            .map(SecretString::from)
            .ok_or_else(|| ConfigError::MissingEnvVar("VIBE_DATABASE_URL".to_string()))?;

        let host = parse_or_default(&var, "VIBE_HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or_default(&var, "PORT", 5000_u16)?;
        let cors_origin =
            var("VIBE_CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());
        let seed_on_startup = parse_or_default(&var, "VIBE_SEED_ON_STARTUP", true)?;

        let sentry_dsn = var("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = var("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = parse_or_default(&var, "SENTRY_SAMPLE_RATE", 1.0_f32)?;
        let sentry_traces_sample_rate =
            parse_or_default(&var, "SENTRY_TRACES_SAMPLE_RATE", 0.0_f32)?;

        Ok(Self {
            database_url,
            host,
            port,
            cors_origin,
            seed_on_startup,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for an in-memory store, used by tests and demos.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: SecretString::from(MEMORY_STORE_URL),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 0,
            cors_origin: "http://localhost:5173".to_string(),
            seed_on_startup: true,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Store implementation selected by the connection string.
    #[must_use]
    pub fn store_backend(&self) -> StoreBackend {
        if self.database_url.expose_secret().starts_with(MEMORY_STORE_URL) {
            StoreBackend::Memory
        } else {
            StoreBackend::Postgres
        }
    }
}

/// Parse a variable, falling back to `default` when unset.
fn parse_or_default<T>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    var(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
