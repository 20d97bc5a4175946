//! CLI command implementations.

use secrecy::SecretString;
use thiserror::Error;

use vibe_commerce_api::config::{ApiConfig, ConfigError, StoreBackend};
use vibe_commerce_api::db::RepositoryError;

pub mod inspect;
pub mod migrate;
pub mod seed;

/// Errors surfaced by any CLI command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Store error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("VIBE_DATABASE_URL points at the in-memory store; CLI commands need PostgreSQL")]
    MemoryStore,
}

/// Load configuration and return the `PostgreSQL` URL it names.
fn postgres_url() -> Result<SecretString, CommandError> {
    let config = ApiConfig::from_env()?;
    match config.store_backend() {
        StoreBackend::Postgres => Ok(config.database_url),
        StoreBackend::Memory => Err(CommandError::MemoryStore),
    }
}
