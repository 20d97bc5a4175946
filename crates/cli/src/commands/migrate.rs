//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! vibe-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `VIBE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//!
//! Migration files live in `crates/api/migrations/` and are embedded at
//! compile time.

use super::{CommandError, postgres_url};

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `CommandError` if configuration is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let database_url = postgres_url()?;

    tracing::info!("Connecting to database...");
    let pool = vibe_commerce_api::db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
