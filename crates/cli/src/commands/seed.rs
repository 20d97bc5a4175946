//! Seed an empty catalog with the demo products.

use tracing::info;

use vibe_commerce_api::db::seed::{SeedOutcome, seed_catalog};
use vibe_commerce_api::db::{PgRepository, create_pool};

use super::{CommandError, postgres_url};

/// Insert the demo catalog unless products already exist.
///
/// # Errors
///
/// Returns `CommandError` if configuration is missing or a store call fails.
pub async fn catalog() -> Result<(), CommandError> {
    let pool = create_pool(&postgres_url()?).await?;
    let repository = PgRepository::new(pool);

    match seed_catalog(&repository).await? {
        SeedOutcome::Seeded(count) => info!(count, "Seeded catalog"),
        SeedOutcome::AlreadyPopulated(count) => {
            info!(count, "Catalog already populated, nothing to do");
        }
    }
    Ok(())
}
