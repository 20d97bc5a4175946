//! Startup catalog seeding.
//!
//! An empty product collection is filled with a fixed demo catalog. A
//! non-empty one is left alone, so seeding is safe to run on every boot.

use vibe_commerce_core::{NewProduct, Price};

use super::{Repository, RepositoryError};

/// The demo catalog: `(name, price in cents, stock)`.
pub const SEED_CATALOG: [(&str, i64, i32); 8] = [
    ("Wireless Headphones", 7999, 50),
    ("Smart Watch", 19999, 30),
    ("Laptop Stand", 4999, 100),
    ("Keyboard", 12999, 45),
    ("USB Hub", 3999, 80),
    ("Webcam", 8999, 25),
    ("Phone Case", 2499, 150),
    ("Power Bank", 3499, 60),
];

/// What [`seed_catalog`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The catalog was empty; this many products were inserted.
    Seeded(usize),
    /// The catalog already held this many products; nothing was written.
    AlreadyPopulated(i64),
}

/// The demo catalog as insertable products.
#[must_use]
pub fn seed_products() -> Vec<NewProduct> {
    SEED_CATALOG
        .iter()
        .map(|&(name, cents, stock)| NewProduct::new(name, Price::from_cents(cents)).with_stock(stock))
        .collect()
}

/// Insert the demo catalog if no products exist.
///
/// # Errors
///
/// Returns `RepositoryError` if counting or inserting fails.
pub async fn seed_catalog(repository: &dyn Repository) -> Result<SeedOutcome, RepositoryError> {
    let count = repository.count_products().await?;
    if count > 0 {
        tracing::info!(count, "Catalog already has products, skipping seed");
        return Ok(SeedOutcome::AlreadyPopulated(count));
    }

    tracing::info!("Seeding empty catalog");
    let created = repository.create_products(seed_products()).await?;
    tracing::info!(count = created.len(), "Catalog seeded");
    Ok(SeedOutcome::Seeded(created.len()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryRepository;

    #[tokio::test]
    async fn test_seeds_empty_catalog() {
        let repo = MemoryRepository::new();
        assert_eq!(seed_catalog(&repo).await.unwrap(), SeedOutcome::Seeded(8));

        let names: Vec<String> = repo
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names.len(), 8);
        assert!(names.iter().any(|n| n == "Power Bank"));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repo = MemoryRepository::new();
        seed_catalog(&repo).await.unwrap();
        assert_eq!(
            seed_catalog(&repo).await.unwrap(),
            SeedOutcome::AlreadyPopulated(8)
        );
        assert_eq!(repo.count_products().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_existing_catalog_untouched() {
        let repo = MemoryRepository::new();
        repo.create_product(NewProduct::new("Lamp", Price::from_cents(100)))
            .await
            .unwrap();
        assert_eq!(
            seed_catalog(&repo).await.unwrap(),
            SeedOutcome::AlreadyPopulated(1)
        );
    }

    #[test]
    fn test_seed_prices_and_stock() {
        let products = seed_products();
        let headphones = products.first().unwrap();
        assert_eq!(headphones.name, "Wireless Headphones");
        assert_eq!(headphones.price, Price::from_cents(7999));
        assert_eq!(headphones.stock, Some(50));
    }
}
