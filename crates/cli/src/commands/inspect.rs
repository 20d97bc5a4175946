//! Read-only listings printed as JSON.

use vibe_commerce_api::db::{PgRepository, Repository, create_pool};

use super::{CommandError, postgres_url};

async fn repository() -> Result<PgRepository, CommandError> {
    Ok(PgRepository::new(create_pool(&postgres_url()?).await?))
}

/// Print every product.
///
/// # Errors
///
/// Returns `CommandError` if the store cannot be read.
pub async fn products() -> Result<(), CommandError> {
    let products = repository().await?.list_products().await?;
    print_json(&products)
}

/// Print every order, newest first.
///
/// # Errors
///
/// Returns `CommandError` if the store cannot be read.
pub async fn orders() -> Result<(), CommandError> {
    let orders = repository().await?.list_orders().await?;
    print_json(&orders)
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), CommandError> {
    let json = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }
    Ok(())
}
