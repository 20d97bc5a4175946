//! Applies parsed commands to a [`Storefront`] and renders the result.

use tracing::debug;

use vibe_commerce_core::ProductId;

use crate::app::{CheckoutError, Storefront};
use crate::client::CatalogApi;
use crate::commands::Command;
use crate::render;

/// What the input loop should do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print this and keep reading.
    Continue(String),
    Quit,
}

/// Run one command against the storefront.
///
/// # Errors
///
/// Returns `askama::Error` if a screen fails to render.
pub async fn apply<A: CatalogApi>(
    store: &mut Storefront<A>,
    command: Command,
) -> askama::Result<Outcome> {
    debug!(?command, "Applying command");

    let notice = match command {
        Command::Quit => return Ok(Outcome::Quit),
        Command::Help => return render::help().map(Outcome::Continue),
        Command::Products => {
            store.show_catalog();
            None
        }
        Command::Cart => {
            store.show_cart();
            None
        }
        Command::Retry => {
            store.retry().await;
            None
        }
        Command::Close => {
            store.close_receipt();
            None
        }
        Command::Add(n) => match n
            .checked_sub(1)
            .and_then(|i| store.products().get(i))
            .map(|p| (p.id, p.name.clone()))
        {
            Some((id, name)) => {
                store.add_to_cart(id);
                Some(format!("Added {name} to cart."))
            }
            None => Some(format!("There is no product {n}.")),
        },
        Command::Remove(n) => match cart_line(store, n) {
            Some((id, _)) => {
                store.remove_from_cart(id);
                store.show_cart();
                None
            }
            None => Some(no_line(n)),
        },
        Command::Quantity(n, quantity) => match cart_line(store, n) {
            Some((id, _)) => {
                store.update_quantity(id, quantity);
                store.show_cart();
                None
            }
            None => Some(no_line(n)),
        },
        Command::Increment(n) => match cart_line(store, n) {
            Some((id, quantity)) => {
                store.update_quantity(id, quantity.saturating_add(1));
                store.show_cart();
                None
            }
            None => Some(no_line(n)),
        },
        Command::Decrement(n) => match cart_line(store, n) {
            Some((id, quantity)) => {
                store.update_quantity(id, quantity.saturating_sub(1));
                store.show_cart();
                None
            }
            None => Some(no_line(n)),
        },
        Command::Name(name) => {
            store.set_customer_name(name);
            store.show_cart();
            None
        }
        Command::Email(email) => {
            store.set_customer_email(email);
            store.show_cart();
            None
        }
        Command::Checkout => match store.checkout().await.map(|_| ()) {
            Ok(()) => None,
            Err(e @ (CheckoutError::EmptyCart | CheckoutError::MissingCustomerDetails)) => {
                store.show_cart();
                Some(e.to_string())
            }
            Err(e) => Some(e.to_string()),
        },
    };

    let page = render::page(store)?;
    Ok(Outcome::Continue(match notice {
        Some(notice) => format!("{notice}\n\n{page}"),
        None => page,
    }))
}

fn cart_line<A: CatalogApi>(store: &Storefront<A>, n: usize) -> Option<(ProductId, u32)> {
    let lines = store.cart().lines();
    n.checked_sub(1)
        .and_then(|i| lines.get(i))
        .map(|line| (line.product.id, line.quantity))
}

fn no_line(n: usize) -> String {
    format!("There is no cart line {n}.")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::app::tests::FakeApi;

    async fn run(store: &mut Storefront<FakeApi>, line: &str) -> String {
        match apply(store, line.parse().unwrap()).await.unwrap() {
            Outcome::Continue(out) => out,
            Outcome::Quit => String::new(),
        }
    }

    #[tokio::test]
    async fn test_shopping_session() {
        let mut store = Storefront::new(FakeApi::with_products(&[
            ("Laptop Stand", 4999),
            ("Power Bank", 3499),
        ]));
        store.load_products().await;

        assert!(run(&mut store, "add 2").await.contains("Added Power Bank"));
        run(&mut store, "add 1").await;
        let out = run(&mut store, "inc 1").await;
        assert!(out.contains("Power Bank  $34.99 x 2 = $69.98"));

        run(&mut store, "dec 1").await;
        run(&mut store, "dec 1").await;
        assert_eq!(store.cart().lines()[0].quantity, 1);

        let out = run(&mut store, "checkout").await;
        assert!(out.contains("Please enter your name and email"));

        run(&mut store, "name Ada").await;
        run(&mut store, "email ada@example.com").await;
        let out = run(&mut store, "checkout").await;
        assert!(out.contains("Order Complete!"));
        assert!(out.contains("$84.98"));

        let out = run(&mut store, "close").await;
        assert!(out.contains("Cart (0)"));
    }

    #[tokio::test]
    async fn test_out_of_range_positions() {
        let mut store = Storefront::new(FakeApi::with_products(&[("Webcam", 8999)]));
        store.load_products().await;

        assert!(run(&mut store, "add 5").await.contains("There is no product 5."));
        assert!(run(&mut store, "remove 1").await.contains("There is no cart line 1."));
    }

    #[tokio::test]
    async fn test_quit() {
        let mut store = Storefront::new(FakeApi::default());
        assert_eq!(apply(&mut store, Command::Quit).await.unwrap(), Outcome::Quit);
    }
}
