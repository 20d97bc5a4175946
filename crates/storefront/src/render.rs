//! Text rendering for the terminal storefront.
//!
//! Each screen is an Askama text template fed by a view struct holding
//! preformatted strings, so templates never do arithmetic or formatting.

use askama::Template;
use chrono::Local;

use vibe_commerce_core::{Order, Product, format_amount};

use crate::app::{PageState, Storefront, View};
use crate::cart::Cart;
use crate::client::CatalogApi;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub index: usize,
    pub name: String,
    pub price: String,
    pub stock: i32,
    pub description: String,
}

impl ProductView {
    fn new(index: usize, product: &Product) -> Self {
        Self {
            index,
            name: product.name.clone(),
            price: product.price.display(),
            stock: product.stock,
            description: product.description.clone().unwrap_or_default(),
        }
    }
}

/// One cart or receipt line for templates.
#[derive(Debug, Clone)]
pub struct LineView {
    pub index: usize,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

#[derive(Template)]
#[template(path = "catalog.txt")]
struct CatalogTemplate {
    products: Vec<ProductView>,
    item_count: u32,
}

#[derive(Template)]
#[template(path = "cart.txt")]
struct CartTemplate<'a> {
    lines: Vec<LineView>,
    total: String,
    item_count: u32,
    customer_name: &'a str,
    customer_email: &'a str,
}

#[derive(Template)]
#[template(path = "loading.txt")]
struct LoadingTemplate;

#[derive(Template)]
#[template(path = "error.txt")]
struct ErrorTemplate<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "receipt.txt")]
struct ReceiptTemplate<'a> {
    order_number: &'a str,
    date: String,
    status: &'a str,
    customer_name: &'a str,
    customer_email: &'a str,
    lines: Vec<LineView>,
    total: String,
}

#[derive(Template)]
#[template(path = "help.txt")]
struct HelpTemplate;

/// Render the product grid.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn catalog(products: &[Product], cart: &Cart) -> askama::Result<String> {
    CatalogTemplate {
        products: products
            .iter()
            .enumerate()
            .map(|(i, product)| ProductView::new(i + 1, product))
            .collect(),
        item_count: cart.item_count(),
    }
    .render()
}

/// Render the cart with line totals and the checkout form.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn cart(cart: &Cart, customer_name: &str, customer_email: &str) -> askama::Result<String> {
    CartTemplate {
        lines: cart
            .lines()
            .iter()
            .enumerate()
            .map(|(i, line)| LineView {
                index: i + 1,
                name: line.product.name.clone(),
                price: line.product.price.display(),
                quantity: line.quantity,
                line_total: line.subtotal().display(),
            })
            .collect(),
        total: cart.total().display(),
        item_count: cart.item_count(),
        customer_name,
        customer_email,
    }
    .render()
}

/// Render the loading placeholder.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn loading() -> askama::Result<String> {
    LoadingTemplate.render()
}

/// Render a failed load with a retry hint.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn error(message: &str) -> askama::Result<String> {
    ErrorTemplate { message }.render()
}

/// Render the order-complete receipt. The timestamp is shown in local time.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn receipt(order: &Order) -> askama::Result<String> {
    ReceiptTemplate {
        order_number: order.order_id.as_str(),
        date: order
            .created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        status: order.status.as_str(),
        customer_name: &order.customer.name,
        customer_email: &order.customer.email,
        lines: order
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| LineView {
                index: i + 1,
                name: item.name.clone(),
                price: format_amount(item.price),
                quantity: item.quantity,
                line_total: format_amount(item.subtotal()),
            })
            .collect(),
        total: format_amount(order.total),
    }
    .render()
}

/// Render the command reference.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn help() -> askama::Result<String> {
    HelpTemplate.render()
}

/// Render whatever the storefront is currently showing.
///
/// The receipt overlay wins over everything else; otherwise the load state
/// decides, and a ready page shows the selected view.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn page<A: CatalogApi>(store: &Storefront<A>) -> askama::Result<String> {
    if let Some(order) = store.receipt() {
        return receipt(order);
    }
    match store.page() {
        PageState::Loading => loading(),
        PageState::Error(message) => error(message),
        PageState::Ready => match store.view() {
            View::Catalog => catalog(store.products(), store.cart()),
            View::Cart => cart(
                store.cart(),
                store.customer_name(),
                store.customer_email(),
            ),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;

    use vibe_commerce_core::{
        Customer, LineItem, OrderId, OrderNumber, OrderStatus, Price, ProductId,
    };

    use super::*;
    use crate::app::tests::FakeApi;

    fn product(name: &str, cents: i64) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.to_string(),
            price: Price::from_cents(cents),
            stock: 25,
            description: Some("Full HD".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_catalog_lists_products_with_prices() {
        let webcam = product("Webcam", 8999);
        let mut basket = Cart::new();
        basket.add(&webcam);
        basket.add(&webcam);

        let out = catalog(&[webcam], &basket).unwrap();
        assert!(out.contains("[1] Webcam"));
        assert!(out.contains("$89.99"));
        assert!(out.contains("Full HD"));
        assert!(out.contains("Cart (2)"));
    }

    #[test]
    fn test_empty_cart_prompt() {
        let out = cart(&Cart::new(), "", "").unwrap();
        assert!(out.contains("Your cart is empty"));
        assert!(!out.contains("Total"));
    }

    #[test]
    fn test_cart_line_totals() {
        let watch = product("Smart Watch", 19999);
        let case = product("Phone Case", 2499);
        let mut basket = Cart::new();
        basket.add(&watch);
        basket.add(&watch);
        basket.add(&case);

        let out = cart(&basket, "A", "a@b.com").unwrap();
        assert!(out.contains("Smart Watch"));
        assert!(out.contains("$399.98"));
        assert!(out.contains("Total: $424.97"));
        assert!(out.contains("a@b.com"));
    }

    #[test]
    fn test_cart_at_max_price_renders() {
        let mut gold = product("Gold Bar", 0);
        gold.price = Price::MAX;
        let mut basket = Cart::new();
        basket.add(&gold);
        basket.update_quantity(gold.id, 100_000);

        let out = cart(&basket, "", "").unwrap();
        assert!(out.contains("Gold Bar"));
        assert!(out.contains(&format!("Total: {}", Price::MAX.display())));
    }

    #[test]
    fn test_receipt_shows_negative_total() {
        let order = Order {
            id: OrderId::generate(),
            order_id: OrderNumber::from_millis(1),
            customer: Customer {
                name: "A".to_string(),
                email: "a@b.com".to_string(),
            },
            items: vec![LineItem {
                product_id: "x".to_string(),
                quantity: 1,
                ..LineItem::default()
            }],
            total: -Price::from_cents(500).amount(),
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        };

        let out = receipt(&order).unwrap();
        assert!(out.contains("-$5.00"));
    }

    #[test]
    fn test_error_has_retry_hint() {
        let out = error("connection refused").unwrap();
        assert!(out.contains("connection refused"));
        assert!(out.contains("retry"));
    }

    #[test]
    fn test_receipt() {
        let order = Order {
            id: OrderId::generate(),
            order_id: OrderNumber::from_millis(1_700_000_000_000),
            customer: Customer {
                name: "A".to_string(),
                email: "a@b.com".to_string(),
            },
            items: vec![LineItem {
                product_id: "p1".to_string(),
                name: "Keyboard".to_string(),
                price: Price::from_cents(12999).amount(),
                quantity: 2,
            }],
            total: Price::from_cents(25998).amount(),
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        };

        let out = receipt(&order).unwrap();
        assert!(out.contains("ORD-1700000000000"));
        assert!(out.contains("Keyboard"));
        assert!(out.contains("$259.98"));
        assert!(out.contains("confirmed"));
    }

    #[tokio::test]
    async fn test_page_follows_state() {
        let mut store = Storefront::new(FakeApi::with_products(&[("USB Hub", 3999)]));
        assert!(page(&store).unwrap().contains("Loading"));

        store.load_products().await;
        assert!(page(&store).unwrap().contains("USB Hub"));

        store.show_cart();
        assert!(page(&store).unwrap().contains("Your cart is empty"));
    }
}
