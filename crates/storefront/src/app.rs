//! Storefront page state.
//!
//! ```text
//! Loading ──ok──▶ Ready
//!    │  ▲
//!   err └─retry── Error(message)
//! ```
//!
//! Independent of the page state: a catalog/cart view toggle, the customer
//! form fields, and the order-complete overlay holding the last receipt.

use thiserror::Error;
use tracing::{info, warn};

use vibe_commerce_core::{Customer, NewOrder, Order, Product, ProductId};

use crate::cart::Cart;
use crate::client::{CatalogApi, ClientError};

/// Catalog load status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Error(String),
    Ready,
}

/// Which panel is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Catalog,
    Cart,
}

/// Why a checkout did not produce an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Please enter your name and email")]
    MissingCustomerDetails,

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Error creating order: {0}")]
    Api(#[from] ClientError),
}

/// Everything the storefront shows, driven by user actions.
pub struct Storefront<A> {
    api: A,
    page: PageState,
    products: Vec<Product>,
    cart: Cart,
    view: View,
    customer_name: String,
    customer_email: String,
    receipt: Option<Order>,
}

impl<A: CatalogApi> Storefront<A> {
    /// A storefront that has not fetched the catalog yet.
    pub fn new(api: A) -> Self {
        Self {
            api,
            page: PageState::Loading,
            products: Vec::new(),
            cart: Cart::new(),
            view: View::Catalog,
            customer_name: String::new(),
            customer_email: String::new(),
            receipt: None,
        }
    }

    /// Fetch the product list, moving to `Ready` or `Error`.
    ///
    /// The cart is left alone either way.
    pub async fn load_products(&mut self) -> &PageState {
        self.page = PageState::Loading;
        match self.api.list_products().await {
            Ok(products) => {
                info!(count = products.len(), "Products loaded");
                self.products = products;
                self.page = PageState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch products");
                self.page = PageState::Error(e.to_string());
            }
        }
        &self.page
    }

    /// Manual retry after a failed load.
    pub async fn retry(&mut self) -> &PageState {
        self.load_products().await
    }

    /// Add one unit of a loaded product. Returns `false` for unknown ids.
    pub fn add_to_cart(&mut self, id: ProductId) -> bool {
        match self.products.iter().find(|p| p.id == id) {
            Some(product) => {
                self.cart.add(product);
                true
            }
            None => false,
        }
    }

    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        self.cart.remove(id)
    }

    /// Set a line's quantity; values below 1 are ignored.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> bool {
        self.cart.update_quantity(id, quantity)
    }

    pub fn set_customer_name(&mut self, name: impl Into<String>) {
        self.customer_name = name.into();
    }

    pub fn set_customer_email(&mut self, email: impl Into<String>) {
        self.customer_email = email.into();
    }

    pub const fn show_cart(&mut self) {
        self.view = View::Cart;
    }

    pub const fn show_catalog(&mut self) {
        self.view = View::Catalog;
    }

    /// Submit the cart as one order.
    ///
    /// On success the cart and customer fields are cleared and the order is
    /// kept as the receipt. On failure nothing is cleared.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` or `MissingCustomerDetails` without
    /// contacting the service, or `CheckoutError::Api` if the request fails.
    pub async fn checkout(&mut self) -> Result<&Order, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if self.customer_name.is_empty() || self.customer_email.is_empty() {
            return Err(CheckoutError::MissingCustomerDetails);
        }

        let request = NewOrder {
            customer: Customer {
                name: self.customer_name.clone(),
                email: self.customer_email.clone(),
            },
            items: self.cart.to_line_items(),
            total: self.cart.total().amount(),
        };

        let order = self.api.create_order(&request).await.inspect_err(|e| {
            warn!(error = %e, "Checkout failed");
        })?;

        info!(order_id = %order.order_id, "Checkout complete");
        self.cart.clear();
        self.customer_name.clear();
        self.customer_email.clear();
        Ok(self.receipt.insert(order))
    }

    /// Dismiss the order-complete overlay and go back to the catalog.
    pub fn close_receipt(&mut self) {
        self.receipt = None;
        self.view = View::Catalog;
    }

    #[must_use]
    pub const fn page(&self) -> &PageState {
        &self.page
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    #[must_use]
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    /// The order-complete overlay is up.
    #[must_use]
    pub const fn order_complete(&self) -> bool {
        self.receipt.is_some()
    }

    #[must_use]
    pub const fn receipt(&self) -> Option<&Order> {
        self.receipt.as_ref()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;
    use chrono::Utc;
    use parking_lot::Mutex;

    use vibe_commerce_core::{OrderId, OrderNumber, OrderStatus, Price};

    use super::*;

    /// In-process double for the service.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub products: Vec<Product>,
        pub fail_products: AtomicBool,
        pub fail_orders: AtomicBool,
        pub submitted: Mutex<Vec<NewOrder>>,
    }

    impl FakeApi {
        pub(crate) fn with_products(names: &[(&str, i64)]) -> Self {
            Self {
                products: names
                    .iter()
                    .map(|&(name, cents)| Product {
                        id: ProductId::generate(),
                        name: name.to_string(),
                        price: Price::from_cents(cents),
                        stock: 100,
                        description: None,
                        created_at: Utc::now(),
                    })
                    .collect(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl CatalogApi for FakeApi {
        async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
            if self.fail_products.load(Ordering::SeqCst) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Internal server error".to_string(),
                });
            }
            Ok(self.products.clone())
        }

        async fn create_order(&self, order: &NewOrder) -> Result<Order, ClientError> {
            if self.fail_orders.load(Ordering::SeqCst) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Internal server error".to_string(),
                });
            }
            self.submitted.lock().push(order.clone());
            Ok(Order {
                id: OrderId::generate(),
                order_id: OrderNumber::from_millis(Utc::now().timestamp_millis()),
                customer: order.customer.clone(),
                items: order.items.clone(),
                total: order.total,
                status: OrderStatus::Confirmed,
                created_at: Utc::now(),
            })
        }
    }

    async fn ready_store() -> Storefront<FakeApi> {
        let mut store = Storefront::new(FakeApi::with_products(&[
            ("Keyboard", 12999),
            ("USB Hub", 3999),
        ]));
        store.load_products().await;
        store
    }

    #[tokio::test]
    async fn test_starts_loading_then_ready() {
        let mut store = Storefront::new(FakeApi::with_products(&[("Webcam", 8999)]));
        assert_eq!(store.page(), &PageState::Loading);
        assert_eq!(store.load_products().await, &PageState::Ready);
        assert_eq!(store.products().len(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_then_retry() {
        let api = FakeApi::with_products(&[("Webcam", 8999)]);
        api.fail_products.store(true, Ordering::SeqCst);
        let mut store = Storefront::new(api);

        assert!(matches!(store.load_products().await, PageState::Error(_)));

        store.api.fail_products.store(false, Ordering::SeqCst);
        assert_eq!(store.retry().await, &PageState::Ready);
    }

    #[tokio::test]
    async fn test_checkout_requires_customer_details() {
        let mut store = ready_store().await;
        let id = store.products()[0].id;
        store.add_to_cart(id);
        store.set_customer_name("A");

        let err = store.checkout().await.unwrap_err();
        assert!(matches!(err, CheckoutError::MissingCustomerDetails));
        assert_eq!(store.cart().len(), 1);
        assert!(store.api.submitted.lock().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_rejects_empty_cart() {
        let mut store = ready_store().await;
        store.set_customer_name("A");
        store.set_customer_email("a@b.com");
        assert!(matches!(
            store.checkout().await.unwrap_err(),
            CheckoutError::EmptyCart
        ));
    }

    #[tokio::test]
    async fn test_checkout_success_clears_cart_and_form() {
        let mut store = ready_store().await;
        let keyboard = store.products()[0].id;
        let hub = store.products()[1].id;
        store.add_to_cart(keyboard);
        store.add_to_cart(keyboard);
        store.add_to_cart(hub);
        store.show_cart();
        store.set_customer_name("A");
        store.set_customer_email("a@b.com");

        let order = store.checkout().await.unwrap().clone();
        assert_eq!(order.total, Price::from_cents(12999 * 2 + 3999).amount());
        assert_eq!(order.items.len(), 2);

        assert!(store.cart().is_empty());
        assert!(store.customer_name().is_empty());
        assert!(store.customer_email().is_empty());
        assert!(store.order_complete());
        assert_eq!(store.receipt(), Some(&order));

        let submitted = store.api.submitted.lock();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].total, order.total);
    }

    #[tokio::test]
    async fn test_checkout_failure_preserves_state() {
        let mut store = ready_store().await;
        let id = store.products()[0].id;
        store.add_to_cart(id);
        store.set_customer_name("A");
        store.set_customer_email("a@b.com");
        store.api.fail_orders.store(true, Ordering::SeqCst);

        assert!(matches!(
            store.checkout().await.unwrap_err(),
            CheckoutError::Api(_)
        ));
        assert_eq!(store.cart().len(), 1);
        assert_eq!(store.customer_name(), "A");
        assert_eq!(store.customer_email(), "a@b.com");
        assert!(!store.order_complete());
    }

    #[tokio::test]
    async fn test_close_receipt_returns_to_catalog() {
        let mut store = ready_store().await;
        let id = store.products()[0].id;
        store.add_to_cart(id);
        store.show_cart();
        store.set_customer_name("A");
        store.set_customer_email("a@b.com");
        store.checkout().await.unwrap();

        store.close_receipt();
        assert!(!store.order_complete());
        assert_eq!(store.view(), View::Catalog);
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_ignored() {
        let mut store = ready_store().await;
        assert!(!store.add_to_cart(ProductId::generate()));
        assert!(store.cart().is_empty());
    }
}
