//! In-process store.
//!
//! Products keep insertion order so listings are stable within a run.
//! Nothing is persisted across restarts.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use vibe_commerce_core::{
    NewProduct, Order, OrderId, OrderNumber, Product, ProductId, ProductUpdate,
};

use super::{Repository, RepositoryError};

#[derive(Default)]
struct Collections {
    products: Vec<Product>,
    orders: Vec<Order>,
}

/// Store backed by lock-protected vectors.
#[derive(Default)]
pub struct MemoryRepository {
    inner: RwLock<Collections>,
}

impl MemoryRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn build_product(input: NewProduct) -> Product {
    let stock = input.stock_or_default();
    Product {
        id: ProductId::generate(),
        name: input.name,
        price: input.price,
        stock,
        description: input.description,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn list_products(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.inner.read().products.clone())
    }

    async fn count_products(&self) -> Result<i64, RepositoryError> {
        let len = self.inner.read().products.len();
        i64::try_from(len).map_err(|e| RepositoryError::DataCorruption(e.to_string()))
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self
            .inner
            .read()
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let product = build_product(product);
        self.inner.write().products.push(product.clone());
        Ok(product)
    }

    async fn create_products(
        &self,
        products: Vec<NewProduct>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let created: Vec<Product> = products.into_iter().map(build_product).collect();
        self.inner.write().products.extend(created.iter().cloned());
        Ok(created)
    }

    async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut inner = self.inner.write();
        let Some(product) = inner.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        update.apply(product);
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut inner = self.inner.write();
        let before = inner.products.len();
        inner.products.retain(|p| p.id != id);
        Ok(inner.products.len() != before)
    }

    async fn insert_order(&self, order: Order) -> Result<Order, RepositoryError> {
        let mut inner = self.inner.write();
        if inner.orders.iter().any(|o| o.order_id == order.order_id) {
            return Err(RepositoryError::Conflict(format!(
                "order number {} already exists",
                order.order_id
            )));
        }
        inner.orders.push(order.clone());
        Ok(order)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, RepositoryError> {
        // Reverse first so that orders sharing a timestamp stay newest-first
        let mut orders: Vec<Order> = self.inner.read().orders.iter().rev().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        Ok(self.inner.read().orders.iter().find(|o| o.id == id).cloned())
    }

    async fn get_order_by_number(
        &self,
        number: &OrderNumber,
    ) -> Result<Option<Order>, RepositoryError> {
        Ok(self
            .inner
            .read()
            .orders
            .iter()
            .find(|o| &o.order_id == number)
            .cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use rust_decimal::Decimal;
    use vibe_commerce_core::{Customer, OrderStatus, Price};

    use super::*;

    fn order_at(number: i64, offset_secs: i64) -> Order {
        Order {
            id: OrderId::generate(),
            order_id: OrderNumber::from_millis(number),
            customer: Customer {
                name: "A".to_string(),
                email: "a@b.com".to_string(),
            },
            items: Vec::new(),
            total: Decimal::ZERO,
            status: OrderStatus::Confirmed,
            created_at: Utc::now() + Duration::seconds(offset_secs),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_default_stock() {
        let repo = MemoryRepository::new();
        let product = repo
            .create_product(NewProduct::new("Keyboard", Price::from_cents(12999)))
            .await
            .unwrap();
        assert_eq!(product.stock, 100);
        assert_eq!(repo.count_products().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = MemoryRepository::new();
        let result = repo
            .update_product(ProductId::generate(), ProductUpdate::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let repo = MemoryRepository::new();
        let product = repo
            .create_product(NewProduct::new("Webcam", Price::from_cents(8999)))
            .await
            .unwrap();
        assert!(repo.delete_product(product.id).await.unwrap());
        assert!(!repo.delete_product(product.id).await.unwrap());
        assert!(repo.get_product(product.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_orders_listed_newest_first() {
        let repo = MemoryRepository::new();
        repo.insert_order(order_at(1, -10)).await.unwrap();
        repo.insert_order(order_at(2, 0)).await.unwrap();
        repo.insert_order(order_at(3, -5)).await.unwrap();

        let numbers: Vec<String> = repo
            .list_orders()
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.order_id.to_string())
            .collect();
        assert_eq!(numbers, ["ORD-2", "ORD-3", "ORD-1"]);
    }

    #[tokio::test]
    async fn test_duplicate_order_number_conflicts() {
        let repo = MemoryRepository::new();
        repo.insert_order(order_at(7, 0)).await.unwrap();
        let err = repo.insert_order(order_at(7, 1)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
