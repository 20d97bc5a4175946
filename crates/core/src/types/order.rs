//! Orders: immutable snapshots of a completed checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::require_present;
use super::{OrderId, OrderNumber, OrderStatus, ValidationError};

/// Who placed an order. Both fields are presence-checked only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

/// One purchased product, copied from the client's cart at checkout time.
///
/// `product_id` is an opaque reference; it is never resolved against the
/// catalog. Every field is optional on the wire and none is re-checked, so
/// `price` is a plain signed amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub quantity: u32,
}

impl LineItem {
    /// `price * quantity` for this line, saturating at the bounds of
    /// [`Decimal`].
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .unwrap_or(if self.price.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            })
    }
}

/// Order-creation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer: Customer,
    #[serde(default)]
    pub items: Vec<LineItem>,
    /// Client-computed total, stored as given. May be negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl NewOrder {
    /// Check customer presence.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] naming the first empty field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_present("customer.name", &self.customer.name)?;
        require_present("customer.email", &self.customer.email)
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: OrderId,
    /// Human-facing `ORD-<millis>` number.
    pub order_id: OrderNumber,
    pub customer: Customer,
    pub items: Vec<LineItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn example_body() -> serde_json::Value {
        json!({
            "customer": {"name": "A", "email": "a@b.com"},
            "items": [{"productId": "x", "name": "P", "price": 10, "quantity": 2}],
            "total": 20
        })
    }

    #[test]
    fn test_new_order_parses_wire_format() {
        let order: NewOrder = serde_json::from_value(example_body()).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].product_id, "x");
        assert_eq!(order.items[0].subtotal(), Decimal::from(20));
        assert_eq!(order.total, Decimal::from(20));
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_partial_line_item_and_negative_total_parse() {
        let body = json!({
            "customer": {"name": " ", "email": " "},
            "items": [{"productId": "x", "quantity": 1}],
            "total": -5
        });
        let order: NewOrder = serde_json::from_value(body).unwrap();
        assert_eq!(order.items[0].name, "");
        assert_eq!(order.items[0].price, Decimal::ZERO);
        assert_eq!(order.total, Decimal::from(-5));
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_subtotal_saturates() {
        let item = LineItem {
            price: Decimal::MAX,
            quantity: 2,
            ..LineItem::default()
        };
        assert_eq!(item.subtotal(), Decimal::MAX);

        let refund = LineItem {
            price: Decimal::MIN,
            quantity: 2,
            ..LineItem::default()
        };
        assert_eq!(refund.subtotal(), Decimal::MIN);
    }

    #[test]
    fn test_missing_customer_is_rejected() {
        let mut body = example_body();
        body.as_object_mut().unwrap().remove("customer");
        assert!(serde_json::from_value::<NewOrder>(body).is_err());
    }

    #[test]
    fn test_blank_email_fails_validation() {
        let mut order: NewOrder = serde_json::from_value(example_body()).unwrap();
        order.customer.email = String::new();
        assert_eq!(
            order.validate(),
            Err(ValidationError::Required("customer.email"))
        );
    }

    #[test]
    fn test_order_serializes_order_id_and_status() {
        let order = Order {
            id: OrderId::generate(),
            order_id: OrderNumber::from_millis(1),
            customer: Customer {
                name: "A".to_string(),
                email: "a@b.com".to_string(),
            },
            items: Vec::new(),
            total: Decimal::ZERO,
            status: OrderStatus::Confirmed,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["orderId"], json!("ORD-1"));
        assert_eq!(value["status"], json!("confirmed"));
        assert!(value.get("_id").is_some());
    }
}
