//! Catalog product records and the payloads that create or modify them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::{Price, ProductId, ValidationError};

/// Stock assigned to a product created without an explicit stock level.
pub const DEFAULT_STOCK: i32 = 100;

/// A catalog product as stored and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Informational only; orders never decrement it.
    pub stock: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewProduct {
    /// Shorthand for a product with only the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
            stock: None,
            description: None,
        }
    }

    /// Set an explicit stock level.
    #[must_use]
    pub const fn with_stock(mut self, stock: i32) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Check the fields the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] if the name is empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_present("name", &self.name)
    }

    /// Stock level after applying the default.
    #[must_use]
    pub fn stock_or_default(&self) -> i32 {
        self.stock.unwrap_or(DEFAULT_STOCK)
    }
}

/// Partial update of a product. Absent fields are left untouched.
///
/// `description` distinguishes "absent" (`None`) from an explicit `null`
/// (`Some(None)`), which clears it. The other fields cannot be cleared, so
/// an explicit `null` for them fails to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Price>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub stock: Option<i32>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

impl ProductUpdate {
    /// Check the supplied fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] if a name is supplied but empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.name {
            Some(name) => require_present("name", name),
            None => Ok(()),
        }
    }

    /// Apply this update to a product in place.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
    }
}

/// Marks a field as present even when its value is `null`.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub(crate) fn require_present(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}
