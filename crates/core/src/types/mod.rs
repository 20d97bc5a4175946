//! Core types for Vibe Commerce.
//!
//! This module provides type-safe wrappers for common domain concepts and
//! the product/order records exchanged between service and storefront.

pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use order::{Customer, LineItem, NewOrder, Order};
pub use price::{Price, PriceError, format_amount};
pub use product::{DEFAULT_STOCK, NewProduct, Product, ProductUpdate};
pub use status::*;

/// A field-level validation failure that serde alone cannot express.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required string field is empty.
    #[error("{0} is required")]
    Required(&'static str),
}
