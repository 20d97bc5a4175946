//! Business logic that sits between route handlers and the store.

pub mod order_number;
pub mod orders;
