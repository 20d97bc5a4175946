//! Vibe Commerce Core - Shared types library.
//!
//! This crate provides common types used across all Vibe Commerce components:
//! - `api` - Catalog & order HTTP service
//! - `storefront` - Cart state machine and terminal storefront
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and statuses, plus the
//!   `Product` and `Order` records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
