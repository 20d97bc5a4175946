//! Vibe Commerce storefront library.
//!
//! The client half of the shop: an HTTP client for the catalog & order
//! service, a local cart, and the page-state machine that ties them
//! together. The `vibe-shop` binary drives it from a terminal.
//!
//! # Modules
//!
//! - [`cart`] - In-memory cart keyed by product id
//! - [`client`] - `reqwest` client and the [`client::CatalogApi`] seam
//! - [`app`] - Loading/error/ready state, view toggle, checkout
//! - [`render`] - Askama text screens
//! - [`commands`] / [`shell`] - Terminal input parsing and dispatch

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod cart;
pub mod client;
pub mod commands;
pub mod config;
pub mod render;
pub mod shell;

pub use app::{CheckoutError, PageState, Storefront, View};
pub use cart::{Cart, CartLine};
pub use client::{ApiClient, CatalogApi, ClientError};
