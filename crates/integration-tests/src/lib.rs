//! Integration tests for Vibe Commerce.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (in-memory store, no external services)
//! cargo test -p vibe-commerce-integration-tests
//!
//! # Include the PostgreSQL store tests
//! VIBE_TEST_DATABASE_URL=postgres://localhost/vibe_test \
//!     cargo test -p vibe-commerce-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `api_products` / `api_orders` - HTTP contract, driven through the router
//! - `storefront_checkout` - Storefront client against a live local server
//! - `postgres_store` - `PgRepository` against a real database

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::net::SocketAddr;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use vibe_commerce_api::AppState;
use vibe_commerce_api::db::seed::seed_catalog;

/// Router over a fresh, empty in-memory store.
#[must_use]
pub fn app() -> Router {
    vibe_commerce_api::router(AppState::in_memory())
}

/// Router over an in-memory store holding the demo catalog.
pub async fn seeded_app() -> Router {
    let state = AppState::in_memory();
    seed_catalog(state.repository()).await.unwrap();
    vibe_commerce_api::router(state)
}

/// Send one request through the router and decode the JSON body.
///
/// Non-JSON bodies come back as `Value::String`.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

#[must_use]
pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

#[must_use]
pub fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

#[must_use]
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    json_request("POST", uri, body.to_string())
}

#[must_use]
pub fn put_json(uri: &str, body: &Value) -> Request<Body> {
    json_request("PUT", uri, body.to_string())
}

/// A JSON request with an arbitrary (possibly malformed) body.
#[must_use]
pub fn json_request(method: &str, uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

/// Serve the API on an ephemeral local port and return its `/api` base URL.
///
/// The server task lives until the test runtime shuts down.
pub async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    let app = vibe_commerce_api::router(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}
