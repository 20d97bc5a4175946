//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                - Liveness check
//! GET    /health/ready          - Readiness check (store reachable)
//!
//! # Products
//! GET    /api/products          - List all products
//! POST   /api/products          - Create a product
//! GET    /api/products/{id}     - Product detail
//! PUT    /api/products/{id}     - Partial update
//! DELETE /api/products/{id}     - Delete a product
//!
//! # Orders
//! GET    /api/orders            - List orders, newest first
//! POST   /api/orders            - Place an order
//! GET    /api/orders/{id}       - Order detail (store id or ORD- number)
//! ```

pub mod extract;
pub mod health;
pub mod orders;
pub mod products;

use axum::{Router, routing::get};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index).post(orders::create))
        .route("/{id}", get(orders::show))
}

/// Create all routes with the request-id and tracing layers applied.
///
/// CORS and Sentry layers are environment-specific and added by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/products", product_routes())
        .nest("/api/orders", order_routes())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
