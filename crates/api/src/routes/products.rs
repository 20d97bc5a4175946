//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use vibe_commerce_core::{NewProduct, Product, ProductId, ProductUpdate};

use super::extract::ApiJson;
use crate::error::{AppError, MessageResponse, Result};
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Product not found".to_string())
}

/// A malformed identifier cannot name a stored product.
fn parse_id(raw: &str) -> Result<ProductId> {
    ProductId::parse(raw).map_err(|_| not_found())
}

/// List every product.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.repository().list_products().await?;
    Ok(Json(products))
}

/// Fetch one product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    state
        .repository()
        .get_product(id)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// Create a product.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    input.validate()?;
    let product = state.repository().create_product(input).await?;
    tracing::info!(product_id = %product.id, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Partially update a product.
#[instrument(skip(state, update))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> Result<Json<Product>> {
    let id = parse_id(&id)?;
    update.validate()?;
    state
        .repository()
        .update_product(id, update)
        .await?
        .map(Json)
        .ok_or_else(not_found)
}

/// Delete a product.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let id = parse_id(&id)?;
    if !state.repository().delete_product(id).await? {
        return Err(not_found());
    }
    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(MessageResponse::new("Product deleted")))
}
