//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use vibe_commerce_core::{NewOrder, Order, OrderId, OrderNumber};

use super::extract::ApiJson;
use crate::error::{AppError, Result};
use crate::services::orders::place_order;
use crate::state::AppState;

/// Place an order.
#[instrument(skip(state, request))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NewOrder>,
) -> Result<(StatusCode, Json<Order>)> {
    let order = place_order(&state, request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = state.repository().list_orders().await?;
    Ok(Json(orders))
}

/// Fetch one order by store id or by `ORD-` number.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Order>> {
    let repository = state.repository();
    let order = if let Ok(id) = OrderId::parse(&id) {
        repository.get_order(id).await?
    } else if let Ok(number) = OrderNumber::parse(&id) {
        repository.get_order_by_number(&number).await?
    } else {
        None
    };

    order
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))
}
