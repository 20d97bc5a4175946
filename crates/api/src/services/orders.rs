//! Order placement.
//!
//! The request is stored as sent: item names, prices and the total are the
//! client's values. Products are not looked up and stock is not touched.

use chrono::Utc;
use tracing::instrument;

use vibe_commerce_core::{NewOrder, Order, OrderId, OrderStatus};

use crate::error::Result;
use crate::state::AppState;

/// Validate, stamp and persist a new order.
///
/// # Errors
///
/// Returns `AppError::BadRequest` if the customer name or email is empty,
/// or the store error if persisting fails.
#[instrument(skip(state, request), fields(items = request.items.len()))]
pub async fn place_order(state: &AppState, request: NewOrder) -> Result<Order> {
    request.validate()?;

    let order = Order {
        id: OrderId::generate(),
        order_id: state.order_numbers().next(),
        customer: request.customer,
        items: request.items,
        total: request.total,
        status: OrderStatus::Confirmed,
        created_at: Utc::now(),
    };

    let order = state.repository().insert_order(order).await?;
    tracing::info!(order_id = %order.order_id, total = %order.total, "Order placed");
    Ok(order)
}
