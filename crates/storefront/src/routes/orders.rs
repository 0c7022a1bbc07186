//! Order history route handlers.
//!
//! Deleting an order or changing its status with an id that matches nothing
//! is a silent no-op and answers 204 like a successful change.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use boxpaper_core::{Order, OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::storage;

/// Body for a status change.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// List orders, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = state.orders().clone();
    Ok(Json(storage::blocking(move || orders.orders()).await?))
}

#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Order>> {
    let orders = state.orders().clone();
    let order_id = OrderId::new(id.as_str());
    storage::blocking(move || orders.find_order(&order_id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))
}

/// Delete an order.
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    let orders = state.orders().clone();
    let order_id = OrderId::new(id);
    if !storage::blocking(move || orders.delete_order(&order_id)).await?? {
        tracing::debug!("No such order, nothing deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Change an order's status.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<StatusCode> {
    let orders = state.orders().clone();
    let order_id = OrderId::new(id);
    if !storage::blocking(move || orders.update_order_status(&order_id, body.status)).await?? {
        tracing::debug!("No such order, status unchanged");
    }
    Ok(StatusCode::NO_CONTENT)
}
