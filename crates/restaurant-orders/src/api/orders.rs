use super::{ApiError, AppState};
use crate::model::{MenuItem, Order, OrderCreate, OrderId, StockLevels};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStatus {
    pub table: String,
    pub free: bool,
}

pub(crate) fn parse_id(raw: &str) -> Result<OrderId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest(format!("'{raw}' is not an order id")))
}

pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderCreate>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let Json(params) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let order = state.orders.create_order(params).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.get_order(parse_id(&id)?).await?))
}

pub async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.confirm(parse_id(&id)?).await?))
}

pub async fn mark_ready(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.mark_ready(parse_id(&id)?).await?))
}

pub async fn deliver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.deliver(parse_id(&id)?).await?))
}

pub async fn close(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.close(parse_id(&id)?).await?))
}

pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.orders.cancel(parse_id(&id)?).await?))
}

/// Active orders, oldest first: the kitchen's queue.
pub async fn kitchen_queue(State(state): State<AppState>) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.orders.active_orders().await?))
}

pub async fn table_free(
    State(state): State<AppState>,
    Path(table): Path<String>,
) -> Result<Json<TableStatus>, ApiError> {
    let free = state.orders.is_table_free(&table).await?;
    Ok(Json(TableStatus { table, free }))
}

pub async fn menu(State(state): State<AppState>) -> Json<Vec<MenuItem>> {
    Json(state.menu.items())
}

pub async fn stock_levels(State(state): State<AppState>) -> Result<Json<StockLevels>, ApiError> {
    Ok(Json(state.stock.levels().await?))
}
