//! HTTP face of the in-process inventory, speaking the wire format [`RemoteStock`]
//! expects:
//!
//! | Route | Success | Failure |
//! |---|---|---|
//! | `POST /stock/reserve` | `200` + reservation | `409` + `{short: [...]}` |
//! | `POST /stock/release` | `204` | `503` |
//! | `GET /stock/levels` | `200` + `{ingredient: qty}` | `503` |
//!
//! [`RemoteStock`]: super::RemoteStock

use super::{ReleaseRequest, ReserveRequest, ShortageResponse, StockCoordinator, StockError};
use crate::clients::InventoryClient;
use crate::model::{Reservation, StockLevels};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

pub fn router(inventory: InventoryClient) -> Router {
    Router::new()
        .route("/stock/reserve", post(reserve))
        .route("/stock/release", post(release))
        .route("/stock/levels", get(levels))
        .with_state(inventory)
}

impl IntoResponse for StockError {
    fn into_response(self) -> Response {
        match self {
            StockError::InsufficientStock(short) => {
                (StatusCode::CONFLICT, Json(ShortageResponse { short })).into_response()
            }
            other => (StatusCode::SERVICE_UNAVAILABLE, other.to_string()).into_response(),
        }
    }
}

async fn reserve(
    State(inventory): State<InventoryClient>,
    Json(request): Json<ReserveRequest>,
) -> Result<Json<Reservation>, StockError> {
    inventory
        .reserve(request.order_id, &request.items)
        .await
        .map(Json)
}

async fn release(
    State(inventory): State<InventoryClient>,
    Json(request): Json<ReleaseRequest>,
) -> Result<StatusCode, StockError> {
    inventory.release(request.order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn levels(State(inventory): State<InventoryClient>) -> Result<Json<StockLevels>, StockError> {
    inventory.levels().await.map(Json)
}
