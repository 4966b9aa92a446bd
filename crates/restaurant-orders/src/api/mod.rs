//! # HTTP API
//!
//! Thin axum handlers over [`OrderClient`]. Every rule lives below this layer; the
//! handlers parse input, call one client method and map [`ApiError`] to a status.
//!
//! | Route | Operation |
//! |---|---|
//! | `POST /api/orders` | create (201) |
//! | `GET /api/orders/{id}` | get |
//! | `POST /api/orders/{id}/{confirm,ready,deliver,close,cancel}` | transitions |
//! | `GET /api/kitchen/orders` | active orders, oldest first |
//! | `POST /api/webhooks/kitchen/order-ready` | kitchen webhook (204) |
//! | `GET /api/tables/{table}/free` | table availability |
//! | `GET /api/menu` | offered items |
//! | `GET /api/stock` | stock levels |
//! | `GET /health` | liveness |

pub mod error;
pub mod orders;
pub mod webhook;

pub use error::{ApiError, ErrorResponse};
pub use webhook::WebhookAuth;

use crate::clients::OrderClient;
use crate::menu::MenuCatalog;
use crate::stock::StockCoordinator;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub orders: OrderClient,
    pub stock: Arc<dyn StockCoordinator>,
    pub menu: Arc<dyn MenuCatalog>,
    pub webhook: WebhookAuth,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/orders", post(orders::create_order))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/confirm", post(orders::confirm))
        .route("/orders/{id}/ready", post(orders::mark_ready))
        .route("/orders/{id}/deliver", post(orders::deliver))
        .route("/orders/{id}/close", post(orders::close))
        .route("/orders/{id}/cancel", post(orders::cancel))
        .route("/kitchen/orders", get(orders::kitchen_queue))
        .route("/webhooks/kitchen/order-ready", post(webhook::order_ready))
        .route("/tables/{table}/free", get(orders::table_free))
        .route("/menu", get(orders::menu))
        .route("/stock", get(orders::stock_levels));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
