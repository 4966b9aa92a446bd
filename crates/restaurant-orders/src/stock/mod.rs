//! # Stock Coordination
//!
//! The order actor never touches ingredient counts. It asks a [`StockCoordinator`]
//! to reserve an order's ingredients on confirm and to release them on cancel.
//!
//! Two implementations exist:
//! - [`InventoryClient`](crate::clients::InventoryClient): the in-process inventory actor.
//! - [`RemoteStock`]: an inventory service reached over HTTP.
//!
//! [`server`] exposes the in-process inventory with the same wire format
//! [`RemoteStock`] speaks, so one process can act as the other's stock service.
//!
//! ## Contract
//!
//! - `reserve` is all-or-nothing. When any ingredient is short nothing is taken and
//!   every short ingredient is reported.
//! - `reserve` for an order that already holds a reservation returns it unchanged.
//! - `release` for an order without a reservation is a no-op.

pub mod error;
pub mod remote;
pub mod server;

pub use error::*;
pub use remote::RemoteStock;

use crate::model::{IngredientQuantity, OrderId, Reservation, Shortfall, StockLevels};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[async_trait]
pub trait StockCoordinator: Send + Sync {
    async fn reserve(
        &self,
        order_id: OrderId,
        items: &[IngredientQuantity],
    ) -> Result<Reservation, StockError>;

    async fn release(&self, order_id: OrderId) -> Result<(), StockError>;

    async fn levels(&self) -> Result<StockLevels, StockError>;
}

/// `POST /stock/reserve` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub order_id: OrderId,
    pub items: Vec<IngredientQuantity>,
}

/// `POST /stock/release` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseRequest {
    pub order_id: OrderId,
}

/// `409` body of `POST /stock/reserve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortageResponse {
    pub short: Vec<Shortfall>,
}
