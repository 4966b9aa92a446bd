//! ActorEntity implementation for [`Order`].
//!
//! The actor serves one request at a time, so every hook below runs as a single
//! unit: the table check and the insert on create, and check state, call stock,
//! commit on each transition.

use super::{OrderContext, OrderError};
use crate::model::{Order, OrderCreate, OrderId, Transition};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::convert::Infallible;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    /// Orders change only through transitions.
    type Update = Infallible;
    type Action = Transition;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Order::new(id, params, Utc::now()))
    }

    /// Rejects unknown menu items and tables that already have an active order.
    fn validate_create(
        params: &OrderCreate,
        existing: &HashMap<OrderId, Order>,
        ctx: &OrderContext,
    ) -> Result<(), Self::Error> {
        ctx.orderable_item(&params.item)?;
        if let Some(table) = params.table.as_deref() {
            if existing.values().any(|order| order.occupies(table)) {
                return Err(OrderError::TableOccupied(table.to_string()));
            }
        }
        Ok(())
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &OrderContext) -> Result<(), Self::Error> {
        match update {}
    }

    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), Self::Error> {
        Err(OrderError::NotDeletable(self.id.to_string()))
    }

    /// Applies one transition.
    ///
    /// The state machine is consulted before any side effect, so a rejected move never
    /// reaches the stock service. `confirm` reserves the item's ingredients and
    /// `cancel` releases whatever the order holds; if that call fails the order is
    /// left exactly as it was.
    async fn handle_action(
        &mut self,
        transition: Transition,
        ctx: &OrderContext,
    ) -> Result<Order, Self::Error> {
        let next = self.next_state(transition)?;

        match transition {
            Transition::Confirm => {
                let item = ctx.orderable_item(&self.item)?;
                let reservation = ctx.reserve(self.id, &item.ingredients).await?;
                debug!(order_id = %self.id, lines = reservation.items.len(), "Stock reserved");
            }
            Transition::Cancel => {
                ctx.release(self.id).await?;
            }
            Transition::MarkReady | Transition::Deliver | Transition::Close => {}
        }

        let from = self.state;
        self.advance(next, Utc::now());
        info!(order_id = %self.id, %from, to = %next, "Transition");
        Ok(self.clone())
    }
}
