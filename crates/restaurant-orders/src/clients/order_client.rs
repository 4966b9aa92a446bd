//! # Order Client
//!
//! The Order Service: the operations callers use to drive an order through its
//! lifecycle. It wraps a `ResourceClient<Order>`; the rules themselves live in the
//! Order actor's hooks, so a webhook and a direct API call reach the same code.
use crate::kitchen::{KitchenNotifier, KitchenTicket};
use crate::model::{Order, OrderCreate, OrderId, Transition};
use crate::order_actor::OrderError;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    kitchen: Arc<dyn KitchenNotifier>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, kitchen: Arc<dyn KitchenNotifier>) -> Self {
        Self { inner, kitchen }
    }

    /// Places a new order in `CREATED`.
    ///
    /// Fails with `TableOccupied` when the table already has an active order and with
    /// `NotFound` when the menu item is unknown.
    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("create_order called");
        let id = self.inner.create(params.normalized()).await?;
        info!(order_id = %id, "Order created");
        self.get_order(id).await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.inner
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// `CREATED -> IN_PREPARATION`, reserving the item's ingredients.
    ///
    /// On `InsufficientStock` or `ExternalUnavailable` the order stays `CREATED` and
    /// nothing is reserved. On success the kitchen gets a ticket in the background.
    #[instrument(skip(self))]
    pub async fn confirm(&self, id: OrderId) -> Result<Order, OrderError> {
        let order = self.transition(id, Transition::Confirm).await?;
        self.send_ticket(&order);
        Ok(order)
    }

    /// `IN_PREPARATION -> READY`. Also what the kitchen webhook calls.
    #[instrument(skip(self))]
    pub async fn mark_ready(&self, id: OrderId) -> Result<Order, OrderError> {
        self.transition(id, Transition::MarkReady).await
    }

    /// `READY -> DELIVERED`, stamping `delivered_at`.
    #[instrument(skip(self))]
    pub async fn deliver(&self, id: OrderId) -> Result<Order, OrderError> {
        self.transition(id, Transition::Deliver).await
    }

    /// `DELIVERED -> CLOSED`.
    #[instrument(skip(self))]
    pub async fn close(&self, id: OrderId) -> Result<Order, OrderError> {
        self.transition(id, Transition::Close).await
    }

    /// Any active state `-> CANCELLED`, releasing reserved stock if there is any.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<Order, OrderError> {
        self.transition(id, Transition::Cancel).await
    }

    /// Orders that are neither closed nor cancelled, oldest first.
    #[instrument(skip(self))]
    pub async fn active_orders(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(Order::is_active)
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn is_table_free(&self, table: &str) -> Result<bool, OrderError> {
        let table = table.trim();
        Ok(!self.list().await?.iter().any(|order| order.occupies(table)))
    }

    async fn transition(&self, id: OrderId, transition: Transition) -> Result<Order, OrderError> {
        self.inner
            .perform_action(id, transition)
            .await
            .map_err(OrderError::from)
    }

    fn send_ticket(&self, order: &Order) {
        let kitchen = self.kitchen.clone();
        let ticket = KitchenTicket::from(order);
        tokio::spawn(async move {
            if let Err(e) = kitchen.notify(&ticket).await {
                warn!(order_id = %ticket.id, error = %e, "Kitchen notification failed");
            }
        });
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        OrderError::from(e)
    }
}
