use super::OrderError;
use crate::menu::MenuCatalog;
use crate::model::{IngredientQuantity, MenuItem, OrderId, Reservation};
use crate::stock::StockCoordinator;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_STOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Dependencies injected into the Order actor at `run()` time.
///
/// Stock calls are awaited inside the actor's turn. That keeps a transition and its
/// stock side effect atomic with respect to every other request, but it also means a
/// slow stock service holds up all order traffic, reads and lists included, for up
/// to `stock_timeout`. Keep the timeout short.
#[derive(Clone)]
pub struct OrderContext {
    pub stock: Arc<dyn StockCoordinator>,
    pub menu: Arc<dyn MenuCatalog>,
    /// Upper bound on every stock call, and so on how long the actor can stall.
    pub stock_timeout: Duration,
}

impl OrderContext {
    pub fn new(stock: Arc<dyn StockCoordinator>, menu: Arc<dyn MenuCatalog>) -> Self {
        Self {
            stock,
            menu,
            stock_timeout: DEFAULT_STOCK_TIMEOUT,
        }
    }

    pub fn with_stock_timeout(mut self, timeout: Duration) -> Self {
        self.stock_timeout = timeout;
        self
    }

    /// The menu item an order may be placed for. Inactive items count as missing.
    pub fn orderable_item(&self, item_id: &str) -> Result<MenuItem, OrderError> {
        self.menu
            .get_item(item_id)
            .filter(|item| item.active)
            .ok_or_else(|| OrderError::UnknownMenuItem(item_id.to_string()))
    }

    pub async fn reserve(
        &self,
        order_id: OrderId,
        items: &[IngredientQuantity],
    ) -> Result<Reservation, OrderError> {
        self.bounded("reserve", self.stock.reserve(order_id, items))
            .await
    }

    pub async fn release(&self, order_id: OrderId) -> Result<(), OrderError> {
        self.bounded("release", self.stock.release(order_id)).await
    }

    async fn bounded<T, E>(
        &self,
        call: &str,
        fut: impl Future<Output = Result<T, E>>,
    ) -> Result<T, OrderError>
    where
        OrderError: From<E>,
    {
        match tokio::time::timeout(self.stock_timeout, fut).await {
            Ok(result) => result.map_err(OrderError::from),
            Err(_) => Err(OrderError::ExternalUnavailable(format!(
                "stock {call} timed out after {:?}",
                self.stock_timeout
            ))),
        }
    }
}
