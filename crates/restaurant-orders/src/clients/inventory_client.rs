//! # Inventory Client
//!
//! Typed access to one inventory held by the Inventory actor. Implements
//! [`StockCoordinator`] so the order actor can use it directly.
use crate::inventory_actor::{InventoryAction, InventoryActionResult};
use crate::model::{
    IngredientQuantity, Inventory, InventoryCreate, OrderId, Reservation, StockLevels,
};
use crate::stock::{StockCoordinator, StockError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<Inventory>,
    id: String,
}

fn map_framework_error(e: FrameworkError) -> StockError {
    match e.into_entity_error::<StockError>() {
        Ok(stock) => stock,
        Err(other) => StockError::ActorCommunicationError(other.to_string()),
    }
}

impl InventoryClient {
    /// Wraps an existing inventory.
    pub fn new(inner: ResourceClient<Inventory>, id: impl Into<String>) -> Self {
        Self {
            inner,
            id: id.into(),
        }
    }

    /// Creates a fresh inventory stocked with `levels` and returns a client bound to it.
    #[instrument(skip(inner, levels), fields(ingredients = levels.len()))]
    pub async fn provision(
        inner: ResourceClient<Inventory>,
        levels: StockLevels,
    ) -> Result<Self, StockError> {
        let id = inner
            .create(InventoryCreate { levels })
            .await
            .map_err(map_framework_error)?;
        debug!(%id, "Inventory provisioned");
        Ok(Self::new(inner, id))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    async fn act(&self, action: InventoryAction) -> Result<InventoryActionResult, StockError> {
        self.inner
            .perform_action(self.id.clone(), action)
            .await
            .map_err(map_framework_error)
    }

    /// Adds `quantity` units of `ingredient`, returning the new level.
    #[instrument(skip(self))]
    pub async fn restock(&self, ingredient: &str, quantity: u32) -> Result<u32, StockError> {
        match self
            .act(InventoryAction::Restock {
                ingredient: ingredient.to_string(),
                quantity,
            })
            .await?
        {
            InventoryActionResult::Restock(level) => Ok(level),
            other => Err(unexpected("Restock", &other)),
        }
    }
}

fn unexpected(action: &str, result: &InventoryActionResult) -> StockError {
    StockError::ActorCommunicationError(format!("{action} answered with {result:?}"))
}

#[async_trait]
impl StockCoordinator for InventoryClient {
    #[instrument(skip(self, items))]
    async fn reserve(
        &self,
        order_id: OrderId,
        items: &[IngredientQuantity],
    ) -> Result<Reservation, StockError> {
        debug!(lines = items.len(), "Reserving");
        match self
            .act(InventoryAction::Reserve {
                order_id,
                items: items.to_vec(),
            })
            .await?
        {
            InventoryActionResult::Reserve(reservation) => Ok(reservation),
            other => Err(unexpected("Reserve", &other)),
        }
    }

    #[instrument(skip(self))]
    async fn release(&self, order_id: OrderId) -> Result<(), StockError> {
        match self.act(InventoryAction::Release { order_id }).await? {
            InventoryActionResult::Release(released) => {
                debug!(released = released.is_some(), "Released");
                Ok(())
            }
            other => Err(unexpected("Release", &other)),
        }
    }

    #[instrument(skip(self))]
    async fn levels(&self) -> Result<StockLevels, StockError> {
        match self.act(InventoryAction::Levels).await? {
            InventoryActionResult::Levels(levels) => Ok(levels),
            other => Err(unexpected("Levels", &other)),
        }
    }
}

#[async_trait]
impl ActorClient<Inventory> for InventoryClient {
    type Error = StockError;

    fn inner(&self) -> &ResourceClient<Inventory> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        map_framework_error(e)
    }
}
