//! Custom actions for the Inventory actor.

use crate::model::{IngredientQuantity, OrderId, Reservation, StockLevels};

/// Operations on the inventory beyond CRUD.
#[derive(Debug, Clone)]
pub enum InventoryAction {
    /// Takes the listed quantities for an order, all or nothing.
    ///
    /// # Errors
    /// Fails with every short ingredient when any line cannot be covered.
    Reserve {
        order_id: OrderId,
        items: Vec<IngredientQuantity>,
    },
    /// Returns an order's reserved quantities to the shelf.
    Release { order_id: OrderId },
    /// Reads the current levels.
    Levels,
    /// Adds units of one ingredient.
    Restock { ingredient: String, quantity: u32 },
}

/// Results from InventoryActions - variants match 1:1 with InventoryAction
#[derive(Debug, Clone, PartialEq)]
pub enum InventoryActionResult {
    Reserve(Reservation),
    /// The reservation that was returned, if the order held one.
    Release(Option<Reservation>),
    Levels(StockLevels),
    /// The ingredient's new level.
    Restock(u32),
}
