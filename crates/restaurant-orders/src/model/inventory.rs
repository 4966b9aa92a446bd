use crate::model::{IngredientQuantity, OrderId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

/// Ingredient name -> units on hand.
pub type StockLevels = BTreeMap<String, u32>;

/// Ingredient counts plus the reservations currently held against them.
///
/// # Actor Framework
/// Managed by the inventory actor (see [`crate::inventory_actor`]). A single
/// `Inventory` entity holds every ingredient so one reservation across several
/// ingredients is checked and applied in one actor turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub id: String,
    pub levels: StockLevels,
    pub reservations: HashMap<OrderId, Reservation>,
}

/// Payload for creating an inventory.
#[derive(Debug, Clone, Default)]
pub struct InventoryCreate {
    pub levels: StockLevels,
}

/// Ingredients held for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub order_id: OrderId,
    pub items: Vec<IngredientQuantity>,
}

/// An ingredient that could not cover a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub ingredient: String,
    pub requested: u32,
    pub available: u32,
}

impl Display for Shortfall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (need {}, have {})",
            self.ingredient, self.requested, self.available
        )
    }
}

impl Inventory {
    pub fn new(id: impl Into<String>, levels: StockLevels) -> Self {
        Self {
            id: id.into(),
            levels,
            reservations: HashMap::new(),
        }
    }

    pub fn available(&self, ingredient: &str) -> u32 {
        self.levels.get(ingredient).copied().unwrap_or(0)
    }

    /// Units held by outstanding reservations, per ingredient.
    pub fn reserved(&self) -> StockLevels {
        let mut held = StockLevels::new();
        for line in self.reservations.values().flat_map(|r| &r.items) {
            let total = held.entry(line.ingredient.clone()).or_default();
            *total = total.saturating_add(line.quantity);
        }
        held
    }
}

/// Demo stock the service starts with when nothing is configured.
pub fn demo_levels() -> StockLevels {
    [
        ("pan", 100),
        ("lechuga", 120),
        ("tomate", 120),
        ("cebolla", 100),
        ("carne", 80),
        ("pollo", 80),
        ("queso", 90),
        ("papas", 150),
        ("fideos", 100),
        ("salsa_pomodoro", 80),
        ("aceite", 200),
        ("sal", 200),
        ("azucar", 80),
        ("arroz", 100),
        ("mayonesa", 80),
    ]
    .into_iter()
    .map(|(name, qty)| (name.to_string(), qty))
    .collect()
}
