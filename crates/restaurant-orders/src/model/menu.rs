use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One ingredient line of a recipe or a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    pub ingredient: String,
    pub quantity: u32,
}

impl IngredientQuantity {
    pub fn new(ingredient: impl Into<String>, quantity: u32) -> Self {
        Self {
            ingredient: ingredient.into(),
            quantity,
        }
    }
}

impl Display for IngredientQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.quantity, self.ingredient)
    }
}

/// A dish that can be ordered.
///
/// Read-only to the order core, which only needs the id, the name and the recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub ingredients: Vec<IngredientQuantity>,
}

fn default_active() -> bool {
    true
}

impl MenuItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        ingredients: impl IntoIterator<Item = (&'static str, u32)>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: None,
            active: true,
            ingredients: ingredients
                .into_iter()
                .map(|(ingredient, quantity)| IngredientQuantity::new(ingredient, quantity))
                .collect(),
        }
    }
}
