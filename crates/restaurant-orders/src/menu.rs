//! # Menu Lookup
//!
//! The order core only reads the menu: it needs to know that an item exists and
//! which ingredients it consumes. [`MenuCatalog`] is that narrow view.

use crate::model::MenuItem;
use std::collections::BTreeMap;

pub trait MenuCatalog: Send + Sync {
    fn get_item(&self, item_id: &str) -> Option<MenuItem>;

    /// Items currently offered, ordered by id.
    fn items(&self) -> Vec<MenuItem>;
}

/// A menu fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticMenu {
    items: BTreeMap<String, MenuItem>,
}

impl StaticMenu {
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        Self {
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    pub fn demo() -> Self {
        Self::new(demo_items())
    }
}

impl MenuCatalog for StaticMenu {
    fn get_item(&self, item_id: &str) -> Option<MenuItem> {
        self.items.get(item_id).cloned()
    }

    fn items(&self) -> Vec<MenuItem> {
        self.items.values().filter(|i| i.active).cloned().collect()
    }
}

pub fn demo_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new(
            "HAMB_CARNE",
            "Hamburguesa de carne",
            [("pan", 1), ("carne", 1), ("lechuga", 1)],
        ),
        MenuItem::new(
            "HAMB_POLLO",
            "Hamburguesa de pollo",
            [("pan", 1), ("pollo", 1), ("lechuga", 1)],
        ),
        MenuItem::new("FIDEOS_CARNE", "Fideos con carne", [("fideos", 1), ("carne", 1)]),
        MenuItem::new("FIDEOS_POLLO", "Fideos con pollo", [("fideos", 1), ("pollo", 1)]),
        MenuItem::new("ENSALADA", "Ensalada clásica", [("lechuga", 1)]),
        MenuItem::new("HOTDOG", "Hot Dog", [("pan", 1)]),
    ]
}
