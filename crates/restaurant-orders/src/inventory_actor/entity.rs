//! ActorEntity implementation for [`Inventory`].

use super::actions::{InventoryAction, InventoryActionResult};
use crate::model::{
    IngredientQuantity, Inventory, InventoryCreate, OrderId, Reservation, Shortfall,
    StockLevels,
};
use crate::stock::StockError;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::convert::Infallible;
use tracing::debug;

#[async_trait]
impl ActorEntity for Inventory {
    type Id = String;
    type Create = InventoryCreate;
    /// Levels move only through reserve, release and restock.
    type Update = Infallible;
    type Action = InventoryAction;
    type ActionResult = InventoryActionResult;
    type Context = ();
    type Error = StockError;

    fn from_create_params(id: String, params: InventoryCreate) -> Result<Self, Self::Error> {
        Ok(Self::new(id, params.levels))
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: InventoryAction,
        _ctx: &(),
    ) -> Result<InventoryActionResult, Self::Error> {
        match action {
            InventoryAction::Reserve { order_id, items } => {
                self.reserve(order_id, &items).map(InventoryActionResult::Reserve)
            }
            InventoryAction::Release { order_id } => {
                Ok(InventoryActionResult::Release(self.release(order_id)))
            }
            InventoryAction::Levels => Ok(InventoryActionResult::Levels(self.levels.clone())),
            InventoryAction::Restock {
                ingredient,
                quantity,
            } => {
                let level = self.levels.entry(ingredient).or_insert(0);
                *level = level.saturating_add(quantity);
                Ok(InventoryActionResult::Restock(*level))
            }
        }
    }
}

impl Inventory {
    fn reserve(
        &mut self,
        order_id: OrderId,
        items: &[IngredientQuantity],
    ) -> Result<Reservation, StockError> {
        if let Some(existing) = self.reservations.get(&order_id) {
            debug!(%order_id, "Reservation already held");
            return Ok(existing.clone());
        }

        // Merge repeated ingredients so each is checked against its full demand.
        // A total past u32::MAX can never be met and is reported as short.
        let mut demand = StockLevels::new();
        let mut overflowed = BTreeSet::new();
        for line in items.iter().filter(|l| l.quantity > 0) {
            let total = demand.entry(line.ingredient.clone()).or_default();
            match total.checked_add(line.quantity) {
                Some(sum) => *total = sum,
                None => {
                    *total = u32::MAX;
                    overflowed.insert(line.ingredient.clone());
                }
            }
        }

        let short: Vec<Shortfall> = demand
            .iter()
            .filter_map(|(ingredient, &requested)| {
                let available = self.available(ingredient);
                (available < requested || overflowed.contains(ingredient)).then(|| Shortfall {
                    ingredient: ingredient.clone(),
                    requested,
                    available,
                })
            })
            .collect();
        if !short.is_empty() {
            return Err(StockError::InsufficientStock(short));
        }

        for (ingredient, requested) in &demand {
            if let Some(level) = self.levels.get_mut(ingredient) {
                *level -= requested;
            }
        }

        let reservation = Reservation {
            order_id,
            items: demand
                .into_iter()
                .map(|(ingredient, quantity)| IngredientQuantity {
                    ingredient,
                    quantity,
                })
                .collect(),
        };
        self.reservations.insert(order_id, reservation.clone());
        Ok(reservation)
    }

    fn release(&mut self, order_id: OrderId) -> Option<Reservation> {
        let reservation = self.reservations.remove(&order_id)?;
        for line in &reservation.items {
            let level = self.levels.entry(line.ingredient.clone()).or_insert(0);
            *level = level.saturating_add(line.quantity);
        }
        Some(reservation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::demo_levels;

    fn inventory(levels: &[(&str, u32)]) -> Inventory {
        Inventory::new(
            "inventory_1",
            levels.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        )
    }

    fn burger() -> Vec<IngredientQuantity> {
        vec![
            IngredientQuantity::new("pan", 1),
            IngredientQuantity::new("carne", 1),
            IngredientQuantity::new("lechuga", 1),
        ]
    }

    #[tokio::test]
    async fn test_reserve_takes_every_line() {
        let mut inv = Inventory::new("inventory_1", demo_levels());
        let order_id = OrderId::new();

        let result = inv
            .handle_action(
                InventoryAction::Reserve {
                    order_id,
                    items: burger(),
                },
                &(),
            )
            .await
            .unwrap();

        let InventoryActionResult::Reserve(reservation) = result else {
            panic!("Expected Reserve result");
        };
        assert_eq!(reservation.order_id, order_id);
        assert_eq!(inv.available("carne"), 79);
        assert_eq!(inv.available("pan"), 99);
        assert_eq!(inv.reserved().get("lechuga"), Some(&1));
    }

    #[tokio::test]
    async fn test_reserve_is_all_or_nothing_and_reports_every_shortfall() {
        let mut inv = inventory(&[("pan", 5), ("carne", 0)]);

        let err = inv
            .handle_action(
                InventoryAction::Reserve {
                    order_id: OrderId::new(),
                    items: burger(),
                },
                &(),
            )
            .await
            .unwrap_err();

        let StockError::InsufficientStock(short) = err else {
            panic!("Expected InsufficientStock");
        };
        let names: Vec<_> = short.iter().map(|s| s.ingredient.as_str()).collect();
        assert_eq!(names, vec!["carne", "lechuga"]);
        assert_eq!(inv.available("pan"), 5);
        assert!(inv.reservations.is_empty());
    }

    #[tokio::test]
    async fn test_reserve_twice_for_one_order_takes_stock_once() {
        let mut inv = inventory(&[("pan", 2), ("carne", 2), ("lechuga", 2)]);
        let order_id = OrderId::new();
        let reserve = || InventoryAction::Reserve {
            order_id,
            items: burger(),
        };

        let first = inv.handle_action(reserve(), &()).await.unwrap();
        let second = inv.handle_action(reserve(), &()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inv.available("carne"), 1);
    }

    #[tokio::test]
    async fn test_repeated_lines_are_checked_together() {
        let mut inv = inventory(&[("pan", 1)]);
        let items = vec![
            IngredientQuantity::new("pan", 1),
            IngredientQuantity::new("pan", 1),
        ];

        let err = inv
            .handle_action(
                InventoryAction::Reserve {
                    order_id: OrderId::new(),
                    items,
                },
                &(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StockError::InsufficientStock(ref s) if s[0].requested == 2 && s[0].available == 1
        ));
    }

    #[tokio::test]
    async fn test_demand_past_u32_max_is_short_not_fatal() {
        for level in [100, u32::MAX] {
            let mut inv = inventory(&[("pan", level)]);
            let items = vec![
                IngredientQuantity::new("pan", u32::MAX),
                IngredientQuantity::new("pan", 1),
            ];

            let err = inv
                .handle_action(
                    InventoryAction::Reserve {
                        order_id: OrderId::new(),
                        items,
                    },
                    &(),
                )
                .await
                .unwrap_err();
            let StockError::InsufficientStock(short) = err else {
                panic!("Expected InsufficientStock");
            };
            assert_eq!(short.len(), 1);
            assert_eq!(short[0].requested, u32::MAX);
            assert_eq!(short[0].available, level);
            assert_eq!(inv.available("pan"), level);
            assert!(inv.reservations.is_empty());
        }

        // The inventory keeps serving afterwards.
        let mut inv = inventory(&[("pan", 1), ("carne", 1), ("lechuga", 1)]);
        let _ = inv
            .handle_action(
                InventoryAction::Reserve {
                    order_id: OrderId::new(),
                    items: vec![
                        IngredientQuantity::new("pan", u32::MAX),
                        IngredientQuantity::new("pan", u32::MAX),
                    ],
                },
                &(),
            )
            .await;
        inv.handle_action(
            InventoryAction::Reserve {
                order_id: OrderId::new(),
                items: burger(),
            },
            &(),
        )
        .await
        .unwrap();
        assert_eq!(inv.available("pan"), 0);
    }

    #[test]
    fn test_reserved_saturates() {
        let mut inv = inventory(&[]);
        for quantity in [u32::MAX, 7] {
            let order_id = OrderId::new();
            inv.reservations.insert(
                order_id,
                Reservation {
                    order_id,
                    items: vec![IngredientQuantity::new("pan", quantity)],
                },
            );
        }
        assert_eq!(inv.reserved()["pan"], u32::MAX);
    }

    #[tokio::test]
    async fn test_release_restores_and_is_idempotent() {
        let mut inv = inventory(&[("pan", 1), ("carne", 1), ("lechuga", 1)]);
        let order_id = OrderId::new();
        inv.handle_action(
            InventoryAction::Reserve {
                order_id,
                items: burger(),
            },
            &(),
        )
        .await
        .unwrap();
        assert_eq!(inv.available("carne"), 0);

        let released = inv
            .handle_action(InventoryAction::Release { order_id }, &())
            .await
            .unwrap();
        assert!(matches!(released, InventoryActionResult::Release(Some(_))));
        assert_eq!(inv.available("carne"), 1);

        let again = inv
            .handle_action(InventoryAction::Release { order_id }, &())
            .await
            .unwrap();
        assert_eq!(again, InventoryActionResult::Release(None));
        assert_eq!(inv.available("carne"), 1);
    }

    #[tokio::test]
    async fn test_restock_adds_and_creates_ingredients() {
        let mut inv = inventory(&[("carne", 0)]);

        let result = inv
            .handle_action(
                InventoryAction::Restock {
                    ingredient: "carne".into(),
                    quantity: 4,
                },
                &(),
            )
            .await
            .unwrap();
        assert_eq!(result, InventoryActionResult::Restock(4));

        let result = inv
            .handle_action(
                InventoryAction::Restock {
                    ingredient: "queso".into(),
                    quantity: u32::MAX,
                },
                &(),
            )
            .await
            .unwrap();
        assert_eq!(result, InventoryActionResult::Restock(u32::MAX));
        inv.handle_action(
            InventoryAction::Restock {
                ingredient: "queso".into(),
                quantity: 1,
            },
            &(),
        )
        .await
        .unwrap();
        assert_eq!(inv.available("queso"), u32::MAX);
    }
}
