//! # Inventory Actor
//!
//! Owns ingredient levels and the reservations held against them. Because one
//! actor serves every reserve and release, two confirms racing for the last
//! units of an ingredient are applied one after the other and at most one wins.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Inventory`]
//! - [`actions`] - [`InventoryAction`] and [`InventoryActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! Errors are [`StockError`](crate::stock::StockError), shared with the remote
//! stock client so callers see one taxonomy whichever backend is configured.
//!
//! ## Usage
//!
//! ```rust
//! use restaurant_orders::clients::InventoryClient;
//! use restaurant_orders::inventory_actor;
//! use restaurant_orders::model::{demo_levels, IngredientQuantity, OrderId};
//! use restaurant_orders::stock::StockCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = inventory_actor::new();
//!     tokio::spawn(actor.run(()));
//!
//!     let inventory = InventoryClient::provision(generic_client, demo_levels()).await?;
//!     inventory
//!         .reserve(OrderId::new(), &[IngredientQuantity::new("pan", 1)])
//!         .await?;
//!     assert_eq!(inventory.levels().await?["pan"], 99);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;

pub use actions::*;

use crate::model::Inventory;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Inventory actor and its client.
pub fn new() -> (ResourceActor<Inventory>, ResourceClient<Inventory>) {
    let mut next = 0u32;
    ResourceActor::new(32, move || {
        next += 1;
        format!("inventory_{next}")
    })
}
