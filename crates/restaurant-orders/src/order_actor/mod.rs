//! # Order Actor
//!
//! The Order Store. One actor owns every order and applies the lifecycle rules:
//!
//! - **Create**: the menu item must exist and the table must not already hold an
//!   active order. Both checks and the insert happen in one actor turn, so concurrent
//!   creates for the same table yield exactly one order.
//! - **Transitions**: [`Transition`](crate::model::Transition) actions, validated by
//!   the state machine before any stock call is made.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] and its stable kinds
//! - [`context`] - [`OrderContext`], the stock and menu dependencies injected at `run()`
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (order_actor, generic_client) = order_actor::new();
//! tokio::spawn(order_actor.run(OrderContext::new(stock, menu)));
//! let orders = OrderClient::new(generic_client, kitchen);
//! ```

pub mod context;
pub mod entity;
pub mod error;

pub use context::*;
pub use error::*;

use crate::model::{Order, OrderId};
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client. Ids are random UUIDs.
pub fn new() -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(64, OrderId::new)
}
