//! # Restaurant Orders
//!
//! Order management for a restaurant floor: waitstaff place orders per table, the
//! kitchen is told what to cook and reports back when a dish is ready.
//!
//! - **[model]**: [`Order`](model::Order), its [`OrderState`](model::OrderState)
//!   machine, menu items and inventory data.
//! - **[order_actor]**: the Order Store. Enforces one active order per table and runs
//!   each transition's stock call as one serialised step.
//! - **[inventory_actor]** / **[stock]**: ingredient stock, in process or remote.
//! - **[clients]**: [`OrderClient`](clients::OrderClient), the operations callers use.
//! - **[kitchen]**: outbound tickets and webhook signatures.
//! - **[api]**: the HTTP surface.
//! - **[lifecycle]**: [`OrderSystem`](lifecycle::OrderSystem) wiring and shutdown.
//!
//! See [`actor_framework::mock`] for utilities to test clients without spawning actors.

pub mod api;
pub mod clients;
pub mod config;
pub mod inventory_actor;
pub mod kitchen;
pub mod lifecycle;
pub mod menu;
pub mod model;
pub mod order_actor;
pub mod stock;
