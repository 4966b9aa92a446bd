//! # Actor Framework
//!
//! Building blocks for type-safe actor systems on Tokio, organised around
//! **resources**: each resource type gets one actor that owns every instance of it and
//! serves a uniform Create / Get / List / Update / Delete / Action protocol.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): domain model and business rules, written as hooks.
//! 2. **Runtime Layer** ([`ResourceActor`]): message loop, store ownership, logging.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): typed async calls.
//!
//! Resources coordinate through **Action messages** rather than shared state: an order
//! that needs stock sends a `Reserve` action to the inventory actor instead of touching
//! inventory counts itself.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task.
//! - Messages are processed **sequentially** within an actor, so hooks never race each other.
//! - Different actors run in parallel.
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run(context)`, not to `new()`. All actors can be
//! constructed first and wired afterwards:
//!
//! ```rust,ignore
//! let (inventory_actor, inventory_client) = inventory::new();
//! let (order_actor, order_client) = order_actor::new();
//!
//! tokio::spawn(inventory_actor.run(()));
//! tokio::spawn(order_actor.run(OrderContext::new(Arc::new(inventory_client), menu)));
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for scripted clients that need no running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
