//! Represents a customer order.
//!
//! # Actor Framework
//! This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
//! allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
//!
//! See [`crate::order_actor`] for the hooks: table check on create, stock calls on
//! confirm and cancel.

use crate::model::{OrderState, Transition, TransitionError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub Uuid);

impl OrderId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for OrderId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub table: Option<String>,
    pub customer: Option<String>,
    /// Menu item id.
    pub item: String,
    pub state: OrderState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Stamped the first time the order reaches `DELIVERED`, never cleared.
    pub delivered_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    pub item: String,
}

impl OrderCreate {
    pub fn new(table: Option<&str>, customer: Option<&str>, item: impl Into<String>) -> Self {
        Self {
            table: table.map(str::to_string),
            customer: customer.map(str::to_string),
            item: item.into(),
        }
    }

    /// Trims the free-text fields; a blank table or customer means "none".
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }
        Self {
            table: clean(self.table),
            customer: clean(self.customer),
            item: self.item.trim().to_string(),
        }
    }
}

impl Order {
    /// Creates a new order in `CREATED`.
    pub fn new(id: OrderId, params: OrderCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            table: params.table,
            customer: params.customer,
            item: params.item,
            state: OrderState::Created,
            created_at: now,
            updated_at: now,
            delivered_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// True while this order holds `table`.
    pub fn occupies(&self, table: &str) -> bool {
        self.is_active() && self.table.as_deref() == Some(table)
    }

    /// Where `transition` would take this order, without changing it.
    pub fn next_state(&self, transition: Transition) -> Result<OrderState, TransitionError> {
        self.state.apply(transition)
    }

    /// Records an accepted transition.
    pub fn advance(&mut self, next: OrderState, at: DateTime<Utc>) {
        self.state = next;
        self.updated_at = at;
        if next == OrderState::Delivered && self.delivered_at.is_none() {
            self.delivered_at = Some(at);
        }
    }
}
