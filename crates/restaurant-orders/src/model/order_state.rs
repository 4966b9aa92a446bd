//! # Order State Machine
//!
//! Pure transition logic for an order's lifecycle:
//!
//! ```text
//! CREATED --confirm--> IN_PREPARATION --mark_ready--> READY --deliver--> DELIVERED --close--> CLOSED
//!    \___________________\________________________________\_____________________\--cancel--> CANCELLED
//! ```
//!
//! `CLOSED` and `CANCELLED` are terminal. Nothing here performs I/O; the order actor
//! asks [`OrderState::apply`] first and only then runs side effects such as stock
//! reservation.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Created,
    InPreparation,
    Ready,
    Delivered,
    Closed,
    Cancelled,
}

/// A requested move between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    Confirm,
    MarkReady,
    Deliver,
    Close,
    Cancel,
}

/// The machine has no edge for `transition` out of `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot {transition} an order that is {from}")]
pub struct TransitionError {
    pub from: OrderState,
    pub transition: Transition,
}

impl OrderState {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderState::Closed | OrderState::Cancelled)
    }

    /// Active orders hold their table and show up in the kitchen view.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Transitions with an edge out of this state.
    pub fn allowed_transitions(self) -> &'static [Transition] {
        match self {
            OrderState::Created => &[Transition::Confirm, Transition::Cancel],
            OrderState::InPreparation => &[Transition::MarkReady, Transition::Cancel],
            OrderState::Ready => &[Transition::Deliver, Transition::Cancel],
            OrderState::Delivered => &[Transition::Close, Transition::Cancel],
            OrderState::Closed | OrderState::Cancelled => &[],
        }
    }

    /// Decides the next state, or rejects the move.
    pub fn apply(self, transition: Transition) -> Result<OrderState, TransitionError> {
        use OrderState::*;

        let next = match (self, transition) {
            (Created, Transition::Confirm) => InPreparation,
            (InPreparation, Transition::MarkReady) => Ready,
            (Ready, Transition::Deliver) => Delivered,
            (Delivered, Transition::Close) => Closed,
            (Created | InPreparation | Ready | Delivered, Transition::Cancel) => Cancelled,
            (from, transition) => return Err(TransitionError { from, transition }),
        };
        Ok(next)
    }
}

impl Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderState::Created => "CREATED",
            OrderState::InPreparation => "IN_PREPARATION",
            OrderState::Ready => "READY",
            OrderState::Delivered => "DELIVERED",
            OrderState::Closed => "CLOSED",
            OrderState::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Transition::Confirm => "confirm",
            Transition::MarkReady => "mark_ready",
            Transition::Deliver => "deliver",
            Transition::Close => "close",
            Transition::Cancel => "cancel",
        };
        f.write_str(name)
    }
}
