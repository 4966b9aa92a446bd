//! Error types for the Order actor.

use crate::model::{Shortfall, TransitionError};
use crate::stock::{self, StockError};
use actor_framework::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
///
/// Every variant maps to one stable [`kind`](OrderError::kind), which the HTTP layer
/// turns into a status code.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order names a menu item that does not exist or is not offered.
    #[error("Menu item not found: {0}")]
    UnknownMenuItem(String),

    /// The order's current state has no edge for the requested transition.
    #[error("Invalid state: {0}")]
    InvalidState(#[from] TransitionError),

    /// Orders are kept for good; they end as CLOSED or CANCELLED instead.
    #[error("Order {0} cannot be deleted; close or cancel it")]
    NotDeletable(String),

    /// The table already has an order that is neither closed nor cancelled.
    #[error("Table {0} already has an active order")]
    TableOccupied(String),

    /// Stock could not cover the order. Lists every short ingredient.
    #[error("Insufficient stock: {}", stock::error::describe(.0))]
    InsufficientStock(Vec<Shortfall>),

    /// A collaborator (stock service) timed out or failed. Safe to retry.
    #[error("External service unavailable: {0}")]
    ExternalUnavailable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl OrderError {
    /// Stable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            OrderError::NotFound(_) | OrderError::UnknownMenuItem(_) => "NotFound",
            OrderError::InvalidState(_) | OrderError::NotDeletable(_) => "InvalidState",
            OrderError::TableOccupied(_) => "TableOccupied",
            OrderError::InsufficientStock(_) => "InsufficientStock",
            OrderError::ExternalUnavailable(_) => "ExternalUnavailable",
            OrderError::ActorCommunicationError(_) => "Internal",
        }
    }

    /// True when repeating the same call later may succeed without any other change.
    pub fn is_retryable(&self) -> bool {
        matches!(self, OrderError::ExternalUnavailable(_))
    }

    /// The short ingredients, for `InsufficientStock`.
    pub fn shortfalls(&self) -> Option<&[Shortfall]> {
        match self {
            OrderError::InsufficientStock(short) => Some(short),
            _ => None,
        }
    }
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<StockError> for OrderError {
    fn from(e: StockError) -> Self {
        match e {
            StockError::InsufficientStock(short) => OrderError::InsufficientStock(short),
            StockError::Unavailable(msg) | StockError::ActorCommunicationError(msg) => {
                OrderError::ExternalUnavailable(msg)
            }
        }
    }
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => match other.into_entity_error::<OrderError>() {
                Ok(order) => order,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderState, Transition};

    #[test]
    fn test_kinds_and_retryability() {
        let invalid = OrderError::from(TransitionError {
            from: OrderState::Cancelled,
            transition: Transition::Confirm,
        });
        assert_eq!(invalid.kind(), "InvalidState");
        assert!(!invalid.is_retryable());

        let down = OrderError::from(StockError::Unavailable("timeout".into()));
        assert_eq!(down.kind(), "ExternalUnavailable");
        assert!(down.is_retryable());
    }

    #[test]
    fn test_insufficient_stock_names_ingredients() {
        let err = OrderError::from(StockError::InsufficientStock(vec![Shortfall {
            ingredient: "carne".into(),
            requested: 1,
            available: 0,
        }]));
        assert_eq!(err.to_string(), "Insufficient stock: carne (need 1, have 0)");
        assert_eq!(err.shortfalls().map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_framework_errors_map_to_order_errors() {
        let missing = OrderError::from(FrameworkError::NotFound("abc".into()));
        assert_eq!(missing, OrderError::NotFound("abc".into()));

        let boxed = FrameworkError::EntityError(Box::new(OrderError::TableOccupied("T5".into())));
        assert_eq!(
            OrderError::from(boxed),
            OrderError::TableOccupied("T5".into())
        );

        let closed = OrderError::from(FrameworkError::ActorClosed);
        assert_eq!(closed.kind(), "Internal");
    }
}
