//! Error types for stock coordination.

use crate::model::Shortfall;
use thiserror::Error;

/// Errors that can occur while reserving or releasing stock.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StockError {
    /// At least one ingredient cannot cover the request. Nothing was reserved.
    #[error("Insufficient stock: {}", describe(.0))]
    InsufficientStock(Vec<Shortfall>),

    /// The stock service could not be reached or answered unexpectedly.
    #[error("Stock service unavailable: {0}")]
    Unavailable(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for StockError {
    fn from(msg: String) -> Self {
        StockError::ActorCommunicationError(msg)
    }
}

pub(crate) fn describe(short: &[Shortfall]) -> String {
    short
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
