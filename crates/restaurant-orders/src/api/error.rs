use crate::order_actor::OrderError;
use crate::stock::StockError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error(transparent)]
    Stock(#[from] StockError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    /// Short ingredients, for `InsufficientStock`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Order(e) => match e {
                OrderError::NotFound(_) | OrderError::UnknownMenuItem(_) => StatusCode::NOT_FOUND,
                OrderError::InvalidState(_)
                | OrderError::NotDeletable(_)
                | OrderError::TableOccupied(_) => StatusCode::CONFLICT,
                OrderError::InsufficientStock(_) => StatusCode::UNPROCESSABLE_ENTITY,
                OrderError::ExternalUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                OrderError::ActorCommunicationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Stock(e) => match e {
                StockError::InsufficientStock(_) => StatusCode::UNPROCESSABLE_ENTITY,
                StockError::Unavailable(_) | StockError::ActorCommunicationError(_) => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Order(e) => e.kind(),
            ApiError::Stock(StockError::InsufficientStock(_)) => "InsufficientStock",
            ApiError::Stock(_) => "ExternalUnavailable",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::Forbidden(_) => "Forbidden",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        let short = match self {
            ApiError::Order(e) => e.shortfalls(),
            ApiError::Stock(StockError::InsufficientStock(short)) => Some(short.as_slice()),
            _ => None,
        };
        ErrorResponse {
            error: self.kind().to_string(),
            message: self.to_string(),
            ingredients: short.map(|s| s.iter().map(|s| s.ingredient.clone()).collect()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(%status, error = %self, "Request failed");
        } else {
            tracing::debug!(%status, error = %self, "Request rejected");
        }
        (status, Json(self.to_error_response())).into_response()
    }
}
