use super::{ReleaseRequest, ReserveRequest, ShortageResponse, StockCoordinator, StockError};
use crate::model::{IngredientQuantity, OrderId, Reservation, StockLevels};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Stock coordinator backed by an inventory service over HTTP.
///
/// Every request is bounded by the client timeout. Transport failures, timeouts and
/// unexpected statuses all surface as [`StockError::Unavailable`]; only a `409` with a
/// shortage body means the stock itself is short.
#[derive(Debug, Clone)]
pub struct RemoteStock {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteStock {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StockError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StockError::Unavailable(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(e: reqwest::Error) -> StockError {
    StockError::Unavailable(e.to_string())
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StockError> {
    response.json::<T>().await.map_err(transport)
}

#[async_trait]
impl StockCoordinator for RemoteStock {
    #[instrument(skip(self, items), fields(base_url = %self.base_url))]
    async fn reserve(
        &self,
        order_id: OrderId,
        items: &[IngredientQuantity],
    ) -> Result<Reservation, StockError> {
        let response = self
            .http
            .post(self.url("/stock/reserve"))
            .json(&ReserveRequest {
                order_id,
                items: items.to_vec(),
            })
            .send()
            .await
            .map_err(transport)?;

        match response.status() {
            status if status.is_success() => read_json(response).await,
            StatusCode::CONFLICT => {
                let body: ShortageResponse = read_json(response).await?;
                debug!(short = body.short.len(), "Stock short");
                Err(StockError::InsufficientStock(body.short))
            }
            status => {
                warn!(%status, "Unexpected reserve status");
                Err(StockError::Unavailable(format!("reserve answered {status}")))
            }
        }
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn release(&self, order_id: OrderId) -> Result<(), StockError> {
        let response = self
            .http
            .post(self.url("/stock/release"))
            .json(&ReleaseRequest { order_id })
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            warn!(%status, "Unexpected release status");
            Err(StockError::Unavailable(format!("release answered {status}")))
        }
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn levels(&self) -> Result<StockLevels, StockError> {
        let response = self
            .http
            .get(self.url("/stock/levels"))
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StockError::Unavailable(format!("levels answered {status}")));
        }
        read_json(response).await
    }
}
