//! Kitchen "order ready" webhook.
//!
//! When a secret is configured the signature header is checked against the raw
//! body before anything is parsed or looked up. The accepted event goes through
//! [`OrderClient::mark_ready`](crate::clients::OrderClient::mark_ready), the same
//! path as `POST /api/orders/{id}/ready`.

use super::{orders::parse_id, ApiError, AppState};
use crate::kitchen::signature::WebhookSigner;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use serde::Deserialize;
use tracing::{info, warn};

/// Signature settings for inbound kitchen calls.
#[derive(Debug, Clone)]
pub struct WebhookAuth {
    pub signer: Option<WebhookSigner>,
    pub header: HeaderName,
}

impl WebhookAuth {
    /// Accepts every request.
    pub fn open(header: HeaderName) -> Self {
        Self {
            signer: None,
            header,
        }
    }

    pub fn signed(header: HeaderName, signer: WebhookSigner) -> Self {
        Self {
            signer: Some(signer),
            header,
        }
    }

    fn check(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), ApiError> {
        let Some(signer) = &self.signer else {
            return Ok(());
        };
        let signature = headers
            .get(&self.header)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Forbidden(format!("missing {} header", self.header.as_str())))?;
        signer
            .verify(body, signature)
            .map_err(|e| ApiError::Forbidden(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct OrderReady {
    order_id: String,
}

pub async fn order_ready(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    if let Err(e) = state.webhook.check(&headers, &body) {
        warn!(error = %e, "Kitchen webhook rejected");
        return Err(e);
    }

    let event: OrderReady =
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let id = parse_id(&event.order_id)?;

    state.orders.mark_ready(id).await?;
    info!(order_id = %id, "Kitchen reported order ready");
    Ok(StatusCode::NO_CONTENT)
}
