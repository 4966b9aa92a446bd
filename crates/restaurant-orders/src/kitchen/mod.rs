//! # Kitchen Boundary
//!
//! Outbound: after an order is confirmed, a [`KitchenNotifier`] hands the kitchen a
//! ticket. Delivery is best effort; a failed notification never undoes a confirm.
//!
//! Inbound: the kitchen reports "order ready" through the webhook in
//! [`crate::api::webhook`], authenticated with [`signature::WebhookSigner`].

pub mod signature;

use crate::model::{Order, OrderId};
use async_trait::async_trait;
use reqwest::header::HeaderName;
use serde::{Deserialize, Serialize};
use signature::WebhookSigner;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_SIGNATURE_HEADER: &str = "X-Kitchen-Signature";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum KitchenError {
    #[error("Kitchen unreachable: {0}")]
    Transport(String),
    #[error("Kitchen rejected ticket with status {0}")]
    Rejected(u16),
}

/// What the kitchen receives for a confirmed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenTicket {
    pub id: OrderId,
    pub table: Option<String>,
    pub item: String,
}

impl From<&Order> for KitchenTicket {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            table: order.table.clone(),
            item: order.item.clone(),
        }
    }
}

#[async_trait]
pub trait KitchenNotifier: Send + Sync {
    async fn notify(&self, ticket: &KitchenTicket) -> Result<(), KitchenError>;
}

/// Writes tickets to the log. Used when no kitchen endpoint is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl KitchenNotifier for LogNotifier {
    async fn notify(&self, ticket: &KitchenTicket) -> Result<(), KitchenError> {
        info!(order_id = %ticket.id, table = ?ticket.table, item = %ticket.item, "Kitchen ticket");
        Ok(())
    }
}

/// Posts tickets as JSON to `{base_url}/kitchen/orders`, signed when a secret is set.
#[derive(Debug, Clone)]
pub struct HttpKitchenNotifier {
    http: reqwest::Client,
    url: String,
    signer: Option<(HeaderName, WebhookSigner)>,
}

impl HttpKitchenNotifier {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, KitchenError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| KitchenError::Transport(e.to_string()))?;
        Ok(Self {
            http,
            url: format!("{}/kitchen/orders", base_url.trim_end_matches('/')),
            signer: None,
        })
    }

    pub fn signed(mut self, header: HeaderName, signer: WebhookSigner) -> Self {
        self.signer = Some((header, signer));
        self
    }
}

#[async_trait]
impl KitchenNotifier for HttpKitchenNotifier {
    async fn notify(&self, ticket: &KitchenTicket) -> Result<(), KitchenError> {
        let body = serde_json::to_vec(ticket).map_err(|e| KitchenError::Transport(e.to_string()))?;

        let mut request = self
            .http
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some((header, signer)) = &self.signer {
            request = request.header(header.clone(), signer.sign(&body));
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| KitchenError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(KitchenError::Rejected(status.as_u16()));
        }
        debug!(order_id = %ticket.id, %status, "Ticket delivered");
        Ok(())
    }
}
