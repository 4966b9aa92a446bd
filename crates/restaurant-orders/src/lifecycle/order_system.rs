use crate::api::{self, AppState, WebhookAuth};
use crate::clients::{InventoryClient, OrderClient};
use crate::config::{Config, ConfigError, StockMode};
use crate::inventory_actor;
use crate::kitchen::signature::{SignatureError, WebhookSigner};
use crate::kitchen::{HttpKitchenNotifier, KitchenError, KitchenNotifier, LogNotifier};
use crate::menu::{MenuCatalog, StaticMenu};
use crate::order_actor::{self, OrderContext};
use crate::stock::{self, RemoteStock, StockCoordinator, StockError};
use axum::Router;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors raised while starting or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Stock setup failed: {0}")]
    Stock(#[from] StockError),
    #[error("Kitchen setup failed: {0}")]
    Kitchen(#[from] KitchenError),
    #[error("Webhook secret rejected: {0}")]
    Signature(#[from] SignatureError),
    #[error("Actor task failed: {0}")]
    Shutdown(String),
}

/// The running order service: actors, their clients and the collaborators they use.
///
/// # Example
///
/// ```rust
/// use restaurant_orders::config::Config;
/// use restaurant_orders::lifecycle::OrderSystem;
/// use restaurant_orders::model::OrderCreate;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let system = OrderSystem::start(&Config::default()).await?;
///
///     let order = system
///         .order_client
///         .create_order(OrderCreate::new(Some("T1"), None, "HOTDOG"))
///         .await?;
///     system.order_client.confirm(order.id).await?;
///
///     system.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct OrderSystem {
    /// The Order Service.
    pub order_client: OrderClient,
    /// Set when stock is held in this process.
    pub inventory_client: Option<InventoryClient>,
    pub stock: Arc<dyn StockCoordinator>,
    pub menu: Arc<dyn MenuCatalog>,
    webhook: WebhookAuth,
    /// Actor tasks, awaited on shutdown. Dependents come before what they depend on.
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Starts the system with the kitchen notifier named in the configuration.
    pub async fn start(config: &Config) -> Result<Self, SystemError> {
        let kitchen: Arc<dyn KitchenNotifier> = match &config.kitchen.notify_url {
            Some(url) => {
                let mut notifier = HttpKitchenNotifier::new(url, config.kitchen.timeout())?;
                if let Some(secret) = config.kitchen.webhook_secret() {
                    notifier = notifier.signed(config.signature_header()?, WebhookSigner::new(secret)?);
                }
                info!(%url, "Kitchen tickets sent over HTTP");
                Arc::new(notifier)
            }
            None => Arc::new(LogNotifier),
        };
        Self::start_with_kitchen(config, kitchen).await
    }

    /// Starts the system with a caller-supplied kitchen notifier.
    ///
    /// 1. Stock: an inventory actor provisioned with `stock.inventory`, or a
    ///    [`RemoteStock`] pointed at `stock.base_url`.
    /// 2. The Order actor, with stock, menu and stock timeout injected at `run()`.
    /// 3. Webhook authentication from `kitchen.webhook_secret`.
    pub async fn start_with_kitchen(
        config: &Config,
        kitchen: Arc<dyn KitchenNotifier>,
    ) -> Result<Self, SystemError> {
        let mut handles = Vec::new();
        let mut inventory_handles = Vec::new();

        // =====================================================================
        // 1. Stock
        // =====================================================================
        let (stock, inventory_client): (Arc<dyn StockCoordinator>, Option<InventoryClient>) =
            match config.stock.mode {
                StockMode::Memory => {
                    let (inventory_actor, generic_client) = inventory_actor::new();
                    let inventory_handle = tokio::spawn(inventory_actor.run(()));
                    let inventory =
                        InventoryClient::provision(generic_client, config.stock.inventory.clone())
                            .await?;
                    info!(inventory_id = inventory.id(), "In-memory stock ready");
                    inventory_handles.push(inventory_handle);
                    (Arc::new(inventory.clone()), Some(inventory))
                }
                StockMode::Remote => {
                    let base_url = config.stock.base_url.as_deref().unwrap_or_default();
                    let remote = RemoteStock::new(base_url, config.stock.timeout())?;
                    info!(%base_url, "Using remote stock service");
                    (Arc::new(remote), None)
                }
            };

        // =====================================================================
        // 2. Orders
        // =====================================================================
        let menu: Arc<dyn MenuCatalog> = Arc::new(StaticMenu::new(config.menu.clone()));
        let context = OrderContext::new(stock.clone(), menu.clone())
            .with_stock_timeout(config.stock.timeout());

        let (order_actor, order_resource_client) = order_actor::new();
        let order_client = OrderClient::new(order_resource_client, kitchen);
        handles.push(tokio::spawn(order_actor.run(context)));
        handles.extend(inventory_handles);

        // =====================================================================
        // 3. Webhook
        // =====================================================================
        let header = config.signature_header()?;
        let webhook = match config.kitchen.webhook_secret() {
            Some(secret) => WebhookAuth::signed(header, WebhookSigner::new(secret)?),
            None => WebhookAuth::open(header),
        };

        info!(
            items = config.menu.len(),
            signed_webhook = webhook.signer.is_some(),
            "Order system started"
        );
        Ok(Self {
            order_client,
            inventory_client,
            stock,
            menu,
            webhook,
            handles,
        })
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            orders: self.order_client.clone(),
            stock: self.stock.clone(),
            menu: self.menu.clone(),
            webhook: self.webhook.clone(),
        }
    }

    /// The HTTP API, plus the `/stock` routes when stock is held in this process.
    pub fn router(&self) -> Router {
        let router = api::router(self.app_state());
        match &self.inventory_client {
            Some(inventory) => router.merge(stock::server::router(inventory.clone())),
            None => router,
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the actors' channels. The Order actor stops once
    /// every `OrderClient` clone is gone, which drops its stock handle and lets the
    /// inventory actor stop in turn. Routers built from this system must be dropped
    /// first or this waits for them.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.inventory_client);
        drop(self.stock);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::Shutdown(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
