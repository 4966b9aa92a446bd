use actor_framework::ActorClient;
use async_trait::async_trait;
use restaurant_orders::config::Config;
use restaurant_orders::kitchen::{KitchenError, KitchenNotifier, KitchenTicket};
use restaurant_orders::lifecycle::OrderSystem;
use restaurant_orders::model::{OrderCreate, OrderState};
use restaurant_orders::order_actor::OrderError;
use restaurant_orders::stock::StockCoordinator;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Kitchen that forwards every ticket to the test.
struct ChannelKitchen(mpsc::UnboundedSender<KitchenTicket>);

#[async_trait]
impl KitchenNotifier for ChannelKitchen {
    async fn notify(&self, ticket: &KitchenTicket) -> Result<(), KitchenError> {
        self.0
            .send(ticket.clone())
            .map_err(|e| KitchenError::Transport(e.to_string()))
    }
}

/// Kitchen that is always down.
struct DownKitchen;

#[async_trait]
impl KitchenNotifier for DownKitchen {
    async fn notify(&self, _ticket: &KitchenTicket) -> Result<(), KitchenError> {
        Err(KitchenError::Rejected(502))
    }
}

fn config_with_stock(levels: &[(&str, u32)]) -> Config {
    let mut config = Config::default();
    for (ingredient, quantity) in levels {
        config.stock.inventory.insert(ingredient.to_string(), *quantity);
    }
    config
}

/// Full end-to-end test with all real actors: one order from table to close.
#[tokio::test]
async fn test_full_order_lifecycle() {
    let (tx, mut tickets) = mpsc::unbounded_channel();
    let system = OrderSystem::start_with_kitchen(&Config::default(), Arc::new(ChannelKitchen(tx)))
        .await
        .expect("Failed to start system");
    let orders = &system.order_client;

    let order = orders
        .create_order(OrderCreate::new(Some("T1"), Some("Ana"), "HAMB_CARNE"))
        .await
        .expect("Failed to create order");
    assert_eq!(order.state, OrderState::Created);
    assert!(!orders.is_table_free("T1").await.unwrap());

    let confirmed = orders.confirm(order.id).await.expect("Failed to confirm");
    assert_eq!(confirmed.state, OrderState::InPreparation);

    let levels = system.stock.levels().await.unwrap();
    assert_eq!(levels["pan"], 99);
    assert_eq!(levels["carne"], 79);
    assert_eq!(levels["lechuga"], 119);

    let ticket = tokio::time::timeout(Duration::from_secs(1), tickets.recv())
        .await
        .expect("No kitchen ticket")
        .unwrap();
    assert_eq!(ticket.id, order.id);
    assert_eq!(ticket.table.as_deref(), Some("T1"));
    assert_eq!(ticket.item, "HAMB_CARNE");

    orders.mark_ready(order.id).await.unwrap();
    let delivered = orders.deliver(order.id).await.unwrap();
    let delivered_at = delivered.delivered_at.expect("delivered_at not stamped");

    let closed = orders.close(order.id).await.unwrap();
    assert_eq!(closed.state, OrderState::Closed);
    assert_eq!(closed.delivered_at, Some(delivered_at));
    assert_eq!(closed.created_at, order.created_at);
    assert!(closed.updated_at >= delivered_at);
    assert!(orders.is_table_free("T1").await.unwrap());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_confirm_without_stock_keeps_order_created() {
    let system = OrderSystem::start(&config_with_stock(&[("carne", 0)]))
        .await
        .unwrap();
    let orders = &system.order_client;

    let order = orders
        .create_order(OrderCreate::new(Some("T5"), None, "HAMB_CARNE"))
        .await
        .unwrap();

    let err = orders.confirm(order.id).await.unwrap_err();
    assert_eq!(err.kind(), "InsufficientStock");
    assert!(err.to_string().contains("carne"));
    let short: Vec<_> = err
        .shortfalls()
        .unwrap()
        .iter()
        .map(|s| s.ingredient.as_str())
        .collect();
    assert_eq!(short, vec!["carne"]);

    assert_eq!(orders.get_order(order.id).await.unwrap().state, OrderState::Created);
    let levels = system.stock.levels().await.unwrap();
    assert_eq!(levels["pan"], 100, "no partial reservation");
    assert_eq!(levels["lechuga"], 120, "no partial reservation");

    // Restocking makes the same confirm succeed.
    let inventory = system.inventory_client.as_ref().unwrap();
    inventory.restock("carne", 2).await.unwrap();
    let confirmed = orders.confirm(order.id).await.unwrap();
    assert_eq!(confirmed.state, OrderState::InPreparation);
    assert_eq!(system.stock.levels().await.unwrap()["carne"], 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancel_returns_reserved_stock() {
    let system = OrderSystem::start(&Config::default()).await.unwrap();
    let orders = &system.order_client;

    let order = orders
        .create_order(OrderCreate::new(Some("T2"), None, "FIDEOS_POLLO"))
        .await
        .unwrap();
    orders.confirm(order.id).await.unwrap();
    orders.mark_ready(order.id).await.unwrap();
    assert_eq!(system.stock.levels().await.unwrap()["fideos"], 99);

    let cancelled = orders.cancel(order.id).await.unwrap();
    assert_eq!(cancelled.state, OrderState::Cancelled);
    let levels = system.stock.levels().await.unwrap();
    assert_eq!(levels["fideos"], 100);
    assert_eq!(levels["pollo"], 80);

    // Never-confirmed orders cancel without touching stock.
    let unconfirmed = orders
        .create_order(OrderCreate::new(Some("T2"), None, "ENSALADA"))
        .await
        .unwrap();
    orders.cancel(unconfirmed.id).await.unwrap();
    assert_eq!(system.stock.levels().await.unwrap()["lechuga"], 120);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_second_ready_report_is_invalid_state() {
    let system = OrderSystem::start(&Config::default()).await.unwrap();
    let orders = &system.order_client;

    let order = orders
        .create_order(OrderCreate::new(Some("T3"), None, "HOTDOG"))
        .await
        .unwrap();
    orders.confirm(order.id).await.unwrap();

    let ready = orders.mark_ready(order.id).await.unwrap();
    assert_eq!(ready.state, OrderState::Ready);

    let again = orders.mark_ready(order.id).await.unwrap_err();
    assert!(matches!(again, OrderError::InvalidState(_)), "{again:?}");
    assert_eq!(orders.get_order(order.id).await.unwrap(), ready);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_confirm_twice_never_double_reserves() {
    let system = OrderSystem::start(&Config::default()).await.unwrap();
    let orders = &system.order_client;

    let order = orders
        .create_order(OrderCreate::new(Some("T4"), None, "HOTDOG"))
        .await
        .unwrap();

    let (first, second) = tokio::join!(orders.confirm(order.id), orders.confirm(order.id));
    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(OrderError::InvalidState(_)))));
    assert_eq!(system.stock.levels().await.unwrap()["pan"], 99);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_creates_for_one_table() {
    let system = OrderSystem::start(&Config::default()).await.unwrap();

    let mut tasks = Vec::new();
    for i in 0..10 {
        let orders = system.order_client.clone();
        tasks.push(tokio::spawn(async move {
            let customer = format!("guest {i}");
            orders
                .create_order(OrderCreate::new(Some("T7"), Some(customer.as_str()), "HOTDOG"))
                .await
        }));
    }

    let mut created = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => created += 1,
            Err(e) => assert_eq!(e, OrderError::TableOccupied("T7".into())),
        }
    }
    assert_eq!(created, 1);

    let active = system.order_client.active_orders().await.unwrap();
    assert_eq!(active.iter().filter(|o| o.occupies("T7")).count(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_kitchen_queue_oldest_first_without_finished_orders() {
    let system = OrderSystem::start(&Config::default()).await.unwrap();
    let orders = &system.order_client;

    let mut placed = Vec::new();
    for table in ["T1", "T2", "T3"] {
        let order = orders
            .create_order(OrderCreate::new(Some(table), None, "HOTDOG"))
            .await
            .unwrap();
        placed.push(order.id);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    orders.cancel(placed[1]).await.unwrap();

    let queue: Vec<_> = orders
        .active_orders()
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(queue, vec![placed[0], placed[2]]);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_kitchen_outage_does_not_undo_confirm() {
    let system = OrderSystem::start_with_kitchen(&Config::default(), Arc::new(DownKitchen))
        .await
        .unwrap();
    let orders = &system.order_client;

    let order = orders
        .create_order(OrderCreate::new(Some("T8"), None, "ENSALADA"))
        .await
        .unwrap();
    let confirmed = orders.confirm(order.id).await.unwrap();
    assert_eq!(confirmed.state, OrderState::InPreparation);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(
        orders.get_order(order.id).await.unwrap().state,
        OrderState::InPreparation
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let system = OrderSystem::start(&Config::default()).await.unwrap();
    let id = restaurant_orders::model::OrderId::new();

    let err = system.order_client.confirm(id).await.unwrap_err();
    assert_eq!(err.kind(), "NotFound");
    assert_eq!(
        system.order_client.get_order(id).await.unwrap_err(),
        OrderError::NotFound(id.to_string())
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_orders_are_never_deleted() {
    let system = OrderSystem::start(&Config::default()).await.unwrap();
    let orders = &system.order_client;

    let order = orders
        .create_order(OrderCreate::new(Some("T9"), None, "HOTDOG"))
        .await
        .unwrap();
    let confirmed = orders.confirm(order.id).await.unwrap();

    let err = orders.delete(order.id).await.unwrap_err();
    assert_eq!(err, OrderError::NotDeletable(order.id.to_string()));
    assert_eq!(err.kind(), "InvalidState");

    assert_eq!(orders.get_order(order.id).await.unwrap(), confirmed);
    assert!(!orders.is_table_free("T9").await.unwrap());
    assert_eq!(system.stock.levels().await.unwrap()["pan"], 99);

    // Cancelling is the way out, and it returns the stock.
    let cancelled = orders.cancel(order.id).await.unwrap();
    assert!(orders.delete(cancelled.id).await.is_err());
    assert_eq!(system.stock.levels().await.unwrap()["pan"], 100);

    system.shutdown().await.unwrap();
}
