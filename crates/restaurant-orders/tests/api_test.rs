use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use restaurant_orders::config::Config;
use restaurant_orders::kitchen::signature::WebhookSigner;
use restaurant_orders::lifecycle::OrderSystem;
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "kitchen-secret";

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn webhook(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhooks/kitchen/order-ready")
        .header("content-type", "application/json");
    if let Some(signature) = signature {
        builder = builder.header("X-Kitchen-Signature", signature);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn signed_config() -> Config {
    let mut config = Config::default();
    config.kitchen.webhook_secret = Some(SECRET.to_string());
    config
}

async fn place(app: &Router, table: &str, item: &str) -> String {
    let (status, body) = send(app, post("/api/orders", json!({ "table": table, "item": item }))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_order_flow_over_http() {
    let system = OrderSystem::start(&Config::default()).await.unwrap();
    let app = system.router();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, created) = send(
        &app,
        post(
            "/api/orders",
            json!({ "table": "T1", "customer": "Ana", "item": "HAMB_CARNE" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["state"], "CREATED");
    assert_eq!(created["table"], "T1");
    assert!(created["delivered_at"].is_null());
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = send(&app, get(&format!("/api/orders/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, confirmed) = send(&app, post(&format!("/api/orders/{id}/confirm"), json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["state"], "IN_PREPARATION");

    let (_, queue) = send(&app, get("/api/kitchen/orders")).await;
    assert_eq!(queue.as_array().unwrap().len(), 1);
    assert_eq!(queue[0]["id"], id);

    let (_, table) = send(&app, get("/api/tables/T1/free")).await;
    assert_eq!(table, json!({ "table": "T1", "free": false }));

    let (_, stock) = send(&app, get("/api/stock")).await;
    assert_eq!(stock["carne"], 79);
    let (status, served) = send(&app, get("/stock/levels")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(served, stock);

    for (action, state) in [("ready", "READY"), ("deliver", "DELIVERED"), ("close", "CLOSED")] {
        let (status, body) = send(&app, post(&format!("/api/orders/{id}/{action}"), json!({}))).await;
        assert_eq!(status, StatusCode::OK, "{action}: {body}");
        assert_eq!(body["state"], state);
    }

    let (_, table) = send(&app, get("/api/tables/T1/free")).await;
    assert_eq!(table["free"], true);
    let (_, menu) = send(&app, get("/api/menu")).await;
    assert_eq!(menu.as_array().unwrap().len(), 6);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_error_statuses() {
    let mut config = Config::default();
    config.stock.inventory.insert("carne".into(), 0);
    let system = OrderSystem::start(&config).await.unwrap();
    let app = system.router();

    let (status, body) = send(&app, post("/api/orders", json!({ "table": "T1", "item": "PIZZA" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");

    let id = place(&app, "T5", "HAMB_CARNE").await;

    let (status, body) = send(&app, post("/api/orders", json!({ "table": "T5", "item": "HOTDOG" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "TableOccupied");

    let (status, body) = send(&app, post(&format!("/api/orders/{id}/confirm"), json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "InsufficientStock");
    assert_eq!(body["ingredients"], json!(["carne"]));
    assert!(body["message"].as_str().unwrap().contains("carne"));

    let (_, order) = send(&app, get(&format!("/api/orders/{id}"))).await;
    assert_eq!(order["state"], "CREATED");

    let (status, body) = send(&app, post(&format!("/api/orders/{id}/deliver"), json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "InvalidState");

    let (status, body) = send(&app, get("/api/orders/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, _) = send(
        &app,
        get("/api/orders/6f1c0d9e-8d7a-4c43-9d8e-1b2a3c4d5e6f"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let malformed = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .header("content-type", "application/json")
        .body(Body::from("{\"table\": "))
        .unwrap();
    let (status, body) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, _) = send(&app, post("/api/orders", json!({ "table": "T9" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_signed_webhook() {
    let system = OrderSystem::start(&signed_config()).await.unwrap();
    let app = system.router();
    let signer = WebhookSigner::new(SECRET).unwrap();

    let id = place(&app, "T2", "HOTDOG").await;
    let (status, _) = send(&app, post(&format!("/api/orders/{id}/confirm"), json!({}))).await;
    assert_eq!(status, StatusCode::OK);

    let body = json!({ "order_id": id }).to_string();

    let (status, reply) = send(&app, webhook(&body, None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(reply["error"], "Forbidden");

    let forged = WebhookSigner::new("wrong-secret").unwrap().sign(body.as_bytes());
    let (status, _) = send(&app, webhook(&body, Some(forged.as_str()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, webhook(&body, Some("not hex"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, order) = send(&app, get(&format!("/api/orders/{id}"))).await;
    assert_eq!(order["state"], "IN_PREPARATION");

    let signature = signer.sign(body.as_bytes());
    let (status, reply) = send(&app, webhook(&body, Some(signature.as_str()))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(reply.is_null());

    let (_, order) = send(&app, get(&format!("/api/orders/{id}"))).await;
    assert_eq!(order["state"], "READY");

    let (status, reply) = send(&app, webhook(&body, Some(signature.as_str()))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(reply["error"], "InvalidState");

    // Signature is checked before the body is even parsed.
    let (status, _) = send(&app, webhook("not json", None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unsigned_webhook_when_no_secret() {
    let system = OrderSystem::start(&Config::default()).await.unwrap();
    let app = system.router();

    let id = place(&app, "T3", "ENSALADA").await;

    let body = json!({ "order_id": id }).to_string();
    let (status, reply) = send(&app, webhook(&body, None)).await;
    assert_eq!(status, StatusCode::CONFLICT, "still CREATED: {reply}");

    send(&app, post(&format!("/api/orders/{id}/confirm"), json!({}))).await;
    let (status, _) = send(&app, webhook(&body, None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, webhook("{\"order\": 1}", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let unknown = json!({ "order_id": "6f1c0d9e-8d7a-4c43-9d8e-1b2a3c4d5e6f" }).to_string();
    let (status, reply) = send(&app, webhook(&unknown, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(reply["error"], "NotFound");

    drop(app);
    system.shutdown().await.unwrap();
}
