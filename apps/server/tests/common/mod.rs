#![allow(dead_code)]

use std::collections::HashMap;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tiger_core::combo::ComboComponentInput;
use tiger_core::NewShirtDesign;
use tiger_db::{Database, DbConfig};
use tower::ServiceExt;

use tiger_server::config::ServerConfig;
use tiger_server::notify::Notifier;
use tiger_server::order_gate::OrderGate;
use tiger_server::{build_app_router, AppState};

pub const ADMIN_PASSWORD: &str = "tiger-test";
pub const ADMIN_COOKIE: &str = "admin_authenticated=true";

/// Config as a production server would load it, minus Redis and Telegram.
pub fn test_config() -> ServerConfig {
    let vars = HashMap::from([("ADMIN_PASSWORD", ADMIN_PASSWORD)]);
    ServerConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
        .expect("test config")
}

pub async fn test_db() -> Database {
    Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database")
}

/// Designs 1 (A, 750 THB), 2 (B, 700 THB) and 3 (Combo, 1,350 THB) where
/// combo 3 holds one each of 1 and 2.
pub async fn seeded_db() -> Database {
    let db = test_db().await;
    for (position, (id, name, price)) in [("1", "A", 75_000), ("2", "B", 70_000), ("3", "Combo", 135_000)]
        .into_iter()
        .enumerate()
    {
        db.designs()
            .insert(&NewShirtDesign {
                id: id.to_string(),
                name: name.to_string(),
                description: String::new(),
                price_satang: price,
                front_image: None,
                back_image: None,
                display_order: position as i64,
            })
            .await
            .expect("insert design");
    }
    db.combos()
        .create_or_replace(
            "3",
            &[ComboComponentInput::new("1", 1), ComboComponentInput::new("2", 1)],
        )
        .await
        .expect("link combo");
    db
}

/// Full application router (same middleware stack as `main.rs`).
pub fn build_test_app(db: Database) -> Router {
    let state = AppState::new(db, test_config(), Notifier::disabled(), OrderGate::in_memory());
    build_app_router(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    admin: bool,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if admin {
        builder = builder.header(COOKIE, ADMIN_COOKIE);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, false).await
}

pub async fn admin_get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, true).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), false).await
}

pub async fn admin_json(app: &Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    send(app, method, uri, Some(body), true).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A valid pickup order form.
pub fn order_form(items: Value) -> Value {
    serde_json::json!({
        "name": "Somchai",
        "phone": "0812345678",
        "isPickup": true,
        "slipImage": "https://blob.example/slip.jpg",
        "items": items,
    })
}
