//! Integration tests for the admin login gate.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::{Method, StatusCode};
use common::*;
use serde_json::json;

#[tokio::test]
async fn admin_routes_require_session() {
    let app = build_test_app(test_db().await);

    for uri in [
        "/api/admin/designs",
        "/api/admin/combos",
        "/api/admin/orders",
        "/api/admin/size-summary",
        "/api/admin/size-summary/export",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    }

    let toggle = send(&app, Method::POST, "/api/admin/orders-closed", None, false).await;
    assert_eq!(toggle.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_sets_session_cookie() {
    let app = build_test_app(test_db().await);

    let wrong = post_json(&app, "/api/admin/login", json!({ "password": "nope" })).await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong.headers().get(SET_COOKIE).is_none());

    let right = post_json(&app, "/api/admin/login", json!({ "password": ADMIN_PASSWORD })).await;
    assert_eq!(right.status(), StatusCode::OK);
    let cookie = right.headers()[SET_COOKIE].to_str().unwrap().to_string();
    assert!(cookie.starts_with("admin_authenticated=true"));
    assert!(cookie.contains("HttpOnly"));
    assert_eq!(body_json(right).await["success"], true);
}

#[tokio::test]
async fn logout_clears_cookie() {
    let app = build_test_app(test_db().await);

    let response = send(&app, Method::POST, "/api/admin/logout", None, true).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response.headers()[SET_COOKIE].to_str().unwrap();
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn session_cookie_opens_admin_routes() {
    let app = build_test_app(seeded_db().await);

    let response = admin_get(&app, "/api/admin/designs").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 3);
}
