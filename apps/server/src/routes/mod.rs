pub mod admin;
pub mod health;
pub mod public;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /designs                         active catalog (public)
/// /orders                          place an order (public)
/// /orders-closed                   orders-closed state (public)
///
/// /admin/login                     open a session
/// /admin/logout                    end the session
/// /admin/...                       see routes::admin
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(public::router())
        .nest("/admin", admin::router())
}
