//! Routes the order form calls without a session.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{catalog, orders};
use crate::state::AppState;

/// ```text
/// GET    /designs        -> list_designs
/// POST   /orders         -> create_order
/// GET    /orders-closed  -> orders_closed
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/designs", get(catalog::list_designs))
        .route("/orders", post(orders::create_order))
        .route("/orders-closed", get(orders::orders_closed))
}
