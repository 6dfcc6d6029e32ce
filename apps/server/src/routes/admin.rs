//! Route definitions for the admin dashboard.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{combos, designs, orders, session, summary};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// Everything except login/logout requires an admin session (enforced by
/// the `AdminSession` extractor).
///
/// ```text
/// POST   /login                    -> login
/// POST   /logout                   -> logout
/// GET    /designs                  -> list_all
/// POST   /designs                  -> create
/// PATCH  /designs/{id}             -> update
/// DELETE /designs/{id}             -> deactivate
/// GET    /combos                   -> list
/// POST   /combos                   -> create
/// PUT    /combos/{id}              -> replace
/// DELETE /combos/{id}              -> delete
/// GET    /orders                   -> list_orders
/// GET    /orders/export            -> export_orders
/// PUT    /orders/{id}/status       -> update_status
/// POST   /orders-closed            -> toggle_orders_closed
/// GET    /size-summary             -> size_summary
/// GET    /size-summary/export      -> export
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(session::login))
        .route("/logout", post(session::logout))
        .route("/designs", get(designs::list_all).post(designs::create))
        .route(
            "/designs/{id}",
            patch(designs::update).delete(designs::deactivate),
        )
        .route("/combos", get(combos::list).post(combos::create))
        .route("/combos/{id}", put(combos::replace).delete(combos::delete))
        .route("/orders", get(orders::list_orders))
        .route("/orders/export", get(orders::export_orders))
        .route("/orders/{id}/status", put(orders::update_status))
        .route("/orders-closed", post(orders::toggle_orders_closed))
        .route("/size-summary", get(summary::size_summary))
        .route("/size-summary/export", get(summary::export))
}
