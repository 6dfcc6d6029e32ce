//! Order intake (public) and order management (admin).

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tiger_core::export::OrdersExport;
use tiger_core::order::{price_order, NewOrder};
use tiger_core::validation::validate_status;
use tiger_core::{CoreError, Money, Order, OrderWithItems};

use crate::auth::AdminSession;
use crate::error::ApiResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PUT /api/admin/orders/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersClosedState {
    pub orders_closed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersClosedToggled {
    pub success: bool,
    pub orders_closed: bool,
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// POST /api/orders
///
/// Prices the order from the catalog, stores it as `pending` and notifies
/// the organisers. Refused with 403 while orders are closed.
pub async fn create_order(
    State(state): State<AppState>,
    Json(form): Json<NewOrder>,
) -> ApiResult<(StatusCode, Json<OrderWithItems>)> {
    if state.order_gate.is_closed().await {
        return Err(CoreError::OrdersClosed.into());
    }

    let designs = state.db.designs();
    let prices = designs.price_map().await?;
    let priced = price_order(
        &form,
        &prices,
        Money::from_satang(state.config.shipping_cost_satang),
    )?;

    let order = state.db.orders().create(&form, &priced).await?;

    let names: HashMap<String, String> = designs
        .catalog_refs()
        .await?
        .into_iter()
        .map(|design| (design.id, design.name))
        .collect();
    state.notifier.order_created(&order, names);

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders-closed
pub async fn orders_closed(State(state): State<AppState>) -> Json<OrdersClosedState> {
    Json(OrdersClosedState {
        orders_closed: state.order_gate.is_closed().await,
    })
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/admin/orders
///
/// Newest first, with items.
pub async fn list_orders(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<OrderWithItems>>> {
    Ok(Json(state.db.orders().list_with_items().await?))
}

/// GET /api/admin/orders/export
///
/// Orders, their lines and the size summary as three tables.
pub async fn export_orders(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<OrdersExport>> {
    let orders = state.db.orders().list_with_items().await?;
    let designs = state.db.designs().catalog_refs().await?;
    let registry = state.db.combos().registry().await?;

    let export = OrdersExport::build(&orders, &designs, &registry);
    tracing::info!(
        orders = export.orders.len(),
        items = export.items.len(),
        "Orders exported"
    );
    Ok(Json(export))
}

/// PUT /api/admin/orders/{id}/status
pub async fn update_status(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateStatusRequest>,
) -> ApiResult<Json<Order>> {
    let status = validate_status(&input.status)?;
    let order = state.db.orders().update_status(id, status).await?;

    state.notifier.status_changed(&order);
    Ok(Json(order))
}

/// POST /api/admin/orders-closed
pub async fn toggle_orders_closed(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Json<OrdersClosedToggled> {
    Json(OrdersClosedToggled {
        success: true,
        orders_closed: state.order_gate.toggle().await,
    })
}
