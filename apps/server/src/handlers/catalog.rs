//! Public catalog for the order form.

use axum::extract::State;
use axum::Json;
use tiger_core::ShirtDesign;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/designs
///
/// Active designs in display order.
pub async fn list_designs(State(state): State<AppState>) -> ApiResult<Json<Vec<ShirtDesign>>> {
    let designs = state.db.designs().list_active().await?;
    Ok(Json(designs))
}
