//! Admin catalog management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tiger_core::{NewShirtDesign, ShirtDesign, ShirtDesignUpdate};

use crate::auth::AdminSession;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/admin/designs
///
/// Every design, retired ones included.
pub async fn list_all(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ShirtDesign>>> {
    Ok(Json(state.db.designs().list_all().await?))
}

/// POST /api/admin/designs
pub async fn create(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<NewShirtDesign>,
) -> ApiResult<(StatusCode, Json<ShirtDesign>)> {
    let design = state.db.designs().insert(&input).await?;
    Ok((StatusCode::CREATED, Json(design)))
}

/// PATCH /api/admin/designs/{id}
pub async fn update(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<ShirtDesignUpdate>,
) -> ApiResult<Json<ShirtDesign>> {
    Ok(Json(state.db.designs().update(&id, &changes).await?))
}

/// DELETE /api/admin/designs/{id}
///
/// Soft delete: the design leaves the order form but stays in reports.
pub async fn deactivate(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.db.designs().deactivate(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
