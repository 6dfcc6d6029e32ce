//! Admin combo management.
//!
//! Rule failures come back as 400 with the operator-facing message from
//! [`tiger_core::ValidationError`] in `error`.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tiger_core::combo::{ComboComponentInput, ComboView};
use tiger_core::{ComboComponentEdge, ShirtDesign};

use crate::auth::AdminSession;
use crate::error::ApiResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/admin/combos`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComboRequest {
    #[serde(default)]
    pub combo_id: String,
    #[serde(default)]
    pub components: Vec<ComboComponentInput>,
}

/// Request body for `PUT /api/admin/combos/{id}`.
#[derive(Debug, Deserialize)]
pub struct ReplaceComboRequest {
    #[serde(default)]
    pub components: Vec<ComboComponentInput>,
}

#[derive(Debug, Serialize)]
pub struct CombosPage {
    pub combos: Vec<ComboView>,
    /// All designs, for the component pickers.
    pub designs: Vec<ShirtDesign>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboSaved {
    pub success: bool,
    pub combo_id: String,
    pub components: Vec<ComboComponentEdge>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboDeleted {
    pub success: bool,
    pub removed: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/admin/combos
pub async fn list(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<CombosPage>> {
    let designs = state.db.designs().list_all().await?;
    let registry = state.db.combos().registry().await?;

    Ok(Json(CombosPage {
        combos: registry.describe(&designs),
        designs,
    }))
}

/// POST /api/admin/combos
pub async fn create(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<CreateComboRequest>,
) -> ApiResult<Json<ComboSaved>> {
    save(&state, input.combo_id, &input.components).await
}

/// PUT /api/admin/combos/{id}
pub async fn replace(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(combo_id): Path<String>,
    Json(input): Json<ReplaceComboRequest>,
) -> ApiResult<Json<ComboSaved>> {
    save(&state, combo_id, &input.components).await
}

/// DELETE /api/admin/combos/{id}
pub async fn delete(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(combo_id): Path<String>,
) -> ApiResult<Json<ComboDeleted>> {
    let removed = state.db.combos().delete(&combo_id).await?;
    Ok(Json(ComboDeleted {
        success: true,
        removed,
    }))
}

async fn save(
    state: &AppState,
    combo_id: String,
    components: &[ComboComponentInput],
) -> ApiResult<Json<ComboSaved>> {
    let edges = state.db.combos().create_or_replace(&combo_id, components).await?;
    Ok(Json(ComboSaved {
        success: true,
        combo_id,
        components: edges,
    }))
}
