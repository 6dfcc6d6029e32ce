//! Admin login and logout.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::auth::{cleared_cookie, password_matches, session_cookie};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for `POST /api/admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: String,
}

/// POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    if !password_matches(&input.password, &state.config.admin_password) {
        tracing::warn!("Admin login rejected");
        return Err(ApiError::Unauthorized);
    }

    tracing::info!("Admin logged in");
    Ok(([(SET_COOKIE, session_cookie())], Json(json!({ "success": true }))))
}

/// POST /api/admin/logout
pub async fn logout() -> impl IntoResponse {
    ([(SET_COOKIE, cleared_cookie())], Json(json!({ "success": true })))
}
