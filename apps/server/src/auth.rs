//! Admin session cookie and the extractor that checks it.
//!
//! The dashboard uses one shared password. A successful login sets
//! [`ADMIN_COOKIE`]; every admin handler takes an [`AdminSession`] argument,
//! which rejects the request with 401 when the cookie is missing.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

pub const ADMIN_COOKIE: &str = "admin_authenticated";

/// Proof that the request carries a valid admin session.
///
/// ```ignore
/// async fn handler(_admin: AdminSession, State(state): State<AppState>) -> ApiResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AdminSession;

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authenticated = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|header| cookie_value(header, ADMIN_COOKIE) == Some("true"));

        if authenticated {
            Ok(AdminSession)
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

/// Finds `name` in a `Cookie` header value (`a=1; b=2`).
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// `Set-Cookie` value that opens a session.
pub fn session_cookie() -> String {
    format!("{ADMIN_COOKIE}=true; HttpOnly; Path=/; SameSite=Lax")
}

/// `Set-Cookie` value that ends the session.
pub fn cleared_cookie() -> String {
    format!("{ADMIN_COOKIE}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0")
}

/// Compares without short-circuiting on the first differing byte.
pub fn password_matches(given: &str, expected: &str) -> bool {
    let (a, b) = (given.as_bytes(), expected.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
