//! HTTP error type.
//!
//! Every handler returns [`ApiResult`]. Errors leave the server as
//! `{"error": "<message>", "code": "<CODE>"}` with a matching status.
//!
//! ```text
//! ValidationError ──┐
//! CoreError ────────┼──► ApiError ──► (status, JSON)
//! DbError ──────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tiger_core::{CoreError, ValidationError};
use tiger_db::DbError;

/// Application-level error type for HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Missing or invalid admin session.
    #[error("Unauthorized")]
    Unauthorized,
}

/// Convenience type alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::Validation(err) => (StatusCode::BAD_REQUEST, err.code(), err.to_string()),

            ApiError::Core(core) => match core {
                CoreError::Validation(err) => {
                    (StatusCode::BAD_REQUEST, err.code(), err.to_string())
                }
                CoreError::DesignNotFound(_) => (
                    StatusCode::BAD_REQUEST,
                    "DESIGN_NOT_FOUND",
                    core.to_string(),
                ),
                CoreError::OrdersClosed => {
                    (StatusCode::FORBIDDEN, "ORDERS_CLOSED", core.to_string())
                }
            },

            ApiError::Db(db) => match db {
                DbError::Validation(err) => (StatusCode::BAD_REQUEST, err.code(), err.to_string()),
                DbError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", db.to_string()),
                DbError::UniqueViolation { .. } => {
                    (StatusCode::CONFLICT, "CONFLICT", db.to_string())
                }
                DbError::ForeignKeyViolation { .. } => (
                    StatusCode::BAD_REQUEST,
                    "UNKNOWN_REFERENCE",
                    "A referenced design does not exist".to_string(),
                ),
                other => {
                    tracing::error!(error = %other, "Database error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Unauthorized".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_rule_keeps_operator_message() {
        let err = ApiError::from(DbError::from(ValidationError::SelfReference {
            combo_id: "3".to_string(),
        }));
        let (status, code, message) = err.parts();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "SELF_REFERENCE");
        assert_eq!(message, "Combo '3' cannot contain itself");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(DbError::not_found("Order", "7")).parts().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CoreError::OrdersClosed).parts().0,
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::Unauthorized.parts().0, StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(DbError::PoolExhausted).parts().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
