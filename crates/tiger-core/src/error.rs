//! # Error Types
//!
//! Domain-specific error types for tiger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tiger-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tiger-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  server errors (apps/server)                                           │
//! │  └── ApiError         - What the browser sees (JSON)                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError / DbError → ApiError → Browser      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Aggregation never produces an error: unknown designs and sizes are
//! dropped silently so reports always render over stale data.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Design cannot be found in the catalog (or is inactive).
    #[error("Design not found: {0}")]
    DesignNotFound(String),

    /// The pre-order window has been closed by an admin.
    #[error("Orders are currently closed")]
    OrdersClosed,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The combo variants carry the exact reason shown to the operator in the
/// combo admin screen, so their messages are part of the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Referenced design does not exist.
    #[error("Design '{id}' does not exist")]
    UnknownDesign { id: String },

    /// A combo was submitted without components.
    #[error("A combo must have at least one component")]
    EmptyComponents,

    /// A component is missing its id or has a multiplier below 1.
    #[error("Component #{position} must have a component id and a multiplier of at least 1")]
    InvalidComponent { position: usize },

    /// The same component appears twice in one combo.
    #[error("Component '{component_id}' appears more than once")]
    DuplicateComponent { component_id: String },

    /// The combo lists itself as a component.
    #[error("Combo '{combo_id}' cannot contain itself")]
    SelfReference { combo_id: String },
}

impl ValidationError {
    /// Stable machine-readable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::Required { .. } => "REQUIRED",
            ValidationError::TooLong { .. } => "TOO_LONG",
            ValidationError::OutOfRange { .. } => "OUT_OF_RANGE",
            ValidationError::InvalidFormat { .. } => "INVALID_FORMAT",
            ValidationError::NotAllowed { .. } => "NOT_ALLOWED",
            ValidationError::UnknownDesign { .. } => "UNKNOWN_DESIGN",
            ValidationError::EmptyComponents => "EMPTY_COMPONENTS",
            ValidationError::InvalidComponent { .. } => "INVALID_COMPONENT",
            ValidationError::DuplicateComponent { .. } => "DUPLICATE_COMPONENT",
            ValidationError::SelfReference { .. } => "SELF_REFERENCE",
        }
    }

    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_error_messages() {
        assert_eq!(
            ValidationError::EmptyComponents.to_string(),
            "A combo must have at least one component"
        );
        assert_eq!(
            ValidationError::SelfReference {
                combo_id: "3".to_string()
            }
            .to_string(),
            "Combo '3' cannot contain itself"
        );
        assert_eq!(
            ValidationError::DuplicateComponent {
                component_id: "1".to_string()
            }
            .to_string(),
            "Component '1' appears more than once"
        );
    }

    #[test]
    fn test_validation_error_codes() {
        assert_eq!(ValidationError::EmptyComponents.code(), "EMPTY_COMPONENTS");
        assert_eq!(ValidationError::required("name").code(), "REQUIRED");
        assert_eq!(ValidationError::required("name").to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::EmptyComponents.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(
            core_err.to_string(),
            "Validation error: A combo must have at least one component"
        );
    }
}
