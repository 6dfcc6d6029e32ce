//! # Validation Module
//!
//! Field-level input checks for the catalog and order endpoints.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Order form / admin UI                                        │
//! │  └── Immediate feedback (empty fields, size picker)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: axum handler (serde deserialization)                         │
//! │  └── THIS MODULE + combo::validate_combo_request                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                        │
//! │  └── NOT NULL, UNIQUE, CHECK and foreign key constraints               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tiger_core::validation::{validate_design_id, validate_quantity, validate_size};
//! use tiger_core::SizeCode;
//!
//! validate_design_id("3").unwrap();
//! validate_quantity(2).unwrap();
//! assert_eq!(validate_size("2XL").unwrap(), SizeCode::Xl2);
//! ```

use crate::error::ValidationError;
use crate::size::SizeCode;
use crate::types::OrderStatus;
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest design id an admin may choose.
pub const MAX_DESIGN_ID_LEN: usize = 20;

/// Longest design or customer name.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a design id.
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
/// - Only letters, digits, hyphens and underscores
///
/// ## Example
/// ```rust
/// use tiger_core::validation::validate_design_id;
///
/// assert!(validate_design_id("combo-1").is_ok());
/// assert!(validate_design_id("").is_err());
/// assert!(validate_design_id("has space").is_err());
/// ```
pub fn validate_design_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::required("id"));
    }

    if id.chars().count() > MAX_DESIGN_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_DESIGN_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (design or customer).
///
/// Counted in characters, not bytes: Thai names are three bytes per letter.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required(field));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a required free-text field such as the slip URL.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - At least 1
/// - At most MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in satang. Zero is allowed (giveaway designs).
///
/// ## Example
/// ```rust
/// use tiger_core::validation::validate_price_satang;
///
/// assert!(validate_price_satang(75_000).is_ok());
/// assert!(validate_price_satang(0).is_ok());
/// assert!(validate_price_satang(-1).is_err());
/// ```
pub fn validate_price_satang(satang: i64) -> ValidationResult<()> {
    if satang < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Enumerated Values
// =============================================================================

/// Parses a size label from an order form.
pub fn validate_size(label: &str) -> ValidationResult<SizeCode> {
    label.parse()
}

/// Parses a status string from the admin UI.
pub fn validate_status(status: &str) -> ValidationResult<OrderStatus> {
    status.parse()
}

/// Parses a comma-separated status filter (`"pending,confirmed"`).
///
/// Blank input means no filter and yields an empty list. Duplicates are
/// collapsed, first occurrence wins.
pub fn parse_status_filter(raw: &str) -> ValidationResult<Vec<OrderStatus>> {
    let mut statuses = Vec::new();

    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let status = validate_status(part)?;
        if !statuses.contains(&status) {
            statuses.push(status);
        }
    }

    Ok(statuses)
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates the number of lines in one order.
pub fn validate_order_size(lines: usize) -> ValidationResult<()> {
    if lines == 0 {
        return Err(ValidationError::required("items"));
    }

    if lines > MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
