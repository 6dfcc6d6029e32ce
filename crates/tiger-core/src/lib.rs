//! # tiger-core: Pure Business Logic for the Tiger Shirt Pre-Order
//!
//! This crate is the **heart** of the pre-order backend. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tiger Shirts Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Order form / Admin dashboard                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP (axum)                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tiger-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   combo   │  │  summary  │  │ validation│  │   │
//! │  │   │  Design   │  │ Registry  │  │ Aggregate │  │   rules   │  │   │
//! │  │   │  Order    │  │ Expansion │  │   Stats   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tiger-db (Database Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ShirtDesign, Order, OrderLineItem, ...)
//! - [`size`] - The closed set of shirt sizes and the per-size counter
//! - [`money`] - Money type with integer arithmetic (satang)
//! - [`combo`] - Combo registry, expansion and combo admin validation
//! - [`summary`] - Size aggregation and summary statistics
//! - [`order`] - Server-side order pricing
//! - [`export`] - Order export tables for the admin download
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use tiger_core::combo::ComboRegistry;
//! use tiger_core::summary::aggregate;
//! use tiger_core::{ComboComponentEdge, DesignRef, OrderLineItem, SizeCode};
//!
//! let designs = vec![DesignRef::new("1", "A"), DesignRef::new("2", "B"), DesignRef::new("3", "Combo")];
//! let registry = ComboRegistry::build(vec![
//!     ComboComponentEdge::new("3", "1", 1),
//!     ComboComponentEdge::new("3", "2", 1),
//! ]);
//! let items = vec![OrderLineItem::new("3", "L", 2), OrderLineItem::new("1", "L", 1)];
//!
//! let rows = aggregate(&items, &designs, &registry);
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[0].counts[SizeCode::L], 3);
//! assert_eq!(rows[1].counts[SizeCode::L], 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod combo;
pub mod error;
pub mod export;
pub mod money;
pub mod order;
pub mod size;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use size::{SizeCode, SizeCounts};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum number of line items in one order.
pub const MAX_ORDER_ITEMS: usize = 50;

/// Display name used when a design id has no catalog entry.
pub const UNKNOWN_DESIGN_NAME: &str = "Unknown";

/// Thai placeholder for an item whose design is not in the catalog.
pub const UNNAMED_DESIGN_LABEL: &str = "ไม่ระบุ";
