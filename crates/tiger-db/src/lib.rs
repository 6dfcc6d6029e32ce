//! # tiger-db: Database Layer for Tiger Shirts
//!
//! SQLite storage for the design catalog, combo edges and orders, accessed
//! asynchronously through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tiger Shirts Data Flow                           │
//! │                                                                         │
//! │  axum handler (GET /api/admin/size-summary)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tiger-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ DesignRepo    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ComboRepo     │    │ 001_initial  │  │   │
//! │  │   │               │    │ OrderRepo     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  tiger-core::summary::aggregate(items, designs, registry)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (design, combo, order)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tiger_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("data/tiger.db")).await?;
//! let registry = db.combos().registry().await?;
//! let designs = db.designs().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::{ComboRepository, DesignRepository, OrderRepository};
