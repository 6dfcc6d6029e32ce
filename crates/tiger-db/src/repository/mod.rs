//! # Repository Module
//!
//! One repository per aggregate, each owning a pool clone.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  handler                                                                │
//! │     │  db.combos().create_or_replace("3", &components)                 │
//! │     ▼                                                                   │
//! │  ComboRepository                                                        │
//! │  ├── list_edges / registry                                             │
//! │  ├── create_or_replace   (validate, then one transaction)              │
//! │  └── delete                                                            │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  SQLite                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`DesignRepository`] - Design catalog CRUD, price map
//! - [`ComboRepository`] - Combo edges and combo admin writes
//! - [`OrderRepository`] - Orders, line items, status updates

pub mod combo;
pub mod design;
pub mod order;

pub use combo::ComboRepository;
pub use design::DesignRepository;
pub use order::OrderRepository;
