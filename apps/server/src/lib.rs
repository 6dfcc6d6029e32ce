//! # tiger-server: HTTP API for the Tiger Thailand Meeting shirt pre-order
//!
//! Public routes serve the order form; `/api/admin/...` serves the
//! organisers' dashboard (catalog, combos, orders, size summary).
//!
//! ## Modules
//!
//! - [`config`] - Environment configuration
//! - [`state`] - Shared handler state
//! - [`router`] - Router and middleware stack
//! - [`routes`] / [`handlers`] - Route wiring and request handlers
//! - [`auth`] - Admin session cookie
//! - [`order_gate`] - Orders-closed switch (Redis with in-memory fallback)
//! - [`notify`] - Telegram notifications
//! - [`error`] - HTTP error mapping

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod notify;
pub mod order_gate;
pub mod router;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use router::build_app_router;
pub use state::AppState;
