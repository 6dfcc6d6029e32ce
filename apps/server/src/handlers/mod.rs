//! Request handlers, grouped by resource. Route wiring lives in
//! [`crate::routes`].

pub mod catalog;
pub mod combos;
pub mod designs;
pub mod orders;
pub mod session;
pub mod summary;
