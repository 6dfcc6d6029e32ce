use std::sync::Arc;

use tiger_db::Database;

use crate::config::ServerConfig;
use crate::notify::Notifier;
use crate::order_gate::OrderGate;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable: the database handle wraps a pool and everything else
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ServerConfig>,
    /// Telegram notifications (no-op when unconfigured).
    pub notifier: Arc<Notifier>,
    /// The orders-closed switch.
    pub order_gate: Arc<OrderGate>,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig, notifier: Notifier, order_gate: OrderGate) -> Self {
        AppState {
            db,
            config: Arc::new(config),
            notifier: Arc::new(notifier),
            order_gate: Arc::new(order_gate),
        }
    }
}
