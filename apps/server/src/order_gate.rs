//! The "orders closed" switch.
//!
//! Admins close the pre-order window when production is locked. The flag
//! lives in Redis under [`ORDERS_CLOSED_KEY`] so every server instance sees
//! the same value. Without Redis, or whenever Redis errors, the flag falls
//! back to process memory and the server keeps serving.

use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub const ORDERS_CLOSED_KEY: &str = "ordersClosed";

/// Shared orders-closed flag.
pub struct OrderGate {
    redis: Option<redis::Client>,
    connection: Mutex<Option<MultiplexedConnection>>,
    fallback: AtomicBool,
}

impl OrderGate {
    pub fn new(redis: Option<redis::Client>) -> Self {
        OrderGate {
            redis,
            connection: Mutex::new(None),
            fallback: AtomicBool::new(false),
        }
    }

    /// A gate that never touches Redis.
    pub fn in_memory() -> Self {
        OrderGate::new(None)
    }

    /// Current state. Redis wins when reachable.
    pub async fn is_closed(&self) -> bool {
        if self.redis.is_some() {
            match self.read_redis().await {
                Ok(closed) => return closed,
                Err(e) => {
                    warn!(error = %e, "Redis read failed, using in-memory orders-closed flag");
                }
            }
        }
        self.fallback.load(Ordering::SeqCst)
    }

    /// Flips the flag and returns the new state.
    pub async fn toggle(&self) -> bool {
        if self.redis.is_some() {
            match self.toggle_redis().await {
                Ok(closed) => {
                    info!(closed, "Orders-closed flag toggled");
                    return closed;
                }
                Err(e) => {
                    warn!(error = %e, "Redis toggle failed, toggling in-memory flag");
                }
            }
        }

        let closed = !self.fallback.fetch_xor(true, Ordering::SeqCst);
        info!(closed, "Orders-closed flag toggled (in memory)");
        closed
    }

    async fn read_redis(&self) -> redis::RedisResult<bool> {
        let mut conn = self.connect().await?;
        let value: Option<String> = conn
            .get(ORDERS_CLOSED_KEY)
            .await
            .inspect_err(|_| self.forget_connection())?;
        Ok(value.as_deref() == Some("true"))
    }

    async fn toggle_redis(&self) -> redis::RedisResult<bool> {
        let closed = !self.read_redis().await?;
        let mut conn = self.connect().await?;
        let _: () = conn
            .set(ORDERS_CLOSED_KEY, closed.to_string())
            .await
            .inspect_err(|_| self.forget_connection())?;
        Ok(closed)
    }

    /// Reuses the cached connection or opens a new one.
    async fn connect(&self) -> redis::RedisResult<MultiplexedConnection> {
        let mut cached = self.connection.lock().await;
        if let Some(conn) = cached.as_ref() {
            return Ok(conn.clone());
        }

        let Some(client) = &self.redis else {
            return Err(redis::RedisError::from((
                redis::ErrorKind::ClientError,
                "redis not configured",
            )));
        };

        let conn = client.get_multiplexed_async_connection().await?;
        *cached = Some(conn.clone());
        Ok(conn)
    }

    fn forget_connection(&self) {
        if let Ok(mut cached) = self.connection.try_lock() {
            *cached = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_toggle() {
        let gate = OrderGate::in_memory();
        assert!(!gate.is_closed().await);

        assert!(gate.toggle().await);
        assert!(gate.is_closed().await);

        assert!(!gate.toggle().await);
        assert!(!gate.is_closed().await);
    }

    #[tokio::test]
    async fn test_unreachable_redis_falls_back() {
        // Port 1 refuses connections; every Redis call fails fast.
        let client = redis::Client::open("redis://127.0.0.1:1/").unwrap();
        let gate = OrderGate::new(Some(client));

        assert!(!gate.is_closed().await);
        assert!(gate.toggle().await);
        assert!(gate.is_closed().await);
    }
}
