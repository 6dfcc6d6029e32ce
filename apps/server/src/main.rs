//! # Tiger Shirts Server
//!
//! HTTP API for the shirt pre-order.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tiger Shirts Server                            │
//! │                                                                         │
//! │  Browser ───► HTTP (3000) ───► Handlers ───► SQLite                    │
//! │                                    │                                    │
//! │                                    ├──► Redis (orders-closed flag)      │
//! │                                    └──► Telegram Bot API                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tiger_db::{Database, DbConfig};
use tiger_server::config::ServerConfig;
use tiger_server::notify::Notifier;
use tiger_server::order_gate::OrderGate;
use tiger_server::{build_app_router, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with_target(true)
        .init();

    info!("Starting Tiger Shirts server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        bind_addr = %config.bind_addr,
        database = %config.database_path,
        app_env = ?config.app_env,
        telegram = config.telegram.is_some(),
        "Configuration loaded"
    );

    // Open database (runs migrations)
    if let Some(dir) = std::path::Path::new(&config.database_path).parent() {
        tokio::fs::create_dir_all(dir).await?;
    }
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.database_max_connections),
    )
    .await?;

    // Connect to Redis (optional)
    let redis = match config.redis_url.as_deref() {
        Some(url) => match redis::Client::open(url) {
            Ok(client) => {
                info!("Redis client ready");
                Some(client)
            }
            Err(e) => {
                warn!(error = %e, "Invalid Redis URL, keeping the orders-closed flag in memory");
                None
            }
        },
        None => None,
    };

    let notifier = Notifier::new(config.telegram.clone(), config.app_env)?;
    if !notifier.is_enabled() {
        warn!("Telegram is not configured, notifications are disabled");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::new(db.clone(), config, notifier, OrderGate::new(redis));
    let app = build_app_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!(addr = %bind_addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
