//! Contactbook Server: personal contacts backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use contactbook_api::{AppState, build_app};
use contactbook_cache::provider::CacheManager;
use contactbook_core::config::AppConfig;
use contactbook_core::traits::SystemClock;
use contactbook_database::Database;
use contactbook_storage::LocalStorageProvider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("CONTACTBOOK_ENV").unwrap_or_else(|_| "development".to_string());
    let config = AppConfig::load(&env).context("Failed to load configuration")?;

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = ?e, "Server error");
        return Err(e);
    }
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Contactbook v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!(backend = ?config.database.backend, "Connecting to database...");
    let database = Database::connect(&config.database)
        .await
        .context("Database connection failed")?;
    tracing::info!(backend = database.backend_name(), "Database ready");

    // ── Step 2: Initialize cache ─────────────────────────────────
    tracing::info!(provider = %config.cache.provider, "Initializing cache...");
    let cache = Arc::new(
        CacheManager::new(&config.cache)
            .await
            .context("Cache init failed")?,
    );

    // ── Step 3: Initialize storage ───────────────────────────────
    let storage = LocalStorageProvider::new(&config.storage.root_path)
        .await
        .context("Storage init failed")?;
    tracing::info!(root = %config.storage.root_path, "Storage initialized");

    // ── Step 4: Auth, services, and router ───────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(
        config,
        database.clone(),
        cache,
        Arc::new(storage),
        Arc::new(SystemClock),
    );
    let app = build_app(state);

    // ── Step 5: Start HTTP server ────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Contactbook server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    database.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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
    tracing::info!("Shutdown signal received");
}
