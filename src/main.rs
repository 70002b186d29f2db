//! nscache host binary
//!
//! Serves one cache engine over HTTP, restoring its snapshot on startup and
//! saving it again on shutdown.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nscache::api::{create_router, AppState};
use nscache::{spawn_cleanup_task, Config};

/// Main entry point for the nscache host.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the engine and restore the last snapshot
/// 4. Start background sweep task
/// 5. Serve the Axum router on the configured port
/// 6. On SIGINT/SIGTERM, stop the sweep and save a snapshot
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nscache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting nscache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: default_ttl={}s, port={}, cleanup_interval={}s, snapshot_dir={}",
        config.default_ttl,
        config.server_port,
        config.cleanup_interval,
        config.snapshot_dir.display()
    );

    let state = AppState::from_config(&config);
    let restored = state.restore().await?;
    info!(
        "Cache initialized ({} entries restored: {})",
        restored.entries, restored.success
    );

    let cleanup_handle = spawn_cleanup_task(state.engine.clone(), config.cleanup_interval);

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("server error")?;

    let saved = state.save().await?;
    if saved.success {
        info!("Snapshot saved with {} entries", saved.entries);
    } else {
        warn!("Snapshot could not be saved on shutdown");
    }

    info!("Shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then aborts the sweep task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Sweep task aborted");
}
