//! # CLI Server
//!
//! Starts the HTTP API: connects, migrates, then serves until Ctrl+C or SIGTERM.

use error::{AppError, Result, ResultExt as _};
use migration::{DatabaseConfig, Migrator, MigratorTrait as _};
use server::{create_app_router, AppState, ServerResult};
use tokio::net::TcpListener;
use tracing::info;

use crate::{commands::ServeArgs, config::parse_socket_addr};

/// Starts the API server
pub async fn serve(config: &DatabaseConfig, args: &ServeArgs) -> Result<()> {
    let address = parse_socket_addr(&args.host, args.port)?;

    info!(
        target: "serve",
        database = %config.redacted_connection_string(),
        "Connecting to database..."
    );
    let db = config.connect().await?;

    info!(target: "serve", "Running database migrations...");
    Migrator::up(&db, None)
        .await
        .map_err(|e| AppError::migration(format!("Failed to run database migrations: {}", e)))?;
    info!(target: "serve", "Database migrations completed successfully");

    let app = create_app_router(AppState::new(db));

    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::config(format!("Failed to bind to {}: {}", address, e)))?;

    let started = ServerResult::new(&address.to_string());
    info!(target: "serve", address = %started.address, started_at = %started.started_at, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")
        .log_error()?;

    info!(target: "serve", "Server stopped");
    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM)
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!(target: "serve", "Shutdown signal received");
}
