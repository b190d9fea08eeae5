//! Ringside Backend Service
//!
//! Main entry point for the Ringside match-scheduling backend.
//! This service provides the HTTP API for the fight, event and offer
//! lifecycles and the derived fighter record aggregation.

use anyhow::Context;
use ringside_backend::config::AppConfig;
use ringside_backend::database::{create_pool, run_migrations};
use ringside_backend::{routes, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        anyhow::anyhow!(e)
    })?;

    // Initialize tracing/logging with config
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "ringside_backend={},sqlx=warn,tower_http=info",
                    config.log_level
                )
                .into()
            }),
        )
        .init();

    info!("Ringside backend service starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!("HTTP port: {}", config.http_port);

    // =========================================================================
    // DATABASE SETUP
    // =========================================================================
    info!("Connecting to database...");

    let pool = create_pool(&config.database)
        .await
        .map_err(|e| {
            error!("Failed to create database pool: {}", e);
            e
        })
        .context("database pool creation failed")?;

    info!("Database connection pool created successfully");
    info!("Max connections: {}", config.database.max_connections);

    // Run migrations
    info!("Running database migrations...");
    run_migrations(&pool, None)
        .await
        .map_err(|e| {
            error!("Database migration failed: {}", e);
            e
        })
        .context("database migration failed")?;

    info!("Database migrations completed successfully");

    // =========================================================================
    // APPLICATION STATE & ROUTER
    // =========================================================================
    let app_state = Arc::new(AppState::new(pool, &config));
    info!("✓ Application state initialized with repositories and services");

    let app = routes::router(app_state);

    // =========================================================================
    // START SERVER
    // =========================================================================
    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port)
        .parse()
        .context("invalid HTTP listen address")?;

    let listener = TcpListener::bind(addr)
        .await
        .context("failed to bind HTTP server")?;

    info!("✓ HTTP server listening on {}", addr);
    info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received, shutting down gracefully...");
        })
        .await
        .context("HTTP server error")?;

    info!("Ringside backend service shutdown complete");
    Ok(())
}
