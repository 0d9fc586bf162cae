//! Main entry point for the expense tracker backend.
//!
//! This file initializes logging and configuration, sets up the database
//! connection pool, and serves the Axum application router.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod utils;

use anyhow::Result;
use config::Config;
use database::Database;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::init;
use utils::jwt::JwtUtils;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Arc::new(Config::from_env()?);
    let db = Database::new(&config).await?;
    let jwt_utils = JwtUtils::new(&config);

    if config.jwt_expires_in_seconds.is_none() {
        info!("JWT_EXPIRES_IN_SECONDS not set, issued tokens do not expire");
    }

    let app = api::app_router(db.pool().clone(), jwt_utils, config.clone())?;

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting expense tracker server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
