//! # shoprs
//!
//! Minimal e-commerce backend API in Rust.
//!
//! Exposes signup/login, product listing, and order management over HTTP,
//! backed by SQLite via sqlx.
//!
//! ## Architecture
//!
//! - **Store**: sqlx/SQLite pool with embedded migrations (`users`, `products`, `orders`)
//! - **Auth**: bearer-token lookup resolving to a user row; argon2id password hashes
//! - **Orders**: buyer-created, admin-listed, admin-delivered; single pending→delivered transition
//! - **HTTP**: Axum router with rate limiting, request IDs, CORS, and graceful shutdown

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

mod auth;
mod config;
mod db;
mod http;

use std::net::SocketAddr;

use anyhow::Context;
use axum::serve;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, Cli};
use crate::http::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging().context("failed to initialize logging")?;

    let cli = Cli::parse();
    let config = AppConfig::from_cli(cli).context("failed to load configuration")?;
    info!(
        bind = %config.bind,
        environment = %config.environment,
        database_url = %config.database_url,
        cors_origins = config.cors_origins.len(),
        "configuration loaded"
    );

    let pool = db::connect(&config.database_url)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    db::migrate(&pool)
        .await
        .context("failed to run database migrations")?;
    info!("database ready");

    let state = AppState {
        pool,
        environment: config.environment,
        cors_origins: config.cors_origins,
    };

    let app = router(state);
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    let shutdown = tokio::signal::ctrl_c();
    info!(bind = %config.bind, "shoprs listening");

    serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = shutdown.await;
        info!("shutting down gracefully");
    })
    .await
    .context("server exited with error")
}

/// Initialize tracing subscriber with `RUST_LOG` env filter (default: `info`).
fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    Ok(())
}
