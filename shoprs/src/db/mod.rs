//! Persistence layer: sqlx/SQLite pool, embedded migrations, and one
//! submodule per collection (`users`, `products`, `orders`).

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

pub mod models;
pub mod orders;
pub mod products;
pub mod users;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Query(#[from] sqlx::Error),
    #[error("{0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    /// The `orders.products` column holds a JSON array of product references.
    #[error("invalid products column: {0}")]
    ProductsColumn(#[from] serde_json::Error),
}

/// Open a connection pool, creating the database file if it does not exist.
pub async fn connect(url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Apply embedded migrations from `migrations/`.
pub async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Whether the database answers a trivial query. Used by the service
/// metadata and health endpoints.
pub async fn is_reachable(pool: &SqlitePool) -> bool {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok()
}
