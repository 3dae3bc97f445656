use sqlx::SqlitePool;

use crate::config::Environment;

/// Shared state cloned into every handler. The pool is the only external
/// resource; it is created once at startup and owned here.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub environment: Environment,
    pub cors_origins: Vec<String>,
}
