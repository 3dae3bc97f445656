//! HTTP layer: Axum router, handlers, and responses.
//!
//! Exposes signup/login, the product catalog, the order lifecycle, and
//! service metadata. Protected routes sit behind the bearer-token auth
//! middleware; admin-only routes additionally require the admin flag.

mod auth;
mod cors;
mod error;
mod handlers;
mod responses;
mod state;


pub use handlers::router;
pub use state::AppState;
