//! CORS policy.
//!
//! - Explicit origin list: allow exactly those origins.
//! - No origins, non-production: allow all (DX-friendly).
//! - No origins, production: no CORS layer at all, so no cross-origin grant
//!   is ever emitted (fail closed).

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::Environment;

pub fn cors_layer(environment: Environment, origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        if environment.is_production() {
            return None;
        }
        return Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let allowed = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect::<Vec<_>>();

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

#[cfg(test)]
mod tests {
    use crate::config::Environment;

    use super::cors_layer;

    #[test]
    fn production_without_origins_fails_closed() {
        assert!(cors_layer(Environment::Production, &[]).is_none());
    }

    #[test]
    fn development_without_origins_allows_all() {
        assert!(cors_layer(Environment::Development, &[]).is_some());
    }

    #[test]
    fn explicit_origins_produce_a_layer_in_any_environment() {
        let origins = vec![String::from("https://shop.example.com")];
        assert!(cors_layer(Environment::Production, &origins).is_some());
        assert!(cors_layer(Environment::Development, &origins).is_some());
    }
}
