//! Bearer-token auth middleware and the admin guard.
//!
//! `require_auth` resolves `Authorization: Bearer <token>` to a user row and
//! attaches a [`CurrentUser`] to the request extensions; downstream handlers
//! take it as an extractor. [`AdminUser`] reads that extension and rejects
//! non-admins, so it only works behind `require_auth`.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::db::models::User;
use crate::db::users;

use super::error::ApiError;
use super::state::AppState;

/// The authenticated caller, minus credential fields.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub username: String,
    pub admin: bool,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            admin: user.admin,
        }
    }
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = extract_bearer_token(request.headers()) else {
        warn!("unauthorized request: missing or malformed bearer token");
        return Err(ApiError::Unauthorized);
    };

    let Some(user) = users::find_by_token(&state.pool, &token).await? else {
        warn!("unauthorized request: unknown token");
        return Err(ApiError::Unauthorized);
    };

    debug!(user = %user.username, "authorized request");
    request.extensions_mut().insert(CurrentUser::from(user));
    Ok(next.run(request).await)
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;
    let mut parts = raw.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() || token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Guard for admin-only routes. Depends on `require_auth` having resolved
/// the caller first.
#[derive(Debug, Clone)]
pub struct AdminUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        if !user.admin {
            warn!(user = %user.username, "forbidden: admin route");
            return Err(ApiError::Forbidden);
        }
        Ok(AdminUser(user))
    }
}
