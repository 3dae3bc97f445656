use sqlx::SqlitePool;

use super::models::User;
use super::StoreError;

pub async fn create(pool: &SqlitePool, user: &User) -> Result<(), StoreError> {
    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, token, admin, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&user.id)
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.token)
    .bind(user.admin)
    .bind(&user.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Resolve a bearer token to its user. The token column is unique, so this
/// is at most one row.
pub async fn find_by_token(pool: &SqlitePool, token: &str) -> Result<Option<User>, StoreError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE token = ?")
        .bind(token)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}
