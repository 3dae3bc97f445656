use sqlx::SqlitePool;

use super::models::Product;
use super::StoreError;

pub async fn list(pool: &SqlitePool) -> Result<Vec<Product>, StoreError> {
    let products = sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(products)
}

pub async fn insert(pool: &SqlitePool, product: &Product) -> Result<(), StoreError> {
    sqlx::query("INSERT INTO products (id, name, description, price) VALUES (?, ?, ?, ?)")
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .execute(pool)
        .await?;
    Ok(())
}

/// Remove all products. Only used by the dev-only seed route.
pub async fn clear(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM products").execute(pool).await?;
    Ok(())
}
