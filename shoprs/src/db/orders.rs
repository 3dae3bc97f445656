use sqlx::SqlitePool;

use super::models::{Order, OrderItem, OrderWithOwner, OwnerSummary};
use super::StoreError;

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    owner_id: String,
    products: String,
    address: String,
    price: f64,
    delivered: bool,
    created_at: String,
    owner_username: String,
    owner_admin: bool,
}

pub async fn create(pool: &SqlitePool, order: &Order) -> Result<(), StoreError> {
    let products = serde_json::to_string(&order.products)?;

    sqlx::query(
        "INSERT INTO orders (id, owner_id, products, address, price, delivered, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&order.id)
    .bind(&order.owner_id)
    .bind(products)
    .bind(&order.address)
    .bind(order.price)
    .bind(order.delivered)
    .bind(&order.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// All orders, newest first, each joined with the owner's safe identity
/// fields. Credential columns are never selected.
pub async fn list_with_owner(pool: &SqlitePool) -> Result<Vec<OrderWithOwner>, StoreError> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT o.id, o.owner_id, o.products, o.address, o.price, o.delivered, o.created_at,
                u.username AS owner_username, u.admin AS owner_admin
         FROM orders o
         INNER JOIN users u ON u.id = o.owner_id
         ORDER BY o.created_at DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let products: Vec<OrderItem> = serde_json::from_str(&row.products)?;
            Ok(OrderWithOwner {
                owner: OwnerSummary {
                    id: row.owner_id.clone(),
                    username: row.owner_username,
                    admin: row.owner_admin,
                },
                order: Order {
                    id: row.id,
                    owner_id: row.owner_id,
                    products,
                    address: row.address,
                    price: row.price,
                    delivered: row.delivered,
                    created_at: row.created_at,
                },
            })
        })
        .collect()
}

/// Flip an order to delivered. Returns false when no such order exists.
/// Overwrites unconditionally, so re-marking a delivered order succeeds.
pub async fn mark_delivered(pool: &SqlitePool, id: &str) -> Result<bool, StoreError> {
    let result = sqlx::query("UPDATE orders SET delivered = 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
