use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User row. `password_hash` and `token` are credentials and must never be
/// serialized into API responses; this type deliberately does not derive
/// `Serialize`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub token: String,
    pub admin: bool,
    pub created_at: String,
}

impl User {
    pub fn new(username: String, email: String, password_hash: String, token: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            password_hash,
            token,
            admin: false,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Owner identity safe to embed in order listings: no credential fields.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub id: String,
    pub username: String,
    pub admin: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    pub fn new(name: &str, description: &str, price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::from(name),
            description: String::from(description),
            price,
        }
    }
}

/// A product reference with quantity, embedded in an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i64,
}

/// Order. Two states: pending (`delivered = false`) and delivered; the only
/// legal transition is pending→delivered. Price is caller-supplied and not
/// checked against the product catalog.
#[derive(Debug, Clone)]
pub struct Order {
    pub id: String,
    pub owner_id: String,
    pub products: Vec<OrderItem>,
    pub address: String,
    pub price: f64,
    pub delivered: bool,
    pub created_at: String,
}

impl Order {
    pub fn new(owner_id: String, products: Vec<OrderItem>, address: String, price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            products,
            address,
            price,
            delivered: false,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

/// An order joined with its owner's safe identity fields.
#[derive(Debug, Clone)]
pub struct OrderWithOwner {
    pub order: Order,
    pub owner: OwnerSummary,
}
