use serde::{Deserialize, Serialize};

use crate::db::models::{OrderItem, OrderWithOwner, OwnerSummary};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by signup and login. The only response that carries the bearer
/// token; the password hash is never serialized anywhere.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub admin: bool,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub products: Vec<OrderItem>,
    pub address: String,
    // Caller-supplied, not checked against the catalog.
    pub price: f64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub owner: OwnerSummary,
    pub products: Vec<OrderItem>,
    pub address: String,
    pub price: f64,
    pub delivered: bool,
    pub created_at: String,
}

impl From<OrderWithOwner> for OrderResponse {
    fn from(row: OrderWithOwner) -> Self {
        Self {
            id: row.order.id,
            owner: row.owner,
            products: row.order.products,
            address: row.order.address,
            price: row.order.price,
            delivered: row.order.delivered,
            created_at: row.order.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub environment: &'static str,
    pub endpoints: EndpointList,
    pub database: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EndpointList {
    pub products: &'static str,
    pub auth: &'static str,
    pub orders: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
    pub products: usize,
}

pub fn database_indicator(reachable: bool) -> &'static str {
    if reachable {
        "connected"
    } else {
        "unavailable"
    }
}
