use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tracing::{debug, info, warn};

use crate::auth::{generate_token, hash_password, verify_password};
use crate::db::models::{Order, Product, User};
use crate::db::{self, orders, products, users};

use super::auth::{require_auth, AdminUser, CurrentUser};
use super::cors::cors_layer;
use super::error::ApiError;
use super::responses::{
    database_indicator, AccountResponse, CreateOrderRequest, EndpointList, HealthResponse,
    LoginRequest, MessageResponse, OrderResponse, SeedResponse, ServiceInfo, SignupRequest,
};
use super::state::AppState;

#[allow(clippy::expect_used)]
pub fn router(state: AppState) -> Router {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(20)
            .burst_size(50)
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .expect("default governor config is valid"),
    );

    let order_routes = Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/mark-delivered/{id}", put(mark_delivered))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let mut open_routes = Router::new()
        .route("/", get(service_info))
        .route("/health", get(health))
        .route("/user/signup", post(signup))
        .route("/user/login", post(login))
        .route("/products", get(list_products));
    if !state.environment.is_production() {
        open_routes = open_routes.route("/create-db", post(create_db));
    }

    let cors = cors_layer(state.environment, &state.cors_origins);

    let mut app = Router::new()
        .merge(open_routes)
        .merge(order_routes)
        .fallback(route_not_found)
        .layer(GovernorLayer::new(governor_conf))
        .layer(tower_http::request_id::SetRequestIdLayer::new(
            axum::http::header::HeaderName::from_static("x-request-id"),
            tower_http::request_id::MakeRequestUuid::default(),
        ))
        .layer(tower_http::request_id::PropagateRequestIdLayer::new(
            axum::http::header::HeaderName::from_static("x-request-id"),
        ))
        .layer(tower_http::trace::TraceLayer::new_for_http());
    if let Some(cors) = cors {
        app = app.layer(cors);
    }

    app.with_state(state)
}

async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    let reachable = db::is_reachable(&state.pool).await;
    let init = (!state.environment.is_production()).then_some("POST /create-db");

    Json(ServiceInfo {
        name: "shoprs - Backend API",
        version: env!("CARGO_PKG_VERSION"),
        status: "Running",
        environment: state.environment.as_str(),
        endpoints: EndpointList {
            products: "/products",
            auth: "/user/signup, /user/login",
            orders: "/orders",
            init,
        },
        database: database_indicator(reachable),
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let reachable = db::is_reachable(&state.pool).await;
    Json(HealthResponse {
        status: "ok",
        database: database_indicator(reachable),
    })
}

async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let username = body.username.trim();
    if username.is_empty() || body.password.is_empty() {
        return Err(ApiError::BadRequest(String::from(
            "username and password are required",
        )));
    }

    if users::find_by_username(&state.pool, username).await?.is_some() {
        debug!(username = %username, "signup rejected: username taken");
        return Err(ApiError::Conflict(String::from("Username already taken")));
    }

    let password_hash = hash_password(&body.password)?;
    let user = User::new(
        String::from(username),
        body.email,
        password_hash,
        generate_token(),
    );
    users::create(&state.pool, &user).await?;
    info!(user_id = %user.id, username = %user.username, "user created");

    Ok((
        StatusCode::CREATED,
        Json(AccountResponse {
            id: user.id,
            username: user.username,
            admin: user.admin,
            token: user.token,
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let Some(user) = users::find_by_username(&state.pool, body.username.trim()).await? else {
        warn!("login failed: unknown user");
        return Err(ApiError::Unauthorized);
    };

    if !verify_password(&body.password, &user.password_hash)? {
        warn!(username = %user.username, "login failed: wrong password");
        return Err(ApiError::Unauthorized);
    }

    debug!(username = %user.username, "login succeeded");
    Ok(Json(AccountResponse {
        id: user.id,
        username: user.username,
        admin: user.admin,
        token: user.token,
    }))
}

async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = products::list(&state.pool).await?;
    debug!(products = products.len(), "products requested");
    Ok(Json(products))
}

async fn create_order(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let order = Order::new(user.id, body.products, body.address, body.price);
    orders::create(&state.pool, &order).await?;
    info!(order_id = %order.id, owner = %user.username, price = order.price, "order created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Order created",
        }),
    ))
}

async fn list_orders(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let listed = orders::list_with_owner(&state.pool).await?;
    debug!(orders = listed.len(), admin = %admin.username, "orders listed");

    let orders = listed.into_iter().map(OrderResponse::from).collect();
    Ok(Json(orders))
}

async fn mark_delivered(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !orders::mark_delivered(&state.pool, &id).await? {
        return Err(ApiError::NotFound(format!("order {id} not found")));
    }
    info!(order_id = %id, admin = %admin.username, "order marked delivered");

    Ok(Json(MessageResponse { message: "Updated" }))
}

/// Dev-only: reseed the product catalog. Not registered in production.
async fn create_db(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SeedResponse>), ApiError> {
    let seed = demo_products();
    products::clear(&state.pool).await?;
    for product in &seed {
        products::insert(&state.pool, product).await?;
    }
    info!(products = seed.len(), "product catalog seeded");

    Ok((
        StatusCode::CREATED,
        Json(SeedResponse {
            message: "Database seeded",
            products: seed.len(),
        }),
    ))
}

async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

fn demo_products() -> Vec<Product> {
    vec![
        Product::new("Keyboard", "Tenkeyless mechanical keyboard", 89.0),
        Product::new("Mouse", "Wireless ergonomic mouse", 49.5),
        Product::new("Monitor", "27-inch 1440p display", 249.99),
        Product::new("USB-C hub", "7-port hub with passthrough charging", 34.9),
    ]
}
