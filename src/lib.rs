pub mod auth;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod types;
pub mod validation;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{jwt_auth_middleware, validate_body};

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Public auth routes
        .merge(auth_public_routes())
        // Protected API behind JWT auth
        .merge(api_routes().layer(from_fn(jwt_auth_middleware)))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    use axum::routing::post;
    use handlers::public::auth;

    Router::new()
        .route(
            "/api/auth/register",
            post(auth::register_post)
                .layer(from_fn(|req: Request, next: Next| validate_body(&dto::USER_REGISTER, req, next))),
        )
        .route(
            "/api/auth/login",
            post(auth::login_post)
                .layer(from_fn(|req: Request, next: Next| validate_body(&dto::USER_LOGIN, req, next))),
        )
}

fn api_routes() -> Router {
    use axum::routing::{patch, post};
    use handlers::protected::{categories, products, users};

    Router::new()
        .route("/api/users", get(users::users_get))
        // body validation applies to the mutating methods only
        .route(
            "/api/categories",
            post(categories::category_post)
                .layer(from_fn(|req: Request, next: Next| validate_body(&dto::CATEGORY, req, next)))
                .get(categories::category_list),
        )
        .route(
            "/api/categories/:id",
            patch(categories::category_patch)
                .layer(from_fn(|req: Request, next: Next| validate_body(&dto::CATEGORY, req, next)))
                .get(categories::category_get)
                .delete(categories::category_delete),
        )
        .route(
            "/api/products",
            post(products::product_post)
                .layer(from_fn(|req: Request, next: Next| validate_body(&dto::PRODUCT, req, next)))
                .get(products::product_list),
        )
        .route(
            "/api/products/:id",
            patch(products::product_patch)
                .layer(from_fn(|req: Request, next: Next| validate_body(&dto::PRODUCT, req, next)))
                .get(products::product_get),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Storefront API",
        "version": version,
        "description": "Catalog backend API built with Rust (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/api/auth/register, /api/auth/login (public)",
            "users": "/api/users (protected)",
            "categories": "/api/categories[/:id] (protected)",
            "products": "/api/products[/:id] (protected)",
        }
    }))
}

async fn health() -> impl IntoResponse {
    let now = chrono::Utc::now();

    match database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
