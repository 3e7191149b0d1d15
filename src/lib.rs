use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, patch, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::services::ServeDir;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod storage;
pub mod validation;

use error::ApiError;
use middleware::{jwt_auth_middleware, ApiResponse, ApiResult};

pub fn app() -> Router {
    use handlers::protected::{catalog as catalog_protected, user as user_protected};
    use handlers::public::{auth as auth_public, catalog as catalog_public, taxonomy};

    let storage = &config::config().storage;

    // Routes behind the JWT middleware
    let protected = Router::new()
        .route(
            "/api/v1/catalog",
            post(catalog_protected::create).patch(catalog_protected::update),
        )
        .route("/api/v1/catalog/add-image", post(catalog_protected::add_image))
        .route("/api/v1/user", get(user_protected::profile))
        .route("/api/v1/user/profile", patch(user_protected::update_profile))
        .route(
            "/api/v1/user/profile/address",
            post(user_protected::update_address),
        )
        .route_layer(from_fn(jwt_auth_middleware));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        // User
        .route("/api/v1/user/register", post(auth_public::register))
        .route("/api/v1/user/login", post(auth_public::login))
        // Catalog reads are public; the delete on the same path carries its
        // own auth layer since the GET must stay open
        .route("/api/v1/catalog/all", get(catalog_public::get_all))
        .route(
            "/api/v1/catalog/:id",
            get(catalog_public::get_by_id).merge(
                axum::routing::delete(catalog_protected::remove)
                    .route_layer(from_fn(jwt_auth_middleware)),
            ),
        )
        // Tag
        .route("/api/v1/tag", post(taxonomy::tag_create))
        .route("/api/v1/tag/all", get(taxonomy::tag_list))
        .route("/api/v1/tag/:id", axum::routing::delete(taxonomy::tag_delete))
        // Category
        .route("/api/v1/category", post(taxonomy::category_create))
        .route("/api/v1/category/all", get(taxonomy::category_list))
        .route(
            "/api/v1/category/:id",
            axum::routing::delete(taxonomy::category_delete),
        )
        // Uploaded images
        .nest_service(
            &format!("/{}", storage.image_path),
            ServeDir::new(&storage.image_path),
        )
        .merge(protected)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn root() -> ApiResult<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Ok(ApiResponse::success(json!({
        "name": "Bazaar API (Rust)",
        "version": version,
        "description": "E-commerce catalog backend built with Rust (Axum)",
        "endpoints": {
            "home": "/ (public)",
            "auth": "/api/v1/user/register, /api/v1/user/login (public)",
            "catalog": "/api/v1/catalog[/:id] (reads public, writes protected)",
            "taxonomy": "/api/v1/tag, /api/v1/category (public)",
            "profile": "/api/v1/user, /api/v1/user/profile[/address] (protected)",
        }
    })))
}

async fn health() -> ApiResult<Value> {
    let now = chrono::Utc::now();

    match database::DatabaseManager::health_check().await {
        Ok(_) => Ok(ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok"
        }))),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            Err(ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "database unavailable",
            ))
        }
    }
}
