//! Application setup and router wiring.

use axum::{extract::Extension, routing::get, Router};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::server::routes::{health_handler, latest_products_handler, lowest_products_handler};
use crate::store::ProductStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub store: ProductStore,
}

/// Build the axum application with all routes and middleware.
pub fn build_app(pool: PgPool) -> Router {
    let state = AppState {
        store: ProductStore::new(pool.clone()),
        db_pool: pool,
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/products/latest", get(latest_products_handler))
        .route("/products/lowest", get(lowest_products_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
