use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    config::Config,
    handlers::{
        items::{create_item, redirect_to_items},
        method_not_allowed, not_found, openapi, read_root,
    },
    middleware::create_middleware_stack,
};

/// Create the Axum router with all endpoints and middleware
pub fn create_router(config: &Config) -> Router {
    Router::new()
        // Health check endpoint
        .route("/", get(read_root).fallback(method_not_allowed))
        // Item ingestion endpoints
        .route("/items/", post(create_item).fallback(method_not_allowed))
        .route("/items", post(redirect_to_items).fallback(method_not_allowed))
        .route("/openapi.json", get(openapi).fallback(method_not_allowed))
        .fallback(not_found)
        // Apply middleware stack
        .layer(create_middleware_stack(config.request_timeout))
}
