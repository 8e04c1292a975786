// Handlers module
// HTTP handlers for the REST API

pub mod items;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::ApiError, openapi::openapi_document};

/// Health check handler
/// GET /
/// Always answers with the fixed greeting, whatever the headers or query
pub async fn read_root() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "Hello": "World" })))
}

/// GET /openapi.json
pub async fn openapi() -> impl IntoResponse {
    Json(openapi_document())
}

/// Fallback for any unmatched route
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Fallback for a known path requested with an unsupported method
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
