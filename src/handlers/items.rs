// Item handlers
// HTTP handlers for item ingestion

use axum::{http::StatusCode, response::IntoResponse, response::Redirect, Json};
use tracing::info;

use crate::{extract::ValidatedJson, models::Item};

/// Create an item
/// POST /items/
/// The payload has already been validated by the extractor and is echoed back unchanged
pub async fn create_item(ValidatedJson(item): ValidatedJson<Item>) -> impl IntoResponse {
    info!("Received item with name: {}", item.name);

    (StatusCode::OK, Json(item))
}

/// POST /items
/// Redirects to the canonical path with the trailing slash
pub async fn redirect_to_items() -> Redirect {
    Redirect::temporary("/items/")
}
