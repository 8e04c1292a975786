// Library root for the item echo API

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod schema;

// Re-export commonly used types
pub use error::ApiError;
pub use models::Item;
pub use routes::create_router;
