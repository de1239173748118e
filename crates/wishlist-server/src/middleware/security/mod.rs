//! CORS and request body limits.

mod cors;

use tower_http::limit::RequestBodyLimitLayer;

pub use self::cors::{CorsConfig, create_cors_layer};

/// Largest accepted request body; wishlist payloads are small JSON documents.
pub const MAX_BODY_SIZE: usize = 1024 * 1024;

pub fn create_body_limit_layer(limit: usize) -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(limit)
}
