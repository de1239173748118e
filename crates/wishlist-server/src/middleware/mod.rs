//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Authentication of private routes
//! - CORS and body size limits
//! - Tracing and request ids
//! - Panics and timeouts rendered as error responses
//! - The `x-wishlist-revision` response header
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use axum::Router;
//! use wishlist_server::middleware::{CorsConfig, RouterExt};
//!
//! let app: Router = Router::new()
//!     .with_error_handling_layer(Duration::from_secs(30))
//!     .with_observability_layer()
//!     .with_security_layer(&CorsConfig::default());
//! ```

mod auth;
mod error_handling;
mod extensions;
mod observability;
mod revision;
pub mod security;

pub use auth::require_authentication;
pub use extensions::RouterExt;
pub use revision::{REVISION_HEADER, attach_revision};
pub use security::CorsConfig;
