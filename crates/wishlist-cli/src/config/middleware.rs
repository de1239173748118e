//! Middleware configuration for the HTTP server.

use clap::Args;
use serde::{Deserialize, Serialize};
use wishlist_server::middleware::CorsConfig;

use crate::TRACING_TARGET_CONFIG;

/// HTTP middleware configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Which origins may call the API from a browser.
    #[clap(flatten)]
    pub cors: CorsConfig,
}

impl MiddlewareConfig {
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allow_credentials,
            max_age_secs = self.cors.max_age_seconds,
            "CORS configuration"
        );
    }
}
