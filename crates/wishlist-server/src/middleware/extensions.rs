//! Extension traits for `axum::Router` to apply middleware layers.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use tower::ServiceBuilder;
use tower::timeout::TimeoutLayer;
use tower_http::catch_panic::CatchPanicLayer;

use crate::middleware::error_handling::{catch_panic, handle_error};
use crate::middleware::observability::{
    create_propagate_request_id_layer, create_request_id_layer, create_sensitive_headers_layer,
    create_trace_layer,
};
use crate::middleware::security::{
    CorsConfig, MAX_BODY_SIZE, create_body_limit_layer, create_cors_layer,
};

pub trait RouterExt<S> {
    /// Converts panics and timeouts into error responses.
    fn with_error_handling_layer(self, timeout: Duration) -> Self;

    /// Adds request ids and HTTP tracing.
    fn with_observability_layer(self) -> Self;

    /// Adds CORS and the request body limit.
    fn with_security_layer(self, cors_config: &CorsConfig) -> Self;
}

impl<S> RouterExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_error_handling_layer(self, timeout: Duration) -> Self {
        let middlewares = ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .layer(CatchPanicLayer::custom(catch_panic))
            .layer(TimeoutLayer::new(timeout));

        self.layer(middlewares)
    }

    fn with_observability_layer(self) -> Self {
        // The last layer added runs first.
        self.layer(create_propagate_request_id_layer())
            .layer(create_sensitive_headers_layer())
            .layer(create_trace_layer())
            .layer(create_request_id_layer())
    }

    fn with_security_layer(self, cors_config: &CorsConfig) -> Self {
        self.layer(create_body_limit_layer(MAX_BODY_SIZE))
            .layer(create_cors_layer(cors_config))
    }
}
