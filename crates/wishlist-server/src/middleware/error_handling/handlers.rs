use std::future::ready;

use axum::response::{IntoResponse, Response};
use futures::future::{BoxFuture, FutureExt};
use tower::timeout::error::Elapsed;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "wishlist_server::middleware::error";

type ResponseFut = BoxFuture<'static, Response>;

/// Converts errors raised by middleware layers into responses.
pub fn handle_error(err: tower::BoxError) -> ResponseFut {
    let error = if err.downcast_ref::<Elapsed>().is_some() {
        tracing::warn!(
            target: TRACING_TARGET,
            error = %err,
            "Request timeout exceeded"
        );

        Error::new(ErrorKind::ServiceUnavailable)
            .with_message("Request timeout")
            .with_context("The request took too long to process and was terminated")
    } else {
        tracing::error!(
            target: TRACING_TARGET,
            error = %err,
            "Unknown middleware error"
        );

        Error::new(ErrorKind::InternalServerError)
            .with_message("An unexpected error occurred")
    };

    ready(error.into_response()).boxed()
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[tokio::test]
    async fn timeouts_are_service_unavailable() {
        let response = handle_error(Box::new(Elapsed::new())).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn unknown_errors_are_internal() {
        let source = std::io::Error::other("boom");
        let response = handle_error(Box::new(source)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
