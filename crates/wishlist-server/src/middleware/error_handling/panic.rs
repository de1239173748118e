use std::any::Any;

use axum::response::{IntoResponse, Response};

use crate::handler::ErrorKind;

const TRACING_TARGET: &str = "wishlist_server::middleware::panic";

type Panic = Box<dyn Any + Send + 'static>;

/// Logs a handler panic and answers with a 500.
pub fn catch_panic(err: Panic) -> Response {
    let message = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic type");

    tracing::error!(target: TRACING_TARGET, panic = message, "Handler panicked");

    ErrorKind::InternalServerError.into_response()
}
