//! Wishlist service error to HTTP conversions.
//!
//! Read endpoints turn a [`WishlistError`] into the standard error envelope.
//! Mutation endpoints answer with a `{ success: false, error }` body instead,
//! carrying the same status code.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::http_error::{Error as HttpError, ErrorKind};
use crate::handler::response::{ActionResponse, VoteResponse};
use crate::service::wishlist::WishlistError;

/// Tracing target for wishlist error conversions.
const TRACING_TARGET: &str = "wishlist_server::handler::wishlist";

fn error_kind(error: &WishlistError) -> ErrorKind {
    match error {
        WishlistError::NotFound(_) => ErrorKind::NotFound,
        WishlistError::Forbidden(_) => ErrorKind::Forbidden,
        WishlistError::Validation(_) => ErrorKind::BadRequest,
        WishlistError::Store { .. } => ErrorKind::InternalServerError,
    }
}

fn trace_error(error: &WishlistError) {
    match error {
        WishlistError::Store { message, source } => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %source,
                "{message}"
            );
        }
        other => {
            tracing::debug!(
                target: TRACING_TARGET,
                error = %other,
                "Wishlist operation rejected"
            );
        }
    }
}

impl From<WishlistError> for HttpError<'static> {
    fn from(error: WishlistError) -> Self {
        trace_error(&error);

        let kind = error_kind(&error);
        match error {
            // Store details stay in the logs.
            WishlistError::Store { message, .. } => kind.with_context(message),
            WishlistError::NotFound(message)
            | WishlistError::Forbidden(message)
            | WishlistError::Validation(message) => kind.with_message(message),
        }
    }
}

/// Failed mutation rendered as an [`ActionResponse`].
#[derive(Debug)]
#[must_use = "failures do nothing unless converted into a response"]
pub struct ActionFailure(pub WishlistError);

impl ActionFailure {
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        error_kind(&self.0).status_code()
    }
}

impl From<WishlistError> for ActionFailure {
    #[inline]
    fn from(error: WishlistError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ActionFailure {
    fn into_response(self) -> Response {
        trace_error(&self.0);
        let status = self.status_code();
        let body = ActionResponse::failed(self.0.message());
        (status, Json(body)).into_response()
    }
}

/// Failed vote toggle rendered as a [`VoteResponse`] with zeroed counts.
#[derive(Debug)]
#[must_use = "failures do nothing unless converted into a response"]
pub struct VoteFailure(pub WishlistError);

impl VoteFailure {
    #[inline]
    pub fn status_code(&self) -> StatusCode {
        error_kind(&self.0).status_code()
    }
}

impl From<WishlistError> for VoteFailure {
    #[inline]
    fn from(error: WishlistError) -> Self {
        Self(error)
    }
}

impl IntoResponse for VoteFailure {
    fn into_response(self) -> Response {
        trace_error(&self.0);
        let status = self.status_code();
        let body = VoteResponse::failed(self.0.message());
        (status, Json(body)).into_response()
    }
}
