//! Authentication middleware for private routes.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::extract::AuthState;

/// Rejects requests without a valid bearer token before routing them on.
///
/// The verified claims are cached in the request extensions, so handlers
/// extracting [`AuthState`] again do not repeat the verification.
pub async fn require_authentication(
    AuthState(_): AuthState,
    request: Request,
    next: Next,
) -> Response {
    next.run(request).await
}
