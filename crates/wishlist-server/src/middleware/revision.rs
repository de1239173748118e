//! Exposes the wishlist view revision on every response.

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::service::ViewRevision;

/// Response header carrying the current view revision.
pub const REVISION_HEADER: &str = "x-wishlist-revision";

/// Sets [`REVISION_HEADER`] to the revision observed after the handler ran.
///
/// Clients holding a cached view refetch when the value changes.
pub async fn attach_revision(
    State(revision): State<ViewRevision>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let value = HeaderValue::from(revision.current());
    response.headers_mut().insert(REVISION_HEADER, value);
    response
}
