//! Wishlist statistics handler.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::{AuthState, Json};
use crate::handler::Result;
use crate::handler::response::Stats;
use crate::service::{ServiceState, WishlistService};

#[tracing::instrument(skip_all, fields(user_id = %auth_claims.sub))]
async fn get_stats(
    State(wishlist): State<WishlistService>,
    AuthState(auth_claims): AuthState,
) -> Result<(StatusCode, Json<Stats>)> {
    let stats = wishlist.stats(auth_claims.user_id()).await?;
    Ok((StatusCode::OK, Json(Stats::from_model(stats))))
}

/// Returns a [`Router`] with the statistics route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/wishlist/stats", get(get_stats))
}
