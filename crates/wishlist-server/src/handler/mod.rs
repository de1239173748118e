//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! Every route except `GET /health` requires an identity-provider bearer
//! token. Each response carries the current view revision in the
//! `x-wishlist-revision` header.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wishlist_server::handler::routes;
//! use wishlist_server::service::{AuthKeys, MemoryStore, ServiceState};
//!
//! # fn example() -> anyhow::Result<()> {
//! let auth_keys = AuthKeys::from_secret(b"0123456789abcdef0123456789abcdef", None, None)?;
//! let state = ServiceState::from_store(Arc::new(MemoryStore::new()), auth_keys);
//! let app: axum::Router = routes(state.clone()).with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod profiles;
mod request;
mod response;
mod wishlist_comments;
mod wishlist_items;
mod wishlist_stats;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{ActionFailure, Error, ErrorKind, Result, VoteFailure};
pub use crate::handler::request::*;
pub use crate::handler::response::*;
use crate::middleware::{attach_revision, require_authentication};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with all private routes.
fn private_routes() -> Router<ServiceState> {
    Router::new()
        .merge(wishlist_items::routes())
        .merge(wishlist_comments::routes())
        .merge(wishlist_stats::routes())
        .merge(profiles::routes())
}

/// Returns a [`Router`] with all public routes.
fn public_routes() -> Router<ServiceState> {
    Router::new().merge(monitors::routes())
}

/// Returns a [`Router`] with all routes.
pub fn routes(state: ServiceState) -> Router<ServiceState> {
    let require_authentication = from_fn_with_state(state.clone(), require_authentication);
    let attach_revision = from_fn_with_state(state, attach_revision);

    let private_router = private_routes().route_layer(require_authentication);

    Router::new()
        .merge(private_router)
        .merge(public_routes())
        .fallback(handler)
        .layer(attach_revision)
}

#[cfg(test)]
pub(crate) mod test {
    use std::sync::Arc;

    use axum::Router;
    use axum_test::TestServer;
    use jiff::Timestamp;
    use serde_json::json;
    use uuid::Uuid;

    use crate::handler::{Items, routes};
    use crate::service::{AuthKeys, MemoryStore, ServiceState};

    const TEST_SECRET: &[u8] = b"wishlist-test-secret-0123456789abcdef";

    /// Returns a state over an empty in-memory store.
    pub fn create_test_state() -> anyhow::Result<ServiceState> {
        let auth_keys = AuthKeys::from_secret(TEST_SECRET, None, None)?;
        Ok(ServiceState::from_store(Arc::new(MemoryStore::new()), auth_keys))
    }

    /// Returns a new [`TestServer`] with the given router and state.
    pub fn create_test_server_with_state(
        router: Router<ServiceState>,
        state: ServiceState,
    ) -> anyhow::Result<TestServer> {
        let app = router.with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] with every route and its state.
    pub fn create_test_server() -> anyhow::Result<(TestServer, ServiceState)> {
        let state = create_test_state()?;
        let server = create_test_server_with_state(routes(state.clone()), state.clone())?;
        Ok((server, state))
    }

    /// Signs a token the way the identity provider would.
    pub fn bearer_token(
        state: &ServiceState,
        user_id: &str,
        given_name: &str,
        family_name: &str,
    ) -> anyhow::Result<String> {
        let claims = json!({
            "sub": user_id,
            "email": format!("{}@example.com", given_name.to_lowercase()),
            "given_name": given_name,
            "family_name": family_name,
            "exp": Timestamp::now().as_second() + 3600,
        });

        Ok(state.auth_keys.sign(&claims)?)
    }

    /// Adds an item and returns its id.
    pub async fn create_item(server: &TestServer, token: &str, name: &str) -> Uuid {
        server
            .post("/wishlist/items")
            .authorization_bearer(token)
            .json(&json!({
                "name": name,
                "description": format!("{name} for the lab"),
                "category": "hardware",
                "priority": "medium",
            }))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let items = server
            .get("/wishlist/items")
            .authorization_bearer(token)
            .await
            .json::<Items>();

        items
            .into_iter()
            .find(|item| item.item.name == name)
            .map(|item| item.item.id)
            .unwrap()
    }

    #[tokio::test]
    async fn handlers() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;
        assert!(server.is_running());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_routes_are_not_found() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server.get("/nowhere").await;
        response.assert_status_not_found();
        assert_eq!(response.json::<serde_json::Value>()["name"], "not_found");
        Ok(())
    }
}
