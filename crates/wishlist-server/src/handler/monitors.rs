//! Health check handler.
//!
//! The store is pinged at most once per health cache period; the endpoint
//! is public so load balancers can poll it without a token.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::Json;
use crate::handler::response::MonitorStatus;
use crate::service::{HealthCache, ServiceState, ViewRevision};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "wishlist_server::handler::monitors";

#[tracing::instrument(skip_all)]
async fn health_status(
    State(service_state): State<ServiceState>,
    State(health_cache): State<HealthCache>,
    State(revision): State<ViewRevision>,
) -> (StatusCode, Json<MonitorStatus>) {
    let is_healthy = health_cache.is_healthy(service_state).await;

    let status_code = if is_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    tracing::debug!(
        target: TRACING_TARGET,
        is_healthy,
        status_code = status_code.as_u16(),
        "Health status checked"
    );

    let response = MonitorStatus::new(is_healthy, revision.current());
    (status_code, Json(response))
}

/// Returns a [`Router`] with the health route.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::handler::response::ServiceStatus;
    use crate::handler::test::create_test_server_with_state;
    use crate::service::{AuthKeys, MemoryStore};

    fn state_over(store: &MemoryStore) -> anyhow::Result<ServiceState> {
        let auth_keys = AuthKeys::from_secret(b"0123456789abcdef0123456789abcdef", None, None)?;
        let mut state = ServiceState::from_store(Arc::new(store.clone()), auth_keys);
        state.health_cache = HealthCache::with_cache_duration(Duration::ZERO);
        Ok(state)
    }

    #[tokio::test]
    async fn health_is_public() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        let state = state_over(&store)?;
        let server = create_test_server_with_state(routes(), state)?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let status = response.json::<MonitorStatus>();
        assert_eq!(status.status, ServiceStatus::Healthy);
        assert_eq!(status.version, env!("CARGO_PKG_VERSION"));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_store_is_unavailable() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let state = state_over(&store)?;
        let server = create_test_server_with_state(routes(), state)?;

        let response = server.get("/health").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<MonitorStatus>().status, ServiceStatus::Unhealthy);
        Ok(())
    }
}
