//! Application state and dependency injection.

mod auth;
mod cache;
mod config;
mod profile;
mod revision;
pub mod store;
pub mod wishlist;

pub use crate::service::auth::AuthKeys;
pub use crate::service::cache::HealthCache;
pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder, StorageBackend};
pub use crate::service::profile::{Identity, ProfileService};
pub use crate::service::revision::ViewRevision;
pub use crate::service::store::{MemoryStore, SharedStore, WishlistStore};
pub use crate::service::wishlist::WishlistService;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Clone)]
pub struct ServiceState {
    // External services:
    pub store: SharedStore,

    // Internal services:
    pub wishlist: WishlistService,
    pub profiles: ProfileService,
    pub auth_keys: AuthKeys,
    pub health_cache: HealthCache,
    pub revision: ViewRevision,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// Opens the configured record store and loads the token keys.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        let store = service_config.connect_store().await?;
        let auth_keys = service_config.load_auth_keys()?;
        Ok(Self::from_store(store, auth_keys))
    }

    /// Assembles the state around an already opened store.
    pub fn from_store(store: SharedStore, auth_keys: AuthKeys) -> Self {
        let revision = ViewRevision::new();

        Self {
            wishlist: WishlistService::new(store.clone(), revision.clone()),
            profiles: ProfileService::new(store.clone(), revision.clone()),
            store,
            auth_keys,
            health_cache: HealthCache::new(),
            revision,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(store: SharedStore);

// Internal services:
impl_di!(wishlist: WishlistService);
impl_di!(profiles: ProfileService);
impl_di!(auth_keys: AuthKeys);
impl_di!(health_cache: HealthCache);
impl_di!(revision: ViewRevision);
