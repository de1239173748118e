//! User profiles keyed by the identity-provider user id.

use jiff::Timestamp;
use wishlist_postgres::model::{NewUserProfile, UpdateUserProfile, UserProfile};

use crate::TRACING_TARGET_PROFILE;
use crate::service::revision::ViewRevision;
use crate::service::store::SharedStore;
use crate::service::wishlist::{WishlistError, WishlistResult};

/// Caller identity taken from verified bearer token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Picture url from the identity provider.
    pub avatar_url: Option<String>,
}

/// Profile lookups and updates.
#[derive(Clone)]
pub struct ProfileService {
    store: SharedStore,
    revision: ViewRevision,
}

impl ProfileService {
    pub fn new(store: SharedStore, revision: ViewRevision) -> Self {
        Self { store, revision }
    }

    /// Returns the caller's profile, creating it on first sight.
    ///
    /// A missing stored avatar falls back to the identity picture without
    /// being persisted.
    #[tracing::instrument(skip_all, fields(user_id = %identity.user_id))]
    pub async fn ensure_profile(&self, identity: &Identity) -> WishlistResult<UserProfile> {
        const FAILED: &str = "Failed to load profile";

        let stored = self
            .store
            .find_profile(&identity.user_id)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?;

        let mut profile = match stored {
            Some(profile) => profile,
            None => {
                let new_profile = NewUserProfile::for_user(&identity.user_id, &identity.email)
                    .with_names(identity.first_name.clone(), identity.last_name.clone())
                    .with_avatar_url(identity.avatar_url.clone());

                let profile = self
                    .store
                    .insert_profile(new_profile)
                    .await
                    .map_err(|e| WishlistError::store(FAILED, e))?;

                tracing::info!(target: TRACING_TARGET_PROFILE, "Profile created");
                profile
            }
        };

        if profile.avatar_url.is_none() {
            profile.avatar_url = identity.avatar_url.clone();
        }

        Ok(profile)
    }

    /// Returns a stored profile.
    pub async fn get_profile(&self, user_id: &str) -> WishlistResult<Option<UserProfile>> {
        self.store
            .find_profile(user_id)
            .await
            .map_err(|e| WishlistError::store("Failed to load profile", e))
    }

    /// Returns the name recorded with the caller's submissions and comments.
    pub async fn display_name_for(&self, identity: &Identity) -> WishlistResult<String> {
        let profile = self.ensure_profile(identity).await?;
        Ok(profile.display_name())
    }

    /// Applies `changes` to an existing profile and refreshes `updated_at`.
    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn update_profile(
        &self,
        user_id: &str,
        changes: UpdateUserProfile,
    ) -> WishlistResult<UserProfile> {
        if changes.is_empty() {
            return self
                .get_profile(user_id)
                .await?
                .ok_or_else(|| WishlistError::NotFound("Profile not found".into()));
        }

        let profile = self
            .store
            .update_profile(user_id, changes.touched_at(Timestamp::now()))
            .await
            .map_err(|e| WishlistError::store("Failed to update profile", e))?
            .ok_or_else(|| WishlistError::NotFound("Profile not found".into()))?;

        self.revision.bump();
        tracing::info!(target: TRACING_TARGET_PROFILE, "Profile updated");

        Ok(profile)
    }
}
