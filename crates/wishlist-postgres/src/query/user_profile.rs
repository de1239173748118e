//! User profile repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::model::{NewUserProfile, UpdateUserProfile, UserProfile};
use crate::{PgClient, PgError, PgResult, schema};

/// Repository for user profile database operations.
pub trait UserProfileRepository {
    /// Finds a profile by the identity-provider user id.
    fn find_user_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = PgResult<Option<UserProfile>>> + Send;

    /// Creates a profile, or returns the existing one if the id is taken.
    fn create_user_profile(
        &self,
        new_profile: NewUserProfile,
    ) -> impl Future<Output = PgResult<UserProfile>> + Send;

    /// Applies a partial update and returns the updated profile.
    fn update_user_profile(
        &self,
        user_id: &str,
        updates: UpdateUserProfile,
    ) -> impl Future<Output = PgResult<Option<UserProfile>>> + Send;
}

impl UserProfileRepository for PgClient {
    async fn find_user_profile(&self, user_id: &str) -> PgResult<Option<UserProfile>> {
        let mut conn = self.get_connection().await?;

        use schema::user_profiles::{self, dsl};

        let profile = user_profiles::table
            .filter(dsl::id.eq(user_id))
            .select(UserProfile::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(profile)
    }

    async fn create_user_profile(&self, new_profile: NewUserProfile) -> PgResult<UserProfile> {
        let mut conn = self.get_connection().await?;

        use schema::user_profiles::{self, dsl};

        diesel::insert_into(user_profiles::table)
            .values(&new_profile)
            .on_conflict(dsl::id)
            .do_nothing()
            .execute(&mut *conn)
            .await
            .map_err(PgError::from)?;

        let profile = user_profiles::table
            .filter(dsl::id.eq(&new_profile.id))
            .select(UserProfile::as_select())
            .first(&mut *conn)
            .await
            .map_err(PgError::from)?;

        Ok(profile)
    }

    async fn update_user_profile(
        &self,
        user_id: &str,
        updates: UpdateUserProfile,
    ) -> PgResult<Option<UserProfile>> {
        let mut conn = self.get_connection().await?;

        use schema::user_profiles::{self, dsl};

        let profile = diesel::update(user_profiles::table.filter(dsl::id.eq(user_id)))
            .set(&updates)
            .returning(UserProfile::as_returning())
            .get_result(&mut *conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(profile)
    }
}
