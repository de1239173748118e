//! Profile handlers for the authenticated caller.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;

use crate::extract::{AuthState, Json, ValidateJson};
use crate::handler::request::UpdateProfile;
use crate::handler::response::{ActionResponse, Profile};
use crate::handler::{ActionFailure, Result};
use crate::service::{ProfileService, ServiceState};

/// Tracing target for profile operations.
const TRACING_TARGET: &str = "wishlist_server::handler::profiles";

/// Returns the caller's profile, creating it from the token claims on first
/// sight.
#[tracing::instrument(skip_all, fields(user_id = %auth_claims.sub))]
async fn get_own_profile(
    State(profiles): State<ProfileService>,
    AuthState(auth_claims): AuthState,
) -> Result<(StatusCode, Json<Profile>)> {
    let profile = profiles.ensure_profile(&auth_claims.identity()).await?;
    Ok((StatusCode::OK, Json(Profile::from_model(profile))))
}

#[tracing::instrument(skip_all, fields(user_id = %auth_claims.sub))]
async fn update_own_profile(
    State(profiles): State<ProfileService>,
    AuthState(auth_claims): AuthState,
    ValidateJson(request): ValidateJson<UpdateProfile>,
) -> Result<(StatusCode, Json<ActionResponse>), ActionFailure> {
    // Profiles are created lazily, so the first request may be a PATCH.
    profiles.ensure_profile(&auth_claims.identity()).await?;
    profiles
        .update_profile(auth_claims.user_id(), request.into_model())
        .await?;

    tracing::debug!(target: TRACING_TARGET, "Profile update applied");
    Ok((StatusCode::OK, Json(ActionResponse::succeeded())))
}

/// Returns a [`Router`] with the profile routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/profile", get(get_own_profile).patch(update_own_profile))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wishlist_postgres::types::ProfileTheme;

    use super::*;
    use crate::handler::response::Items;
    use crate::handler::test::{bearer_token, create_item, create_test_server};

    #[tokio::test]
    async fn profile_is_created_from_claims() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;

        let profile = server
            .get("/profile")
            .authorization_bearer(&ada)
            .await
            .json::<Profile>();

        assert_eq!(profile.id, "auth0|ada");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.display_name, None);
        assert_eq!(profile.resolved_name, "Ada Lovelace");
        assert_eq!(profile.theme, ProfileTheme::System);
        assert!(profile.email_notifications);
        Ok(())
    }

    #[tokio::test]
    async fn display_name_applies_to_later_submissions_only() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;
        create_item(&server, &ada, "Before rename").await;

        server
            .patch("/profile")
            .authorization_bearer(&ada)
            .json(&json!({ "displayName": "Countess", "theme": "dark" }))
            .await
            .assert_status_ok();
        create_item(&server, &ada, "After rename").await;

        let items = server
            .get("/wishlist/items")
            .authorization_bearer(&ada)
            .add_query_param("sortBy", "oldest")
            .await
            .json::<Items>();
        let names: Vec<_> = items
            .iter()
            .map(|item| item.item.submitted_by_name.as_str())
            .collect();
        assert_eq!(names, ["Ada Lovelace", "Countess"]);

        let profile = server
            .get("/profile")
            .authorization_bearer(&ada)
            .await
            .json::<Profile>();
        assert_eq!(profile.theme, ProfileTheme::Dark);

        server
            .patch("/profile")
            .authorization_bearer(&ada)
            .json(&json!({ "displayName": "" }))
            .await
            .assert_status_ok();
        let profile = server
            .get("/profile")
            .authorization_bearer(&ada)
            .await
            .json::<Profile>();
        assert_eq!(profile.resolved_name, "Ada Lovelace");
        Ok(())
    }

    #[tokio::test]
    async fn oversized_bio_is_rejected() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;

        server
            .patch("/profile")
            .authorization_bearer(&ada)
            .json(&json!({ "bio": "x".repeat(501) }))
            .await
            .assert_status_bad_request();
        Ok(())
    }
}
