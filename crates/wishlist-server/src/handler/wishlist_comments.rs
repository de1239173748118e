//! Comment handlers: threaded comments on items and comment votes.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, post};

use crate::extract::{AuthState, Json, Path, ValidateJson};
use crate::handler::request::{CommentPathParams, CreateComment, ItemPathParams, ToggleVote};
use crate::handler::response::{ActionResponse, VoteResponse};
use crate::handler::{ActionFailure, Result, VoteFailure};
use crate::service::{ProfileService, ServiceState, WishlistService};

/// Tracing target for comment operations.
const TRACING_TARGET: &str = "wishlist_server::handler::wishlist_comments";

#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.sub,
        item_id = %path_params.item_id,
    )
)]
async fn create_comment(
    State(wishlist): State<WishlistService>,
    State(profiles): State<ProfileService>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<ItemPathParams>,
    ValidateJson(request): ValidateJson<CreateComment>,
) -> Result<(StatusCode, Json<ActionResponse>), ActionFailure> {
    tracing::debug!(target: TRACING_TARGET, "Creating comment");

    let user_name = profiles.display_name_for(&auth_claims.identity()).await?;
    wishlist
        .add_comment(
            path_params.item_id,
            auth_claims.user_id(),
            &user_name,
            &request.content,
            request.placement(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ActionResponse::succeeded())))
}

#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.sub,
        comment_id = %path_params.comment_id,
    )
)]
async fn delete_comment(
    State(wishlist): State<WishlistService>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<CommentPathParams>,
) -> Result<(StatusCode, Json<ActionResponse>), ActionFailure> {
    wishlist
        .delete_comment(path_params.comment_id, auth_claims.user_id())
        .await?;

    tracing::debug!(target: TRACING_TARGET, "Comment deleted");
    Ok((StatusCode::OK, Json(ActionResponse::succeeded())))
}

#[tracing::instrument(
    skip_all,
    fields(
        user_id = %auth_claims.sub,
        comment_id = %path_params.comment_id,
    )
)]
async fn vote_comment(
    State(wishlist): State<WishlistService>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<CommentPathParams>,
    ValidateJson(request): ValidateJson<ToggleVote>,
) -> Result<(StatusCode, Json<VoteResponse>), VoteFailure> {
    let tally = wishlist
        .toggle_comment_vote(
            path_params.comment_id,
            auth_claims.user_id(),
            request.vote_type,
        )
        .await?;

    Ok((StatusCode::OK, Json(VoteResponse::from_tally(tally))))
}

/// Returns a [`Router`] with all comment routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/wishlist/items/{itemId}/comments", post(create_comment))
        .route("/wishlist/comments/{commentId}", delete(delete_comment))
        .route("/wishlist/comments/{commentId}/votes", post(vote_comment))
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::handler::response::{ItemWithComments, Items};
    use crate::handler::test::{bearer_token, create_item, create_test_server};

    async fn comment(
        server: &TestServer,
        token: &str,
        item_id: Uuid,
        content: &str,
        parent_id: Option<Uuid>,
    ) -> axum_test::TestResponse {
        server
            .post(&format!("/wishlist/items/{item_id}/comments"))
            .authorization_bearer(token)
            .json(&json!({ "content": content, "parentId": parent_id }))
            .await
    }

    async fn detail(server: &TestServer, token: &str, item_id: Uuid) -> ItemWithComments {
        server
            .get(&format!("/wishlist/items/{item_id}"))
            .authorization_bearer(token)
            .await
            .json::<ItemWithComments>()
    }

    #[tokio::test]
    async fn replies_nest_under_their_root() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;
        let grace = bearer_token(&state, "auth0|grace", "Grace", "Hopper")?;
        let item_id = create_item(&server, &ada, "Core switch").await;

        comment(&server, &ada, item_id, "Do we need 100G?", None)
            .await
            .assert_status(StatusCode::CREATED);
        let root_id = detail(&server, &ada, item_id).await.comments[0].id;

        comment(&server, &grace, item_id, "Yes, for the storage fabric", Some(root_id))
            .await
            .assert_status(StatusCode::CREATED);

        let thread = detail(&server, &ada, item_id).await;
        assert_eq!(thread.item.comment_count, 2);
        assert_eq!(thread.comments.len(), 1);
        assert_eq!(thread.comments[0].replies.len(), 1);
        assert_eq!(thread.comments[0].replies[0].user_name, "Grace Hopper");
        Ok(())
    }

    #[tokio::test]
    async fn replying_to_a_reply_is_rejected() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;
        let item_id = create_item(&server, &ada, "Core switch").await;

        comment(&server, &ada, item_id, "Root", None).await;
        let root_id = detail(&server, &ada, item_id).await.comments[0].id;
        comment(&server, &ada, item_id, "Reply", Some(root_id)).await;
        let reply_id = detail(&server, &ada, item_id).await.comments[0].replies[0].id;

        let response = comment(&server, &ada, item_id, "Nested", Some(reply_id)).await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<ActionResponse>(),
            ActionResponse::failed("Cannot reply to a reply")
        );
        assert_eq!(detail(&server, &ada, item_id).await.item.comment_count, 2);
        Ok(())
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;
        let item_id = create_item(&server, &ada, "Core switch").await;

        let response = comment(&server, &ada, item_id, "   ", None).await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<ActionResponse>(),
            ActionResponse::failed("Comment cannot be empty")
        );
        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_root_removes_its_replies() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;
        let grace = bearer_token(&state, "auth0|grace", "Grace", "Hopper")?;
        let item_id = create_item(&server, &ada, "Core switch").await;

        comment(&server, &ada, item_id, "Root", None).await;
        let root_id = detail(&server, &ada, item_id).await.comments[0].id;
        comment(&server, &grace, item_id, "First reply", Some(root_id)).await;
        comment(&server, &grace, item_id, "Second reply", Some(root_id)).await;

        server
            .delete(&format!("/wishlist/comments/{root_id}"))
            .authorization_bearer(&grace)
            .await
            .assert_status_forbidden();

        server
            .delete(&format!("/wishlist/comments/{root_id}"))
            .authorization_bearer(&ada)
            .await
            .assert_status_ok();

        let items = server
            .get("/wishlist/items")
            .authorization_bearer(&ada)
            .await
            .json::<Items>();
        assert_eq!(items[0].comment_count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn comment_votes_toggle() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;
        let grace = bearer_token(&state, "auth0|grace", "Grace", "Hopper")?;
        let item_id = create_item(&server, &ada, "Core switch").await;

        comment(&server, &ada, item_id, "Root", None).await;
        let root_id = detail(&server, &ada, item_id).await.comments[0].id;
        let path = format!("/wishlist/comments/{root_id}/votes");

        server
            .post(&path)
            .authorization_bearer(&grace)
            .json(&json!({ "voteType": "up" }))
            .await
            .assert_status_ok();

        let tally = server
            .post(&path)
            .authorization_bearer(&ada)
            .json(&json!({ "voteType": "down" }))
            .await
            .json::<VoteResponse>();
        assert_eq!((tally.upvotes, tally.downvotes), (1, 1));

        let seen_by_grace = detail(&server, &grace, item_id).await;
        let root = &seen_by_grace.comments[0];
        assert_eq!((root.upvotes, root.downvotes), (1, 1));
        assert_eq!(
            root.user_vote,
            Some(wishlist_postgres::types::VoteType::Up)
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_comment_vote_is_not_found() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;

        let response = server
            .post(&format!("/wishlist/comments/{}/votes", Uuid::new_v4()))
            .authorization_bearer(&ada)
            .json(&json!({ "voteType": "up" }))
            .await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<VoteResponse>(),
            VoteResponse::failed("Comment not found")
        );
        Ok(())
    }
}
