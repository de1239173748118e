//! Wishlist item handlers: listing, submission, detail, deletion and voting.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use validator::Validate;

use crate::extract::{AuthState, Json, Path, Query, ValidateJson};
use crate::handler::request::{CreateWishlistItem, ItemPathParams, ListItems, ToggleVote};
use crate::handler::response::{ActionResponse, Item, ItemWithComments, Items, VoteResponse};
use crate::handler::{ActionFailure, ErrorKind, Result, VoteFailure};
use crate::service::{ProfileService, ServiceState, WishlistService};

/// Tracing target for wishlist item operations.
const TRACING_TARGET: &str = "wishlist_server::handler::wishlist_items";

/// Lists items with vote tallies and comment counts.
#[tracing::instrument(skip_all, fields(user_id = %auth_claims.sub))]
async fn list_items(
    State(wishlist): State<WishlistService>,
    AuthState(auth_claims): AuthState,
    Query(request): Query<ListItems>,
) -> Result<(StatusCode, Json<Items>)> {
    request.validate()?;

    let items = wishlist
        .list_items(auth_claims.user_id(), &request.into_query())
        .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        item_count = items.len(),
        "Wishlist items listed",
    );

    Ok((StatusCode::OK, Json(Item::from_models(items))))
}

/// Adds an item under the caller's current display name.
#[tracing::instrument(skip_all, fields(user_id = %auth_claims.sub))]
async fn create_item(
    State(wishlist): State<WishlistService>,
    State(profiles): State<ProfileService>,
    AuthState(auth_claims): AuthState,
    ValidateJson(request): ValidateJson<CreateWishlistItem>,
) -> Result<(StatusCode, Json<ActionResponse>), ActionFailure> {
    let user_name = profiles.display_name_for(&auth_claims.identity()).await?;
    let item = wishlist
        .add_item(request.into_model(auth_claims.user_id(), &user_name))
        .await?;

    tracing::info!(
        target: TRACING_TARGET,
        item_id = %item.id,
        "Wishlist item created",
    );

    Ok((StatusCode::CREATED, Json(ActionResponse::succeeded())))
}

/// Returns an item with its comment thread.
#[tracing::instrument(skip_all, fields(user_id = %auth_claims.sub, item_id = %path_params.item_id))]
async fn get_item(
    State(wishlist): State<WishlistService>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<ItemPathParams>,
) -> Result<(StatusCode, Json<ItemWithComments>)> {
    let detail = wishlist
        .item_detail(path_params.item_id, auth_claims.user_id())
        .await?
        .ok_or_else(|| {
            ErrorKind::NotFound
                .with_message("Item not found")
                .with_resource("item")
        })?;

    Ok((StatusCode::OK, Json(ItemWithComments::from_model(detail))))
}

/// Deletes one of the caller's items with its votes and comments.
#[tracing::instrument(skip_all, fields(user_id = %auth_claims.sub, item_id = %path_params.item_id))]
async fn delete_item(
    State(wishlist): State<WishlistService>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<ItemPathParams>,
) -> Result<(StatusCode, Json<ActionResponse>), ActionFailure> {
    wishlist
        .delete_item(path_params.item_id, auth_claims.user_id())
        .await?;

    tracing::info!(target: TRACING_TARGET, "Wishlist item deleted");
    Ok((StatusCode::OK, Json(ActionResponse::succeeded())))
}

/// Toggles the caller's vote on an item.
#[tracing::instrument(skip_all, fields(user_id = %auth_claims.sub, item_id = %path_params.item_id))]
async fn vote_item(
    State(wishlist): State<WishlistService>,
    AuthState(auth_claims): AuthState,
    Path(path_params): Path<ItemPathParams>,
    ValidateJson(request): ValidateJson<ToggleVote>,
) -> Result<(StatusCode, Json<VoteResponse>), VoteFailure> {
    let tally = wishlist
        .toggle_item_vote(path_params.item_id, auth_claims.user_id(), request.vote_type)
        .await?;

    Ok((StatusCode::OK, Json(VoteResponse::from_tally(tally))))
}

/// Returns a [`Router`] with all wishlist item routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/wishlist/items", get(list_items).post(create_item))
        .route("/wishlist/items/{itemId}", get(get_item).delete(delete_item))
        .route("/wishlist/items/{itemId}/votes", post(vote_item))
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::handler::test::{bearer_token, create_item, create_test_server};
    use crate::middleware::REVISION_HEADER;

    #[tokio::test]
    async fn listing_requires_a_token() -> anyhow::Result<()> {
        let (server, _) = create_test_server()?;

        let response = server.get("/wishlist/items").await;
        response.assert_status_unauthorized();

        let body = response.json::<Value>();
        assert_eq!(body["name"], "missing_auth_token");
        assert_eq!(body["resource"], "authentication");
        Ok(())
    }

    #[tokio::test]
    async fn created_item_is_listed_with_submitter_name() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;

        let response = server
            .post("/wishlist/items")
            .authorization_bearer(&ada)
            .json(&json!({
                "name": "Spare NVMe drives",
                "description": "Two 4TB drives for the storage node",
                "category": "storage",
                "priority": "high",
                "estimatedCost": 640.0,
                "link": "https://vendor.example.com/nvme",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>(), json!({ "success": true }));
        assert_eq!(response.header(REVISION_HEADER), "1");

        let items = server
            .get("/wishlist/items")
            .authorization_bearer(&ada)
            .await
            .json::<Items>();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].item.submitted_by, "auth0|ada");
        assert_eq!(items[0].item.submitted_by_name, "Ada Lovelace");
        assert_eq!(items[0].score, 0);
        assert_eq!(items[0].comment_count, 0);
        Ok(())
    }

    #[tokio::test]
    async fn invalid_item_is_rejected_before_the_store() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;

        let response = server
            .post("/wishlist/items")
            .authorization_bearer(&ada)
            .json(&json!({
                "name": "Switch",
                "description": "48 port",
                "category": "network",
                "priority": "low",
                "estimatedCost": -5,
            }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["name"], "bad_request");
        assert_eq!(state.revision.current(), 0);
        Ok(())
    }

    #[tokio::test]
    async fn only_the_owner_can_delete() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;
        let grace = bearer_token(&state, "auth0|grace", "Grace", "Hopper")?;
        let item_id = create_item(&server, &ada, "GPU node").await;

        let response = server
            .delete(&format!("/wishlist/items/{item_id}"))
            .authorization_bearer(&grace)
            .await;
        response.assert_status_forbidden();
        assert_eq!(
            response.json::<ActionResponse>(),
            ActionResponse::failed("You can only delete your own items")
        );

        server
            .get(&format!("/wishlist/items/{item_id}"))
            .authorization_bearer(&grace)
            .await
            .assert_status_ok();

        server
            .delete(&format!("/wishlist/items/{item_id}"))
            .authorization_bearer(&ada)
            .await
            .assert_status_ok();

        server
            .get(&format!("/wishlist/items/{item_id}"))
            .authorization_bearer(&ada)
            .await
            .assert_status_not_found();
        Ok(())
    }

    #[tokio::test]
    async fn voting_twice_removes_the_vote() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;
        let item_id = create_item(&server, &ada, "UPS batteries").await;
        let path = format!("/wishlist/items/{item_id}/votes");

        let first = server
            .post(&path)
            .authorization_bearer(&ada)
            .json(&json!({ "voteType": "up" }))
            .await
            .json::<Value>();
        assert_eq!(
            first,
            json!({ "success": true, "upvotes": 1, "downvotes": 0, "userVote": "up" })
        );

        let switched = server
            .post(&path)
            .authorization_bearer(&ada)
            .json(&json!({ "voteType": "down" }))
            .await
            .json::<VoteResponse>();
        assert_eq!((switched.upvotes, switched.downvotes), (0, 1));

        let removed = server
            .post(&path)
            .authorization_bearer(&ada)
            .json(&json!({ "voteType": "down" }))
            .await
            .json::<VoteResponse>();
        assert_eq!((removed.upvotes, removed.downvotes), (0, 0));
        assert_eq!(removed.user_vote, None);
        Ok(())
    }

    #[tokio::test]
    async fn voting_on_a_missing_item_fails_with_zeroed_counts() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;

        let response = server
            .post(&format!("/wishlist/items/{}/votes", uuid::Uuid::new_v4()))
            .authorization_bearer(&ada)
            .json(&json!({ "voteType": "up" }))
            .await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<VoteResponse>(),
            VoteResponse::failed("Item not found")
        );
        Ok(())
    }

    #[tokio::test]
    async fn listing_sorts_and_filters() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;
        create_item(&server, &ada, "First rack").await;
        create_item(&server, &ada, "Second rack").await;

        let oldest = server
            .get("/wishlist/items")
            .authorization_bearer(&ada)
            .add_query_param("sortBy", "oldest")
            .add_query_param("category", "all")
            .await
            .json::<Items>();
        let names: Vec<_> = oldest.iter().map(|item| item.item.name.as_str()).collect();
        assert_eq!(names, ["First rack", "Second rack"]);

        let searched = server
            .get("/wishlist/items")
            .authorization_bearer(&ada)
            .add_query_param("search", "SECOND")
            .await
            .json::<Items>();
        assert_eq!(searched.len(), 1);

        let none = server
            .get("/wishlist/items")
            .authorization_bearer(&ada)
            .add_query_param("category", "software")
            .await
            .json::<Items>();
        assert!(none.is_empty());

        server
            .get("/wishlist/items")
            .authorization_bearer(&ada)
            .add_query_param("sortBy", "alphabetical")
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn malformed_item_id_is_bad_request() -> anyhow::Result<()> {
        let (server, state) = create_test_server()?;
        let ada = bearer_token(&state, "auth0|ada", "Ada", "Lovelace")?;

        let response = server
            .get("/wishlist/items/not-a-uuid")
            .authorization_bearer(&ada)
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["resource"], "request");
        Ok(())
    }
}
