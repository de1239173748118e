//! Item and comment vote repositories.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use crate::model::{CommentVote, ItemVote, NewCommentVote, NewItemVote};
use crate::types::{VoteTransition, VoteType};
use crate::{PgClient, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for item vote database operations.
pub trait ItemVoteRepository {
    /// Lists every vote cast on any of the given items.
    fn list_item_votes(
        &self,
        item_ids: &[Uuid],
    ) -> impl Future<Output = PgResult<Vec<ItemVote>>> + Send;

    /// Toggles a user's vote on an item and returns the item's votes after
    /// the change.
    ///
    /// The user's row is locked, changed and re-read in one transaction, so
    /// a failure leaves the votes untouched.
    fn toggle_item_vote(
        &self,
        item_id: Uuid,
        user_id: &str,
        requested: VoteType,
    ) -> impl Future<Output = PgResult<Vec<ItemVote>>> + Send;
}

/// Repository for comment vote database operations.
pub trait CommentVoteRepository {
    /// Lists every vote cast on any of the given comments.
    fn list_comment_votes(
        &self,
        comment_ids: &[Uuid],
    ) -> impl Future<Output = PgResult<Vec<CommentVote>>> + Send;

    /// Toggles a user's vote on a comment and returns the comment's votes
    /// after the change, in one transaction.
    fn toggle_comment_vote(
        &self,
        comment_id: Uuid,
        user_id: &str,
        requested: VoteType,
    ) -> impl Future<Output = PgResult<Vec<CommentVote>>> + Send;
}

impl ItemVoteRepository for PgClient {
    async fn list_item_votes(&self, item_ids: &[Uuid]) -> PgResult<Vec<ItemVote>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection().await?;

        use schema::wishlist_votes::{self, dsl};

        let votes = wishlist_votes::table
            .filter(dsl::item_id.eq_any(item_ids))
            .order(dsl::created_at.asc())
            .select(ItemVote::as_select())
            .load(&mut *conn)
            .await
            .map_err(PgError::from)?;

        Ok(votes)
    }

    async fn toggle_item_vote(
        &self,
        item_id: Uuid,
        user_id: &str,
        requested: VoteType,
    ) -> PgResult<Vec<ItemVote>> {
        let mut conn = self.get_connection().await?;

        use schema::wishlist_votes::{self, dsl};

        let (transition, votes) = conn
            .transaction(|conn| {
                async move {
                    let existing = wishlist_votes::table
                        .filter(dsl::item_id.eq(item_id))
                        .filter(dsl::user_id.eq(user_id))
                        .select((dsl::id, dsl::vote_type))
                        .for_update()
                        .first::<(Uuid, VoteType)>(conn)
                        .await
                        .optional()?;

                    let transition = VoteTransition::plan(existing, requested);
                    match transition {
                        VoteTransition::Insert(vote_type) => {
                            let new_vote = NewItemVote::for_item(item_id, user_id, vote_type);
                            diesel::insert_into(wishlist_votes::table)
                                .values(&new_vote)
                                .execute(conn)
                                .await?;
                        }
                        VoteTransition::Delete { vote_id } => {
                            diesel::delete(wishlist_votes::table.filter(dsl::id.eq(vote_id)))
                                .execute(conn)
                                .await?;
                        }
                        VoteTransition::Switch { vote_id, to } => {
                            diesel::update(wishlist_votes::table.filter(dsl::id.eq(vote_id)))
                                .set(dsl::vote_type.eq(to))
                                .execute(conn)
                                .await?;
                        }
                    }

                    let votes = wishlist_votes::table
                        .filter(dsl::item_id.eq(item_id))
                        .order(dsl::created_at.asc())
                        .select(ItemVote::as_select())
                        .load(conn)
                        .await?;

                    Ok::<_, PgError>((transition, votes))
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            item_id = %item_id,
            ?transition,
            "Item vote toggled"
        );

        Ok(votes)
    }
}

impl CommentVoteRepository for PgClient {
    async fn list_comment_votes(&self, comment_ids: &[Uuid]) -> PgResult<Vec<CommentVote>> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection().await?;

        use schema::wishlist_comment_votes::{self, dsl};

        let votes = wishlist_comment_votes::table
            .filter(dsl::comment_id.eq_any(comment_ids))
            .order(dsl::created_at.asc())
            .select(CommentVote::as_select())
            .load(&mut *conn)
            .await
            .map_err(PgError::from)?;

        Ok(votes)
    }

    async fn toggle_comment_vote(
        &self,
        comment_id: Uuid,
        user_id: &str,
        requested: VoteType,
    ) -> PgResult<Vec<CommentVote>> {
        let mut conn = self.get_connection().await?;

        use schema::wishlist_comment_votes::{self, dsl};

        let (transition, votes) = conn
            .transaction(|conn| {
                async move {
                    let existing = wishlist_comment_votes::table
                        .filter(dsl::comment_id.eq(comment_id))
                        .filter(dsl::user_id.eq(user_id))
                        .select((dsl::id, dsl::vote_type))
                        .for_update()
                        .first::<(Uuid, VoteType)>(conn)
                        .await
                        .optional()?;

                    let transition = VoteTransition::plan(existing, requested);
                    match transition {
                        VoteTransition::Insert(vote_type) => {
                            let new_vote =
                                NewCommentVote::for_comment(comment_id, user_id, vote_type);
                            diesel::insert_into(wishlist_comment_votes::table)
                                .values(&new_vote)
                                .execute(conn)
                                .await?;
                        }
                        VoteTransition::Delete { vote_id } => {
                            diesel::delete(
                                wishlist_comment_votes::table.filter(dsl::id.eq(vote_id)),
                            )
                            .execute(conn)
                            .await?;
                        }
                        VoteTransition::Switch { vote_id, to } => {
                            diesel::update(
                                wishlist_comment_votes::table.filter(dsl::id.eq(vote_id)),
                            )
                            .set(dsl::vote_type.eq(to))
                            .execute(conn)
                            .await?;
                        }
                    }

                    let votes = wishlist_comment_votes::table
                        .filter(dsl::comment_id.eq(comment_id))
                        .order(dsl::created_at.asc())
                        .select(CommentVote::as_select())
                        .load(conn)
                        .await?;

                    Ok::<_, PgError>((transition, votes))
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            comment_id = %comment_id,
            ?transition,
            "Comment vote toggled"
        );

        Ok(votes)
    }
}
