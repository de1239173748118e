//! Wishlist comment repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt;
use uuid::Uuid;

use crate::model::{NewWishlistComment, WishlistComment};
use crate::{PgClient, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for wishlist comment database operations.
pub trait WishlistCommentRepository {
    /// Creates a new comment or reply.
    fn create_wishlist_comment(
        &self,
        new_comment: NewWishlistComment,
    ) -> impl Future<Output = PgResult<WishlistComment>> + Send;

    /// Finds a comment by its unique identifier.
    fn find_wishlist_comment_by_id(
        &self,
        comment_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<WishlistComment>>> + Send;

    /// Lists the comments of the given items, oldest first.
    fn list_wishlist_comments(
        &self,
        item_ids: &[Uuid],
    ) -> impl Future<Output = PgResult<Vec<WishlistComment>>> + Send;

    /// Deletes a comment together with its direct replies.
    ///
    /// Replies are removed first and both statements share one transaction.
    /// Returns the number of removed comments.
    fn delete_wishlist_comment_thread(
        &self,
        comment_id: Uuid,
    ) -> impl Future<Output = PgResult<usize>> + Send;
}

impl WishlistCommentRepository for PgClient {
    async fn create_wishlist_comment(
        &self,
        new_comment: NewWishlistComment,
    ) -> PgResult<WishlistComment> {
        let mut conn = self.get_connection().await?;

        use schema::wishlist_comments;

        let comment = diesel::insert_into(wishlist_comments::table)
            .values(&new_comment)
            .returning(WishlistComment::as_returning())
            .get_result(&mut *conn)
            .await
            .map_err(PgError::from)?;

        Ok(comment)
    }

    async fn find_wishlist_comment_by_id(
        &self,
        comment_id: Uuid,
    ) -> PgResult<Option<WishlistComment>> {
        let mut conn = self.get_connection().await?;

        use schema::wishlist_comments::{self, dsl};

        let comment = wishlist_comments::table
            .filter(dsl::id.eq(comment_id))
            .select(WishlistComment::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(comment)
    }

    async fn list_wishlist_comments(&self, item_ids: &[Uuid]) -> PgResult<Vec<WishlistComment>> {
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.get_connection().await?;

        use schema::wishlist_comments::{self, dsl};

        let comments = wishlist_comments::table
            .filter(dsl::item_id.eq_any(item_ids))
            .order((dsl::created_at.asc(), dsl::id.asc()))
            .select(WishlistComment::as_select())
            .load(&mut *conn)
            .await
            .map_err(PgError::from)?;

        Ok(comments)
    }

    async fn delete_wishlist_comment_thread(&self, comment_id: Uuid) -> PgResult<usize> {
        let mut conn = self.get_connection().await?;

        use schema::wishlist_comments::{self, dsl};

        let deleted = conn
            .transaction(|conn| {
                async move {
                    let replies =
                        diesel::delete(wishlist_comments::table.filter(dsl::parent_id.eq(comment_id)))
                            .execute(conn)
                            .await?;
                    let root = diesel::delete(wishlist_comments::table.filter(dsl::id.eq(comment_id)))
                        .execute(conn)
                        .await?;
                    Ok::<usize, PgError>(replies + root)
                }
                .scope_boxed()
            })
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            comment_id = %comment_id,
            deleted,
            "Comment thread deleted"
        );

        Ok(deleted)
    }
}
