//! Wishlist item repository.

use std::future::Future;

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::model::{NewWishlistItem, WishlistItem};
use crate::types::WishlistCategory;
use crate::{PgClient, PgError, PgResult, TRACING_TARGET_QUERY, schema};

/// Repository for wishlist item database operations.
pub trait WishlistItemRepository {
    /// Creates a new wishlist item.
    fn create_wishlist_item(
        &self,
        new_item: NewWishlistItem,
    ) -> impl Future<Output = PgResult<WishlistItem>> + Send;

    /// Finds an item by its unique identifier.
    fn find_wishlist_item_by_id(
        &self,
        item_id: Uuid,
    ) -> impl Future<Output = PgResult<Option<WishlistItem>>> + Send;

    /// Lists items in creation order, optionally restricted to one category.
    fn list_wishlist_items(
        &self,
        category: Option<WishlistCategory>,
    ) -> impl Future<Output = PgResult<Vec<WishlistItem>>> + Send;

    /// Deletes an item; votes, comments and comment votes cascade.
    ///
    /// Returns whether a row was removed.
    fn delete_wishlist_item(&self, item_id: Uuid) -> impl Future<Output = PgResult<bool>> + Send;
}

impl WishlistItemRepository for PgClient {
    async fn create_wishlist_item(&self, new_item: NewWishlistItem) -> PgResult<WishlistItem> {
        let mut conn = self.get_connection().await?;

        use schema::wishlist_items;

        let item = diesel::insert_into(wishlist_items::table)
            .values(&new_item)
            .returning(WishlistItem::as_returning())
            .get_result(&mut *conn)
            .await
            .map_err(PgError::from)?;

        tracing::debug!(target: TRACING_TARGET_QUERY, item_id = %item.id, "Wishlist item created");
        Ok(item)
    }

    async fn find_wishlist_item_by_id(&self, item_id: Uuid) -> PgResult<Option<WishlistItem>> {
        let mut conn = self.get_connection().await?;

        use schema::wishlist_items::{self, dsl};

        let item = wishlist_items::table
            .filter(dsl::id.eq(item_id))
            .select(WishlistItem::as_select())
            .first(&mut *conn)
            .await
            .optional()
            .map_err(PgError::from)?;

        Ok(item)
    }

    async fn list_wishlist_items(
        &self,
        category: Option<WishlistCategory>,
    ) -> PgResult<Vec<WishlistItem>> {
        let mut conn = self.get_connection().await?;

        use schema::wishlist_items::{self, dsl};

        let mut query = wishlist_items::table
            .order((dsl::created_at.asc(), dsl::id.asc()))
            .select(WishlistItem::as_select())
            .into_boxed();

        if let Some(category) = category {
            query = query.filter(dsl::category.eq(category));
        }

        let items = query.load(&mut *conn).await.map_err(PgError::from)?;
        Ok(items)
    }

    async fn delete_wishlist_item(&self, item_id: Uuid) -> PgResult<bool> {
        let mut conn = self.get_connection().await?;

        use schema::wishlist_items::{self, dsl};

        let deleted = diesel::delete(wishlist_items::table.filter(dsl::id.eq(item_id)))
            .execute(&mut *conn)
            .await
            .map_err(PgError::from)?;

        Ok(deleted > 0)
    }
}
