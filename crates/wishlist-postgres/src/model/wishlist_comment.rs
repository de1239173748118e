//! Wishlist comment model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::wishlist_comments;

/// Discussion comment attached to a wishlist item.
///
/// Threads are at most two levels deep: a root comment (no parent) and its
/// direct replies.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = wishlist_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WishlistComment {
    /// Unique comment identifier.
    pub id: Uuid,
    /// Item the comment belongs to.
    pub item_id: Uuid,
    /// Root comment this reply belongs to (NULL for root comments).
    pub parent_id: Option<Uuid>,
    /// Identity-provider id of the author.
    pub user_id: String,
    /// Display name of the author at posting time.
    pub user_name: String,
    /// Comment text.
    pub content: String,
    /// Timestamp when the comment was created.
    pub created_at: Timestamp,
}

/// Data for creating a new comment.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = wishlist_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewWishlistComment {
    pub item_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
}

impl WishlistComment {
    /// Returns the creation timestamp as a [`jiff::Timestamp`].
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }

    /// Returns whether this is a root comment.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns whether this comment is a reply to another comment.
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Returns whether the given user authored this comment.
    #[inline]
    pub fn is_authored_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

impl NewWishlistComment {
    /// Creates a new root comment on an item.
    pub fn for_item(
        item_id: Uuid,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            item_id,
            parent_id: None,
            user_id: user_id.into(),
            user_name: user_name.into(),
            content: content.into(),
        }
    }

    /// Sets the parent comment, turning this into a reply.
    pub fn with_parent(mut self, parent_id: Uuid) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}
