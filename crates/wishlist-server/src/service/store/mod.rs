//! Record store seam consumed by the wishlist and profile services.
//!
//! [`WishlistStore`] is object safe so the application state can hold either
//! the Postgres client or the in-memory [`MemoryStore`] behind one pointer.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;
use wishlist_postgres::PgResult;
use wishlist_postgres::model::{
    CommentVote, ItemVote, NewUserProfile, NewWishlistComment, NewWishlistItem, UpdateUserProfile,
    UserProfile, WishlistComment, WishlistItem,
};
use wishlist_postgres::types::{VoteType, WishlistCategory};

pub use self::memory::MemoryStore;

/// Shared handle to a record store.
pub type SharedStore = Arc<dyn WishlistStore>;

/// The item or comment a vote applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteTarget {
    /// A vote on a wishlist item.
    Item(Uuid),
    /// A vote on a comment.
    Comment(Uuid),
}

impl VoteTarget {
    /// Returns the id of the voted-on record.
    #[inline]
    pub fn id(self) -> Uuid {
        match self {
            Self::Item(id) | Self::Comment(id) => id,
        }
    }

    /// Returns the name of the voted-on collection.
    #[inline]
    pub fn resource(self) -> &'static str {
        match self {
            Self::Item(_) => "item",
            Self::Comment(_) => "comment",
        }
    }
}

/// Vote row shared by item and comment votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRow {
    pub id: Uuid,
    /// Item id or comment id, depending on the collection.
    pub target_id: Uuid,
    pub user_id: String,
    pub vote_type: VoteType,
}

impl From<ItemVote> for VoteRow {
    fn from(vote: ItemVote) -> Self {
        Self {
            id: vote.id,
            target_id: vote.item_id,
            user_id: vote.user_id,
            vote_type: vote.vote_type,
        }
    }
}

impl From<CommentVote> for VoteRow {
    fn from(vote: CommentVote) -> Self {
        Self {
            id: vote.id,
            target_id: vote.comment_id,
            user_id: vote.user_id,
            vote_type: vote.vote_type,
        }
    }
}

/// Persistence capability for items, votes, comments and profiles.
///
/// Implementations must enforce one vote row per `(target, user)`, cascade
/// item deletion to votes, comments and comment votes, and cascade comment
/// deletion to comment votes.
#[async_trait]
pub trait WishlistStore: Send + Sync + 'static {
    /// Verifies that the store is reachable.
    async fn ping(&self) -> PgResult<()>;

    async fn insert_item(&self, new_item: NewWishlistItem) -> PgResult<WishlistItem>;

    async fn find_item(&self, item_id: Uuid) -> PgResult<Option<WishlistItem>>;

    /// Lists items in creation order, optionally restricted to one category.
    async fn list_items(&self, category: Option<WishlistCategory>) -> PgResult<Vec<WishlistItem>>;

    /// Deletes an item and everything attached to it.
    async fn delete_item(&self, item_id: Uuid) -> PgResult<bool>;

    /// Lists the votes of the given items.
    async fn list_item_votes(&self, item_ids: &[Uuid]) -> PgResult<Vec<VoteRow>>;

    /// Lists the votes of the given comments.
    async fn list_comment_votes(&self, comment_ids: &[Uuid]) -> PgResult<Vec<VoteRow>>;

    /// Toggles the user's vote on `target` and returns every vote row of the
    /// target after the change.
    ///
    /// The change and the re-read are one unit: if either fails, no vote is
    /// written.
    async fn toggle_vote(
        &self,
        target: VoteTarget,
        user_id: &str,
        requested: VoteType,
    ) -> PgResult<Vec<VoteRow>>;

    async fn insert_comment(&self, new_comment: NewWishlistComment) -> PgResult<WishlistComment>;

    async fn find_comment(&self, comment_id: Uuid) -> PgResult<Option<WishlistComment>>;

    /// Lists the comments of the given items in creation order.
    async fn list_comments(&self, item_ids: &[Uuid]) -> PgResult<Vec<WishlistComment>>;

    /// Atomically deletes a comment together with its direct replies.
    ///
    /// Returns the number of deleted comments.
    async fn delete_comment_thread(&self, comment_id: Uuid) -> PgResult<usize>;

    async fn find_profile(&self, user_id: &str) -> PgResult<Option<UserProfile>>;

    /// Inserts a profile unless one already exists, returning the stored row.
    async fn insert_profile(&self, new_profile: NewUserProfile) -> PgResult<UserProfile>;

    async fn update_profile(
        &self,
        user_id: &str,
        changes: UpdateUserProfile,
    ) -> PgResult<Option<UserProfile>>;
}
