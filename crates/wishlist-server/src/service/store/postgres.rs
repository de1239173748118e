//! [`WishlistStore`] backed by the Postgres repositories.

use async_trait::async_trait;
use uuid::Uuid;
use wishlist_postgres::model::{
    NewUserProfile, NewWishlistComment, NewWishlistItem, UpdateUserProfile, UserProfile,
    WishlistComment, WishlistItem,
};
use wishlist_postgres::query::{
    CommentVoteRepository, ItemVoteRepository, UserProfileRepository, WishlistCommentRepository,
    WishlistItemRepository,
};
use wishlist_postgres::types::{VoteType, WishlistCategory};
use wishlist_postgres::{PgClient, PgResult};

use super::{VoteRow, VoteTarget, WishlistStore};

#[async_trait]
impl WishlistStore for PgClient {
    async fn ping(&self) -> PgResult<()> {
        PgClient::ping(self).await
    }

    async fn insert_item(&self, new_item: NewWishlistItem) -> PgResult<WishlistItem> {
        self.create_wishlist_item(new_item).await
    }

    async fn find_item(&self, item_id: Uuid) -> PgResult<Option<WishlistItem>> {
        self.find_wishlist_item_by_id(item_id).await
    }

    async fn list_items(&self, category: Option<WishlistCategory>) -> PgResult<Vec<WishlistItem>> {
        self.list_wishlist_items(category).await
    }

    async fn delete_item(&self, item_id: Uuid) -> PgResult<bool> {
        self.delete_wishlist_item(item_id).await
    }

    async fn list_item_votes(&self, item_ids: &[Uuid]) -> PgResult<Vec<VoteRow>> {
        let votes = ItemVoteRepository::list_item_votes(self, item_ids).await?;
        Ok(votes.into_iter().map(VoteRow::from).collect())
    }

    async fn list_comment_votes(&self, comment_ids: &[Uuid]) -> PgResult<Vec<VoteRow>> {
        let votes = CommentVoteRepository::list_comment_votes(self, comment_ids).await?;
        Ok(votes.into_iter().map(VoteRow::from).collect())
    }

    async fn toggle_vote(
        &self,
        target: VoteTarget,
        user_id: &str,
        requested: VoteType,
    ) -> PgResult<Vec<VoteRow>> {
        match target {
            VoteTarget::Item(item_id) => {
                let votes = self.toggle_item_vote(item_id, user_id, requested).await?;
                Ok(votes.into_iter().map(VoteRow::from).collect())
            }
            VoteTarget::Comment(comment_id) => {
                let votes = self
                    .toggle_comment_vote(comment_id, user_id, requested)
                    .await?;
                Ok(votes.into_iter().map(VoteRow::from).collect())
            }
        }
    }

    async fn insert_comment(&self, new_comment: NewWishlistComment) -> PgResult<WishlistComment> {
        self.create_wishlist_comment(new_comment).await
    }

    async fn find_comment(&self, comment_id: Uuid) -> PgResult<Option<WishlistComment>> {
        self.find_wishlist_comment_by_id(comment_id).await
    }

    async fn list_comments(&self, item_ids: &[Uuid]) -> PgResult<Vec<WishlistComment>> {
        self.list_wishlist_comments(item_ids).await
    }

    async fn delete_comment_thread(&self, comment_id: Uuid) -> PgResult<usize> {
        self.delete_wishlist_comment_thread(comment_id).await
    }

    async fn find_profile(&self, user_id: &str) -> PgResult<Option<UserProfile>> {
        self.find_user_profile(user_id).await
    }

    async fn insert_profile(&self, new_profile: NewUserProfile) -> PgResult<UserProfile> {
        self.create_user_profile(new_profile).await
    }

    async fn update_profile(
        &self,
        user_id: &str,
        changes: UpdateUserProfile,
    ) -> PgResult<Option<UserProfile>> {
        self.update_user_profile(user_id, changes).await
    }
}
