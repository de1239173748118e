//! Wishlist items, votes and threaded comments.
//!
//! [`WishlistService`] validates and applies mutations against the record
//! store, and assembles read views by recomputing vote tallies, comment
//! threads and statistics from freshly fetched rows.

mod aggregate;
mod error;
mod query;
mod stats;
mod thread;

use uuid::Uuid;
use wishlist_postgres::model::{NewWishlistComment, NewWishlistItem, WishlistItem};
use wishlist_postgres::types::VoteType;
use wishlist_postgres::types::constants::comment::MAX_CONTENT_LENGTH;
use wishlist_postgres::types::constants::item::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH};

pub use self::aggregate::{VoteIndex, VoteTally, aggregate};
pub use self::error::{WishlistError, WishlistResult};
pub use self::query::{ItemQuery, ItemRefinement, ItemWithMeta, SortBy, sort_items};
pub use self::stats::{WishlistStats, compute_stats};
pub use self::thread::{CommentNode, CommentPlacement, thread_comments};
use crate::TRACING_TARGET_WISHLIST;
use crate::service::revision::ViewRevision;
use crate::service::store::{SharedStore, VoteTarget};

/// An item together with its comment thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDetail {
    pub item: ItemWithMeta,
    pub comments: Vec<CommentNode>,
}

/// Mutation and query entry points of the wishlist.
#[derive(Clone)]
pub struct WishlistService {
    store: SharedStore,
    revision: ViewRevision,
}

impl WishlistService {
    /// Creates a service over `store` that bumps `revision` on every change.
    pub fn new(store: SharedStore, revision: ViewRevision) -> Self {
        Self { store, revision }
    }

    /// Lists items with their tallies and comment counts.
    ///
    /// The category filter runs in the store, then the sort, then the
    /// search and priority refinement without re-sorting.
    #[tracing::instrument(skip_all, fields(user_id = %user_id, sort_by = %query.sort_by))]
    pub async fn list_items(
        &self,
        user_id: &str,
        query: &ItemQuery,
    ) -> WishlistResult<Vec<ItemWithMeta>> {
        const FAILED: &str = "Failed to load wishlist items";

        let items = self
            .store
            .list_items(query.category)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?;

        let item_ids: Vec<Uuid> = items.iter().map(|item| item.id).collect();
        let (votes, comments) = futures::try_join!(
            self.store.list_item_votes(&item_ids),
            self.store.list_comments(&item_ids),
        )
        .map_err(|e| WishlistError::store(FAILED, e))?;

        let votes = VoteIndex::new(&votes, user_id);
        let mut listed: Vec<ItemWithMeta> = items
            .into_iter()
            .map(|item| ItemWithMeta {
                tally: votes.tally(item.id),
                comment_count: comments.iter().filter(|c| c.item_id == item.id).count(),
                item,
            })
            .collect();

        sort_items(&mut listed, query.sort_by);
        query.refinement.apply(&mut listed);

        tracing::debug!(
            target: TRACING_TARGET_WISHLIST,
            item_count = listed.len(),
            "Listed wishlist items"
        );

        Ok(listed)
    }

    /// Adds an item submitted by the user named in `new_item`.
    #[tracing::instrument(skip_all, fields(user_id = %new_item.submitted_by))]
    pub async fn add_item(&self, new_item: NewWishlistItem) -> WishlistResult<WishlistItem> {
        validate_new_item(&new_item)?;

        let item = self
            .store
            .insert_item(new_item)
            .await
            .map_err(|e| WishlistError::store("Failed to add item", e))?;

        self.revision.bump();
        tracing::info!(
            target: TRACING_TARGET_WISHLIST,
            item_id = %item.id,
            category = %item.category,
            priority = %item.priority,
            "Wishlist item added"
        );

        Ok(item)
    }

    /// Deletes an item owned by `user_id` together with its votes and comments.
    #[tracing::instrument(skip_all, fields(item_id = %item_id, user_id = %user_id))]
    pub async fn delete_item(&self, item_id: Uuid, user_id: &str) -> WishlistResult<()> {
        const FAILED: &str = "Failed to delete item";

        let item = self
            .store
            .find_item(item_id)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?
            .ok_or_else(|| WishlistError::NotFound("Item not found".into()))?;

        if !item.is_submitted_by(user_id) {
            tracing::warn!(
                target: TRACING_TARGET_WISHLIST,
                owner = %item.submitted_by,
                "Rejected deletion of another user's item"
            );
            return Err(WishlistError::Forbidden(
                "You can only delete your own items".into(),
            ));
        }

        self.store
            .delete_item(item_id)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?;

        self.revision.bump();
        tracing::info!(target: TRACING_TARGET_WISHLIST, "Wishlist item deleted");
        Ok(())
    }

    /// Toggles the user's vote on an item or a comment.
    ///
    /// Returns the tally of the target re-read after the change.
    #[tracing::instrument(skip_all, fields(target = target.resource(), target_id = %target.id(), user_id = %user_id, vote_type = %requested))]
    pub async fn toggle_vote(
        &self,
        target: VoteTarget,
        user_id: &str,
        requested: VoteType,
    ) -> WishlistResult<VoteTally> {
        const FAILED: &str = "Failed to toggle vote";
        let store_error = |e| WishlistError::store(FAILED, e);

        let exists = match target {
            VoteTarget::Item(id) => self.store.find_item(id).await.map(|i| i.is_some()),
            VoteTarget::Comment(id) => self.store.find_comment(id).await.map(|c| c.is_some()),
        }
        .map_err(store_error)?;

        if !exists {
            let message = match target {
                VoteTarget::Item(_) => "Item not found",
                VoteTarget::Comment(_) => "Comment not found",
            };
            return Err(WishlistError::NotFound(message.into()));
        }

        let votes = self
            .store
            .toggle_vote(target, user_id, requested)
            .await
            .map_err(store_error)?;

        self.revision.bump();
        let tally = aggregate(&votes, target.id(), user_id);

        tracing::debug!(
            target: TRACING_TARGET_WISHLIST,
            user_vote = ?tally.user_vote,
            upvotes = tally.upvotes,
            downvotes = tally.downvotes,
            "Vote toggled"
        );

        Ok(tally)
    }

    /// Toggles the user's vote on an item.
    pub async fn toggle_item_vote(
        &self,
        item_id: Uuid,
        user_id: &str,
        vote_type: VoteType,
    ) -> WishlistResult<VoteTally> {
        self.toggle_vote(VoteTarget::Item(item_id), user_id, vote_type)
            .await
    }

    /// Toggles the user's vote on a comment.
    pub async fn toggle_comment_vote(
        &self,
        comment_id: Uuid,
        user_id: &str,
        vote_type: VoteType,
    ) -> WishlistResult<VoteTally> {
        self.toggle_vote(VoteTarget::Comment(comment_id), user_id, vote_type)
            .await
    }

    /// Adds a root comment or a reply to a root comment.
    #[tracing::instrument(skip_all, fields(item_id = %item_id, user_id = %user_id, reply = placement.parent_id().is_some()))]
    pub async fn add_comment(
        &self,
        item_id: Uuid,
        user_id: &str,
        user_name: &str,
        content: &str,
        placement: CommentPlacement,
    ) -> WishlistResult<()> {
        const FAILED: &str = "Failed to add comment";

        self.store
            .find_item(item_id)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?
            .ok_or_else(|| WishlistError::NotFound("Item not found".into()))?;

        let content = content.trim();
        if content.is_empty() {
            return Err(WishlistError::Validation(
                "Comment cannot be empty".into(),
            ));
        }
        if content.chars().count() > MAX_CONTENT_LENGTH {
            return Err(WishlistError::Validation(
                format!("Comment must be at most {MAX_CONTENT_LENGTH} characters").into(),
            ));
        }

        let mut new_comment = NewWishlistComment::for_item(item_id, user_id, user_name, content);

        if let CommentPlacement::Reply { parent_id } = placement {
            let parent = self
                .store
                .find_comment(parent_id)
                .await
                .map_err(|e| WishlistError::store(FAILED, e))?
                .ok_or_else(|| WishlistError::NotFound("Parent comment not found".into()))?;

            if parent.is_reply() {
                return Err(WishlistError::Validation("Cannot reply to a reply".into()));
            }
            if parent.item_id != item_id {
                return Err(WishlistError::Validation(
                    "Parent comment belongs to a different item".into(),
                ));
            }

            new_comment = new_comment.with_parent(parent_id);
        }

        let comment = self
            .store
            .insert_comment(new_comment)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?;

        self.revision.bump();
        tracing::info!(
            target: TRACING_TARGET_WISHLIST,
            comment_id = %comment.id,
            "Comment added"
        );

        Ok(())
    }

    /// Deletes a comment authored by `user_id` together with its replies.
    #[tracing::instrument(skip_all, fields(comment_id = %comment_id, user_id = %user_id))]
    pub async fn delete_comment(&self, comment_id: Uuid, user_id: &str) -> WishlistResult<()> {
        const FAILED: &str = "Failed to delete comment";

        let comment = self
            .store
            .find_comment(comment_id)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?
            .ok_or_else(|| WishlistError::NotFound("Comment not found".into()))?;

        if !comment.is_authored_by(user_id) {
            return Err(WishlistError::Forbidden(
                "You can only delete your own comments".into(),
            ));
        }

        let deleted = self
            .store
            .delete_comment_thread(comment_id)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?;

        self.revision.bump();
        tracing::info!(
            target: TRACING_TARGET_WISHLIST,
            deleted,
            "Comment thread deleted"
        );

        Ok(())
    }

    /// Returns an item with its comment thread, or `None` if it does not exist.
    #[tracing::instrument(skip_all, fields(item_id = %item_id, user_id = %user_id))]
    pub async fn item_detail(
        &self,
        item_id: Uuid,
        user_id: &str,
    ) -> WishlistResult<Option<ItemDetail>> {
        const FAILED: &str = "Failed to load wishlist item";
        let store_error = |e| WishlistError::store(FAILED, e);

        let Some(item) = self.store.find_item(item_id).await.map_err(store_error)? else {
            return Ok(None);
        };

        let item_ids = [item_id];
        let (item_votes, comments) = futures::try_join!(
            self.store.list_item_votes(&item_ids),
            self.store.list_comments(&item_ids),
        )
        .map_err(store_error)?;

        let comment_ids: Vec<Uuid> = comments.iter().map(|c| c.id).collect();
        let comment_votes = self
            .store
            .list_comment_votes(&comment_ids)
            .await
            .map_err(store_error)?;

        let comment_count = comments.len();
        let comments = thread_comments(comments, &VoteIndex::new(&comment_votes, user_id));
        let item = ItemWithMeta {
            tally: aggregate(&item_votes, item_id, user_id),
            comment_count,
            item,
        };

        Ok(Some(ItemDetail { item, comments }))
    }

    /// Computes statistics over all items.
    #[tracing::instrument(skip_all, fields(user_id = %user_id))]
    pub async fn stats(&self, user_id: &str) -> WishlistResult<WishlistStats> {
        const FAILED: &str = "Failed to load wishlist statistics";

        let items = self
            .store
            .list_items(None)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?;

        let item_ids: Vec<Uuid> = items.iter().map(|item| item.id).collect();
        let votes = self
            .store
            .list_item_votes(&item_ids)
            .await
            .map_err(|e| WishlistError::store(FAILED, e))?;

        Ok(compute_stats(&items, &VoteIndex::new(&votes, user_id), user_id))
    }
}

fn validate_new_item(new_item: &NewWishlistItem) -> WishlistResult<()> {
    let name = new_item.name.trim();
    if name.is_empty() || name.chars().count() > MAX_NAME_LENGTH {
        return Err(WishlistError::Validation(
            format!("Name must be between 1 and {MAX_NAME_LENGTH} characters").into(),
        ));
    }

    let description = new_item.description.trim();
    if description.is_empty() || description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(WishlistError::Validation(
            format!("Description must be between 1 and {MAX_DESCRIPTION_LENGTH} characters")
                .into(),
        ));
    }

    if let Some(cost) = new_item.estimated_cost
        && !(cost.is_finite() && cost >= 0.0)
    {
        return Err(WishlistError::Validation(
            "Estimated cost must be a non-negative number".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wishlist_postgres::types::{WishlistCategory, WishlistPriority};

    use super::*;
    use crate::service::store::{MemoryStore, WishlistStore};

    struct Fixture {
        store: MemoryStore,
        revision: ViewRevision,
        service: WishlistService,
    }

    fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let revision = ViewRevision::new();
        let service = WishlistService::new(Arc::new(store.clone()), revision.clone());
        Fixture {
            store,
            revision,
            service,
        }
    }

    fn new_item(owner: &str, name: &str, priority: WishlistPriority) -> NewWishlistItem {
        NewWishlistItem::for_user(
            owner,
            owner,
            name,
            "something we need",
            WishlistCategory::Hardware,
            priority,
        )
    }

    #[tokio::test]
    async fn toggling_twice_leaves_no_vote() -> anyhow::Result<()> {
        let f = fixture();
        let item = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;

        let tally = f.service.toggle_item_vote(item.id, "bob", VoteType::Up).await?;
        assert_eq!((tally.upvotes, tally.downvotes), (1, 0));
        assert_eq!(tally.user_vote, Some(VoteType::Up));

        let tally = f.service.toggle_item_vote(item.id, "bob", VoteType::Up).await?;
        assert_eq!((tally.upvotes, tally.downvotes), (0, 0));
        assert_eq!(tally.user_vote, None);
        assert!(f.store.list_item_votes(&[item.id]).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn switching_polarity_updates_in_place() -> anyhow::Result<()> {
        let f = fixture();
        let item = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;

        f.service.toggle_item_vote(item.id, "bob", VoteType::Up).await?;
        let tally = f
            .service
            .toggle_item_vote(item.id, "bob", VoteType::Down)
            .await?;

        assert_eq!((tally.upvotes, tally.downvotes), (0, 1));
        assert_eq!(tally.user_vote, Some(VoteType::Down));

        let votes = f.store.list_item_votes(&[item.id]).await?;
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].vote_type, VoteType::Down);
        Ok(())
    }

    #[tokio::test]
    async fn voting_on_missing_target_is_not_found() {
        let f = fixture();
        let error = f
            .service
            .toggle_comment_vote(Uuid::new_v4(), "bob", VoteType::Up)
            .await
            .unwrap_err();

        assert!(matches!(error, WishlistError::NotFound(_)));
        assert_eq!(error.message(), "Comment not found");
        assert_eq!(f.revision.current(), 0);
    }

    #[tokio::test]
    async fn store_failure_while_voting() -> anyhow::Result<()> {
        let f = fixture();
        let item = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;

        f.store.set_unavailable(true);
        let error = f
            .service
            .toggle_item_vote(item.id, "bob", VoteType::Up)
            .await
            .unwrap_err();

        assert!(matches!(error, WishlistError::Store { .. }));
        assert_eq!(error.message(), "Failed to toggle vote");
        Ok(())
    }

    #[tokio::test]
    async fn failed_vote_reread_keeps_votes_and_revision() -> anyhow::Result<()> {
        let f = fixture();
        let item = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;
        let after_insert = f.revision.current();

        f.store.set_vote_reads_unavailable(true);
        let error = f
            .service
            .toggle_item_vote(item.id, "bob", VoteType::Up)
            .await
            .unwrap_err();
        f.store.set_vote_reads_unavailable(false);

        assert!(matches!(error, WishlistError::Store { .. }));
        assert!(f.store.list_item_votes(&[item.id]).await?.is_empty());
        assert_eq!(f.revision.current(), after_insert);
        Ok(())
    }

    #[tokio::test]
    async fn reply_to_reply_is_rejected_without_insert() -> anyhow::Result<()> {
        let f = fixture();
        let item = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;

        f.service
            .add_comment(item.id, "bob", "Bob", "root", CommentPlacement::Root)
            .await?;
        let root = f.store.list_comments(&[item.id]).await?[0].clone();
        f.service
            .add_comment(
                item.id,
                "carol",
                "Carol",
                "reply",
                CommentPlacement::Reply { parent_id: root.id },
            )
            .await?;
        let reply = f.store.list_comments(&[item.id]).await?[1].clone();

        let error = f
            .service
            .add_comment(
                item.id,
                "dave",
                "Dave",
                "nested",
                CommentPlacement::Reply {
                    parent_id: reply.id,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(error.message(), "Cannot reply to a reply");
        assert_eq!(f.store.list_comments(&[item.id]).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn reply_must_stay_on_the_same_item() -> anyhow::Result<()> {
        let f = fixture();
        let first = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;
        let second = f
            .service
            .add_item(new_item("alice", "switch", WishlistPriority::Low))
            .await?;

        f.service
            .add_comment(first.id, "bob", "Bob", "root", CommentPlacement::Root)
            .await?;
        let root = f.store.list_comments(&[first.id]).await?[0].clone();

        let error = f
            .service
            .add_comment(
                second.id,
                "bob",
                "Bob",
                "misplaced",
                CommentPlacement::Reply { parent_id: root.id },
            )
            .await
            .unwrap_err();
        assert_eq!(error.message(), "Parent comment belongs to a different item");

        let error = f
            .service
            .add_comment(
                second.id,
                "bob",
                "Bob",
                "lost",
                CommentPlacement::Reply {
                    parent_id: Uuid::new_v4(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(error.message(), "Parent comment not found");
        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_root_removes_its_replies() -> anyhow::Result<()> {
        let f = fixture();
        let item = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;

        f.service
            .add_comment(item.id, "bob", "Bob", "root", CommentPlacement::Root)
            .await?;
        let root = f.store.list_comments(&[item.id]).await?[0].clone();
        for n in 0..3 {
            f.service
                .add_comment(
                    item.id,
                    "carol",
                    "Carol",
                    &format!("reply {n}"),
                    CommentPlacement::Reply { parent_id: root.id },
                )
                .await?;
        }

        let error = f.service.delete_comment(root.id, "carol").await.unwrap_err();
        assert!(matches!(error, WishlistError::Forbidden(_)));

        f.service.delete_comment(root.id, "bob").await?;
        assert!(f.store.list_comments(&[item.id]).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn only_the_submitter_deletes_an_item() -> anyhow::Result<()> {
        let f = fixture();
        let item = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;

        let error = f.service.delete_item(item.id, "bob").await.unwrap_err();
        assert_eq!(error.message(), "You can only delete your own items");
        assert!(f.store.find_item(item.id).await?.is_some());

        f.service.delete_item(item.id, "alice").await?;
        assert!(f.store.find_item(item.id).await?.is_none());

        let error = f.service.delete_item(item.id, "alice").await.unwrap_err();
        assert_eq!(error.message(), "Item not found");
        Ok(())
    }

    #[tokio::test]
    async fn invalid_items_are_rejected_before_insert() {
        let f = fixture();
        let blank = new_item("alice", "   ", WishlistPriority::Low);
        let negative =
            new_item("alice", "rack", WishlistPriority::Low).with_estimated_cost(Some(-1.0));

        for candidate in [blank, negative] {
            let error = f.service.add_item(candidate).await.unwrap_err();
            assert!(matches!(error, WishlistError::Validation(_)));
        }
        assert_eq!(f.revision.current(), 0);
    }

    #[tokio::test]
    async fn listing_sorts_and_refines() -> anyhow::Result<()> {
        let f = fixture();
        let a = f
            .service
            .add_item(new_item("alice", "Rack server", WishlistPriority::Low))
            .await?;
        let b = f
            .service
            .add_item(new_item("alice", "Core switch", WishlistPriority::Critical))
            .await?;
        f.service
            .add_item(new_item("alice", "Rack rails", WishlistPriority::Medium))
            .await?;

        f.service.toggle_item_vote(a.id, "bob", VoteType::Up).await?;
        f.service.toggle_item_vote(b.id, "bob", VoteType::Down).await?;
        f.service
            .add_comment(a.id, "bob", "Bob", "yes please", CommentPlacement::Root)
            .await?;

        let by_score = f.service.list_items("bob", &ItemQuery::default()).await?;
        let names: Vec<_> = by_score.iter().map(|i| i.item.name.as_str()).collect();
        assert_eq!(names, ["Rack server", "Rack rails", "Core switch"]);
        assert_eq!(by_score[0].comment_count, 1);
        assert_eq!(by_score[0].tally.user_vote, Some(VoteType::Up));

        let query = ItemQuery::new(None, SortBy::Priority).with_search(Some("rack".into()));
        let refined = f.service.list_items("bob", &query).await?;
        let names: Vec<_> = refined.iter().map(|i| i.item.name.as_str()).collect();
        assert_eq!(names, ["Rack rails", "Rack server"]);
        Ok(())
    }

    #[tokio::test]
    async fn item_detail_threads_comments() -> anyhow::Result<()> {
        let f = fixture();
        let item = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;
        f.service
            .add_comment(item.id, "bob", "Bob", "root", CommentPlacement::Root)
            .await?;
        let root = f.store.list_comments(&[item.id]).await?[0].clone();
        f.service
            .add_comment(
                item.id,
                "alice",
                "Alice",
                "reply",
                CommentPlacement::Reply { parent_id: root.id },
            )
            .await?;
        f.service
            .toggle_comment_vote(root.id, "alice", VoteType::Up)
            .await?;

        let detail = f.service.item_detail(item.id, "alice").await?.unwrap();
        assert_eq!(detail.item.comment_count, 2);
        assert_eq!(detail.comments.len(), 1);
        assert_eq!(detail.comments[0].replies.len(), 1);
        assert_eq!(detail.comments[0].tally.user_vote, Some(VoteType::Up));

        assert!(f.service.item_detail(Uuid::new_v4(), "alice").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn mutations_bump_the_revision() -> anyhow::Result<()> {
        let f = fixture();
        let item = f
            .service
            .add_item(new_item("alice", "rack", WishlistPriority::High))
            .await?;
        f.service.toggle_item_vote(item.id, "bob", VoteType::Up).await?;
        f.service
            .add_comment(item.id, "bob", "Bob", "hi", CommentPlacement::Root)
            .await?;
        f.service.delete_item(item.id, "alice").await?;

        assert_eq!(f.revision.current(), 4);

        let stats = f.service.stats("alice").await?;
        assert_eq!(stats.total_items, 0);
        Ok(())
    }
}
