//! In-memory [`WishlistStore`] for development mode and tests.
//!
//! Mirrors the constraints of the Postgres schema: one vote per target and
//! user, foreign keys on items and comments, and cascading deletes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use tokio::sync::Mutex;
use uuid::Uuid;
use wishlist_postgres::error::{DatabaseErrorKind, DieselError};
use wishlist_postgres::model::{
    NewUserProfile, NewWishlistComment, NewWishlistItem, UpdateUserProfile, UserProfile,
    WishlistComment, WishlistItem,
};
use wishlist_postgres::types::{ProfileTheme, VoteTransition, VoteType, WishlistCategory};
use wishlist_postgres::{PgError, PgResult};

use super::{VoteRow, VoteTarget, WishlistStore};

/// Record store that keeps every collection in process memory.
///
/// Cloning is cheap: all clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    unavailable: Arc<AtomicBool>,
    vote_reads_unavailable: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
struct Tables {
    items: Vec<WishlistItem>,
    item_votes: Vec<VoteRow>,
    comments: Vec<WishlistComment>,
    comment_votes: Vec<VoteRow>,
    profiles: Vec<UserProfile>,
    last_timestamp: Option<Timestamp>,
}

impl Tables {
    /// Returns a strictly increasing timestamp so creation order is total.
    fn next_timestamp(&mut self) -> Timestamp {
        let now = Timestamp::now();
        let next = match self.last_timestamp {
            Some(last) if now <= last => last + SignedDuration::from_micros(1),
            _ => now,
        };

        self.last_timestamp = Some(next);
        next
    }

    fn votes(&self, target: VoteTarget) -> &Vec<VoteRow> {
        match target {
            VoteTarget::Item(_) => &self.item_votes,
            VoteTarget::Comment(_) => &self.comment_votes,
        }
    }

    fn votes_mut(&mut self, target: VoteTarget) -> &mut Vec<VoteRow> {
        match target {
            VoteTarget::Item(_) => &mut self.item_votes,
            VoteTarget::Comment(_) => &mut self.comment_votes,
        }
    }

    fn target_exists(&self, target: VoteTarget) -> bool {
        match target {
            VoteTarget::Item(id) => self.items.iter().any(|item| item.id == id),
            VoteTarget::Comment(id) => self.comments.iter().any(|comment| comment.id == id),
        }
    }

    /// Removes the given comments and their votes, returning how many were removed.
    fn remove_comments(&mut self, comment_ids: &[Uuid]) -> usize {
        let before = self.comments.len();
        self.comments.retain(|c| !comment_ids.contains(&c.id));
        self.comment_votes
            .retain(|v| !comment_ids.contains(&v.target_id));
        before - self.comments.len()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail until switched back.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    /// Makes reading vote rows fail while leaving every other call working.
    pub fn set_vote_reads_unavailable(&self, unavailable: bool) {
        self.vote_reads_unavailable
            .store(unavailable, Ordering::Relaxed);
    }

    fn check_vote_reads(&self) -> PgResult<()> {
        if self.vote_reads_unavailable.load(Ordering::Relaxed) {
            return Err(PgError::Unexpected("vote rows are unavailable".into()));
        }

        Ok(())
    }

    /// Locks the tables, failing if the store was marked unavailable.
    async fn tables(&self) -> PgResult<tokio::sync::MutexGuard<'_, Tables>> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(PgError::Unexpected("memory store is unavailable".into()));
        }

        Ok(self.tables.lock().await)
    }
}

fn violation(kind: DatabaseErrorKind, constraint: &str) -> PgError {
    let message = format!("violates constraint \"{constraint}\"");
    PgError::Query(DieselError::DatabaseError(kind, Box::new(message)))
}

#[async_trait]
impl WishlistStore for MemoryStore {
    async fn ping(&self) -> PgResult<()> {
        self.tables().await.map(|_| ())
    }

    async fn insert_item(&self, new_item: NewWishlistItem) -> PgResult<WishlistItem> {
        let mut tables = self.tables().await?;
        let created_at = tables.next_timestamp();

        let item = WishlistItem {
            id: Uuid::new_v4(),
            name: new_item.name,
            description: new_item.description,
            category: new_item.category,
            priority: new_item.priority,
            estimated_cost: new_item.estimated_cost,
            link: new_item.link,
            submitted_by: new_item.submitted_by,
            submitted_by_name: new_item.submitted_by_name,
            created_at: created_at.into(),
        };

        tables.items.push(item.clone());
        Ok(item)
    }

    async fn find_item(&self, item_id: Uuid) -> PgResult<Option<WishlistItem>> {
        let tables = self.tables().await?;
        Ok(tables.items.iter().find(|item| item.id == item_id).cloned())
    }

    async fn list_items(&self, category: Option<WishlistCategory>) -> PgResult<Vec<WishlistItem>> {
        let tables = self.tables().await?;
        let items = tables
            .items
            .iter()
            .filter(|item| category.is_none_or(|category| item.category == category))
            .cloned()
            .collect();

        Ok(items)
    }

    async fn delete_item(&self, item_id: Uuid) -> PgResult<bool> {
        let mut tables = self.tables().await?;
        let before = tables.items.len();
        tables.items.retain(|item| item.id != item_id);
        if tables.items.len() == before {
            return Ok(false);
        }

        tables.item_votes.retain(|v| v.target_id != item_id);
        let comment_ids: Vec<Uuid> = tables
            .comments
            .iter()
            .filter(|c| c.item_id == item_id)
            .map(|c| c.id)
            .collect();
        tables.remove_comments(&comment_ids);

        Ok(true)
    }

    async fn list_item_votes(&self, item_ids: &[Uuid]) -> PgResult<Vec<VoteRow>> {
        let tables = self.tables().await?;
        self.check_vote_reads()?;
        let votes = tables
            .item_votes
            .iter()
            .filter(|v| item_ids.contains(&v.target_id))
            .cloned()
            .collect();

        Ok(votes)
    }

    async fn list_comment_votes(&self, comment_ids: &[Uuid]) -> PgResult<Vec<VoteRow>> {
        let tables = self.tables().await?;
        self.check_vote_reads()?;
        let votes = tables
            .comment_votes
            .iter()
            .filter(|v| comment_ids.contains(&v.target_id))
            .cloned()
            .collect();

        Ok(votes)
    }

    async fn toggle_vote(
        &self,
        target: VoteTarget,
        user_id: &str,
        requested: VoteType,
    ) -> PgResult<Vec<VoteRow>> {
        let mut tables = self.tables().await?;

        if !tables.target_exists(target) {
            return Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "vote target must exist",
            ));
        }

        // Changes are staged on a copy and committed only after the re-read.
        let mut staged = tables.votes(target).clone();
        let existing = staged
            .iter()
            .find(|v| v.target_id == target.id() && v.user_id == user_id)
            .map(|v| (v.id, v.vote_type));

        match VoteTransition::plan(existing, requested) {
            VoteTransition::Insert(vote_type) => staged.push(VoteRow {
                id: Uuid::new_v4(),
                target_id: target.id(),
                user_id: user_id.to_owned(),
                vote_type,
            }),
            VoteTransition::Delete { vote_id } => staged.retain(|v| v.id != vote_id),
            VoteTransition::Switch { vote_id, to } => {
                if let Some(vote) = staged.iter_mut().find(|v| v.id == vote_id) {
                    vote.vote_type = to;
                }
            }
        }

        self.check_vote_reads()?;
        let votes = staged
            .iter()
            .filter(|v| v.target_id == target.id())
            .cloned()
            .collect();

        *tables.votes_mut(target) = staged;
        Ok(votes)
    }

    async fn insert_comment(&self, new_comment: NewWishlistComment) -> PgResult<WishlistComment> {
        let mut tables = self.tables().await?;

        if !tables.items.iter().any(|item| item.id == new_comment.item_id) {
            return Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "comment item must exist",
            ));
        }

        if let Some(parent_id) = new_comment.parent_id
            && !tables.comments.iter().any(|c| c.id == parent_id)
        {
            return Err(violation(
                DatabaseErrorKind::ForeignKeyViolation,
                "parent comment must exist",
            ));
        }

        let created_at = tables.next_timestamp();
        let comment = WishlistComment {
            id: Uuid::new_v4(),
            item_id: new_comment.item_id,
            parent_id: new_comment.parent_id,
            user_id: new_comment.user_id,
            user_name: new_comment.user_name,
            content: new_comment.content,
            created_at: created_at.into(),
        };

        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, comment_id: Uuid) -> PgResult<Option<WishlistComment>> {
        let tables = self.tables().await?;
        Ok(tables.comments.iter().find(|c| c.id == comment_id).cloned())
    }

    async fn list_comments(&self, item_ids: &[Uuid]) -> PgResult<Vec<WishlistComment>> {
        let tables = self.tables().await?;
        let comments = tables
            .comments
            .iter()
            .filter(|c| item_ids.contains(&c.item_id))
            .cloned()
            .collect();

        Ok(comments)
    }

    async fn delete_comment_thread(&self, comment_id: Uuid) -> PgResult<usize> {
        let mut tables = self.tables().await?;
        let thread: Vec<Uuid> = tables
            .comments
            .iter()
            .filter(|c| c.id == comment_id || c.parent_id == Some(comment_id))
            .map(|c| c.id)
            .collect();

        Ok(tables.remove_comments(&thread))
    }

    async fn find_profile(&self, user_id: &str) -> PgResult<Option<UserProfile>> {
        let tables = self.tables().await?;
        Ok(tables.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn insert_profile(&self, new_profile: NewUserProfile) -> PgResult<UserProfile> {
        let mut tables = self.tables().await?;
        if let Some(existing) = tables.profiles.iter().find(|p| p.id == new_profile.id) {
            return Ok(existing.clone());
        }

        let now = tables.next_timestamp();
        let profile = UserProfile {
            id: new_profile.id,
            email: new_profile.email,
            display_name: None,
            first_name: new_profile.first_name,
            last_name: new_profile.last_name,
            bio: None,
            avatar_url: new_profile.avatar_url,
            theme: ProfileTheme::default(),
            email_notifications: true,
            created_at: now.into(),
            updated_at: now.into(),
        };

        tables.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        changes: UpdateUserProfile,
    ) -> PgResult<Option<UserProfile>> {
        let mut tables = self.tables().await?;
        let Some(profile) = tables.profiles.iter_mut().find(|p| p.id == user_id) else {
            return Ok(None);
        };

        if let Some(display_name) = changes.display_name {
            profile.display_name = display_name;
        }
        if let Some(first_name) = changes.first_name {
            profile.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            profile.last_name = last_name;
        }
        if let Some(bio) = changes.bio {
            profile.bio = bio;
        }
        if let Some(avatar_url) = changes.avatar_url {
            profile.avatar_url = avatar_url;
        }
        if let Some(theme) = changes.theme {
            profile.theme = theme;
        }
        if let Some(email_notifications) = changes.email_notifications {
            profile.email_notifications = email_notifications;
        }
        if let Some(updated_at) = changes.updated_at {
            profile.updated_at = updated_at;
        }

        Ok(Some(profile.clone()))
    }
}
