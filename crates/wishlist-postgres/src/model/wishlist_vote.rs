//! Vote models for wishlist items and comments.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::{wishlist_comment_votes, wishlist_votes};
use crate::types::VoteType;

/// A single user's vote on a wishlist item.
///
/// At most one row exists per `(item_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = wishlist_votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemVote {
    pub id: Uuid,
    pub item_id: Uuid,
    pub user_id: String,
    pub vote_type: VoteType,
    pub created_at: Timestamp,
}

/// Data for recording a new item vote.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = wishlist_votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewItemVote {
    pub item_id: Uuid,
    pub user_id: String,
    pub vote_type: VoteType,
}

/// A single user's vote on a comment.
///
/// At most one row exists per `(comment_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = wishlist_comment_votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentVote {
    pub id: Uuid,
    pub comment_id: Uuid,
    pub user_id: String,
    pub vote_type: VoteType,
    pub created_at: Timestamp,
}

/// Data for recording a new comment vote.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = wishlist_comment_votes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewCommentVote {
    pub comment_id: Uuid,
    pub user_id: String,
    pub vote_type: VoteType,
}

impl NewItemVote {
    /// Creates a new vote on an item.
    pub fn for_item(item_id: Uuid, user_id: impl Into<String>, vote_type: VoteType) -> Self {
        Self {
            item_id,
            user_id: user_id.into(),
            vote_type,
        }
    }
}

impl NewCommentVote {
    /// Creates a new vote on a comment.
    pub fn for_comment(comment_id: Uuid, user_id: impl Into<String>, vote_type: VoteType) -> Self {
        Self {
            comment_id,
            user_id: user_id.into(),
            vote_type,
        }
    }
}
