//! Comment response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wishlist_postgres::types::VoteType;

use crate::service::wishlist::CommentNode;

/// A comment with its votes and, for root comments, its replies.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub item_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub user_id: String,
    pub user_name: String,
    pub content: String,
    pub created_at: Timestamp,
    pub upvotes: usize,
    pub downvotes: usize,
    pub user_vote: Option<VoteType>,
    pub replies: Comments,
}

/// Response type for a comment thread.
pub type Comments = Vec<Comment>;

impl Comment {
    pub fn from_model(node: CommentNode) -> Self {
        let CommentNode {
            comment,
            tally,
            replies,
        } = node;

        Self {
            created_at: comment.created_at(),
            id: comment.id,
            item_id: comment.item_id,
            parent_id: comment.parent_id,
            user_id: comment.user_id,
            user_name: comment.user_name,
            content: comment.content,
            upvotes: tally.upvotes,
            downvotes: tally.downvotes,
            user_vote: tally.user_vote,
            replies: Self::from_models(replies),
        }
    }

    pub fn from_models(nodes: Vec<CommentNode>) -> Comments {
        nodes.into_iter().map(Self::from_model).collect()
    }
}
