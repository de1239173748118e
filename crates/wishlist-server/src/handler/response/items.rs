//! Wishlist item response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wishlist_postgres::model::WishlistItem;
use wishlist_postgres::types::{VoteType, WishlistCategory, WishlistPriority};

use super::{Comment, Comments};
use crate::service::wishlist::{ItemDetail, ItemWithMeta};

/// Stored fields of a wishlist item.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: WishlistCategory,
    pub priority: WishlistPriority,
    pub estimated_cost: Option<f64>,
    pub link: Option<String>,
    pub submitted_by: String,
    /// Submitter name as it was when the item was added.
    pub submitted_by_name: String,
    pub created_at: Timestamp,
}

impl ItemSummary {
    pub fn from_model(item: WishlistItem) -> Self {
        Self {
            created_at: item.created_at(),
            id: item.id,
            name: item.name,
            description: item.description,
            category: item.category,
            priority: item.priority,
            estimated_cost: item.estimated_cost,
            link: item.link,
            submitted_by: item.submitted_by,
            submitted_by_name: item.submitted_by_name,
        }
    }
}

/// A wishlist item with votes and comment count.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub upvotes: usize,
    pub downvotes: usize,
    pub score: i64,
    pub user_vote: Option<VoteType>,
    pub comment_count: usize,
}

/// Listing of wishlist items.
pub type Items = Vec<Item>;

impl Item {
    pub fn from_model(listed: ItemWithMeta) -> Self {
        Self {
            upvotes: listed.tally.upvotes,
            downvotes: listed.tally.downvotes,
            score: listed.score(),
            user_vote: listed.tally.user_vote,
            comment_count: listed.comment_count,
            item: ItemSummary::from_model(listed.item),
        }
    }

    pub fn from_models(listed: Vec<ItemWithMeta>) -> Items {
        listed.into_iter().map(Self::from_model).collect()
    }
}

/// A wishlist item with its comment thread.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemWithComments {
    #[serde(flatten)]
    pub item: Item,
    pub comments: Comments,
}

impl ItemWithComments {
    pub fn from_model(detail: ItemDetail) -> Self {
        Self {
            item: Item::from_model(detail.item),
            comments: Comment::from_models(detail.comments),
        }
    }
}
