//! Wishlist statistics response types.

use serde::{Deserialize, Serialize};
use wishlist_postgres::model::WishlistItem;

use super::ItemSummary;
use crate::service::wishlist::{VoteTally, WishlistStats};

/// The item with the highest score.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostVotedItem {
    #[serde(flatten)]
    pub item: ItemSummary,
    pub upvotes: usize,
    pub downvotes: usize,
    pub score: i64,
}

impl MostVotedItem {
    fn from_model((item, tally): (WishlistItem, VoteTally)) -> Self {
        Self {
            item: ItemSummary::from_model(item),
            upvotes: tally.upvotes,
            downvotes: tally.downvotes,
            score: tally.score(),
        }
    }
}

/// Statistics over every wishlist item.
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_items: usize,
    pub high_priority: usize,
    pub your_submissions: usize,
    pub total_budget: f64,
    pub most_voted_item: Option<MostVotedItem>,
    pub recent_items: Vec<ItemSummary>,
}

impl Stats {
    pub fn from_model(stats: WishlistStats) -> Self {
        Self {
            total_items: stats.total_items,
            high_priority: stats.high_priority,
            your_submissions: stats.your_submissions,
            total_budget: stats.total_budget,
            most_voted_item: stats.most_voted_item.map(MostVotedItem::from_model),
            recent_items: stats
                .recent_items
                .into_iter()
                .map(ItemSummary::from_model)
                .collect(),
        }
    }
}
