//! Fleet-wide wishlist statistics.

use wishlist_postgres::model::WishlistItem;
use wishlist_postgres::types::constants::item::RECENT_ITEMS_LIMIT;

use super::aggregate::{VoteIndex, VoteTally};

/// Statistics over every wishlist item.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WishlistStats {
    pub total_items: usize,
    /// Items with `high` priority; `critical` items are not included.
    pub high_priority: usize,
    /// Items submitted by the requesting user.
    pub your_submissions: usize,
    /// Sum of estimated costs, counting unknown costs as zero.
    pub total_budget: f64,
    /// Item with the highest score (upvotes minus downvotes); ties go to
    /// the earliest created.
    pub most_voted_item: Option<(WishlistItem, VoteTally)>,
    /// The most recently created items, newest first.
    pub recent_items: Vec<WishlistItem>,
}

/// Computes statistics over `items`, which must be in creation order.
pub fn compute_stats(items: &[WishlistItem], votes: &VoteIndex, user_id: &str) -> WishlistStats {
    let mut stats = WishlistStats {
        total_items: items.len(),
        ..WishlistStats::default()
    };

    for item in items {
        if item.priority.is_high() {
            stats.high_priority += 1;
        }
        if item.is_submitted_by(user_id) {
            stats.your_submissions += 1;
        }

        stats.total_budget += item.cost_or_zero();

        let tally = votes.tally(item.id);
        let replaces = match &stats.most_voted_item {
            None => true,
            Some((_, best)) => tally.score() > best.score(),
        };
        if replaces {
            stats.most_voted_item = Some((item.clone(), tally));
        }
    }

    let mut recent: Vec<&WishlistItem> = items.iter().collect();
    recent.sort_by_key(|item| std::cmp::Reverse(item.created_at()));
    stats.recent_items = recent
        .into_iter()
        .take(RECENT_ITEMS_LIMIT)
        .cloned()
        .collect();

    stats
}
