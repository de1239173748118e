//! Item listing: aggregation metadata, sort orders and refinement filters.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use wishlist_postgres::model::WishlistItem;
use wishlist_postgres::types::{WishlistCategory, WishlistPriority};

use super::aggregate::VoteTally;

/// Sort order of the item listing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortBy {
    /// Most recently created first.
    Newest,
    /// Least recently created first.
    Oldest,
    /// Highest score first, newer items winning ties.
    #[default]
    Score,
    /// Same order as [`SortBy::Score`].
    Votes,
    /// Critical first, then high, medium and low; ties keep their order.
    Priority,
}

/// An item with its derived vote and comment metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemWithMeta {
    pub item: WishlistItem,
    pub tally: VoteTally,
    pub comment_count: usize,
}

impl ItemWithMeta {
    #[inline]
    pub fn score(&self) -> i64 {
        self.tally.score()
    }
}

/// Sorts items in place.
///
/// Items are expected in creation order, which the priority sort preserves
/// within each priority.
pub fn sort_items(items: &mut [ItemWithMeta], sort_by: SortBy) {
    match sort_by {
        SortBy::Newest => items.sort_by_key(|i| Reverse(i.item.created_at())),
        SortBy::Oldest => items.sort_by_key(|i| i.item.created_at()),
        SortBy::Score | SortBy::Votes => {
            items.sort_by_key(|i| (Reverse(i.score()), Reverse(i.item.created_at())))
        }
        SortBy::Priority => items.sort_by_key(|i| i.item.priority),
    }
}

/// Filters applied after the category filter and the sort.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ItemRefinement {
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
    pub priority: Option<WishlistPriority>,
}

impl ItemRefinement {
    /// Returns whether any filter is set.
    pub fn is_active(&self) -> bool {
        self.needle().is_some() || self.priority.is_some()
    }

    fn needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Returns whether the item passes every filter.
    pub fn matches(&self, item: &WishlistItem) -> bool {
        if self.priority.is_some_and(|p| p != item.priority) {
            return false;
        }

        self.needle().is_none_or(|needle| {
            item.name.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle)
        })
    }

    /// Drops items that do not match, keeping the order of the rest.
    pub fn apply(&self, items: &mut Vec<ItemWithMeta>) {
        if self.is_active() {
            items.retain(|i| self.matches(&i.item));
        }
    }
}

/// Parameters of an item listing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ItemQuery {
    pub category: Option<WishlistCategory>,
    pub sort_by: SortBy,
    pub refinement: ItemRefinement,
}

impl ItemQuery {
    pub fn new(category: Option<WishlistCategory>, sort_by: SortBy) -> Self {
        Self {
            category,
            sort_by,
            refinement: ItemRefinement::default(),
        }
    }

    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.refinement.search = search;
        self
    }

    pub fn with_priority(mut self, priority: Option<WishlistPriority>) -> Self {
        self.refinement.priority = priority;
        self
    }
}
