//! Wishlist priority enumeration.

use std::cmp::Ordering;

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Urgency assigned to a wishlist item by its submitter.
///
/// This enumeration corresponds to the `WISHLIST_PRIORITY` PostgreSQL enum.
/// Ordering follows urgency: `Critical` sorts first and `Low` sorts last.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[derive(DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::WishlistPriority"]
#[strum(serialize_all = "snake_case")]
pub enum WishlistPriority {
    /// Blocking production work.
    #[db_rename = "critical"]
    #[serde(rename = "critical")]
    Critical,

    #[db_rename = "high"]
    #[serde(rename = "high")]
    High,

    #[db_rename = "medium"]
    #[serde(rename = "medium")]
    Medium,

    /// Nice to have.
    #[db_rename = "low"]
    #[serde(rename = "low")]
    Low,
}

impl WishlistPriority {
    /// Returns the sort rank of the priority (lower is more urgent).
    #[inline]
    pub fn rank(self) -> u8 {
        match self {
            WishlistPriority::Critical => 0,
            WishlistPriority::High => 1,
            WishlistPriority::Medium => 2,
            WishlistPriority::Low => 3,
        }
    }

    /// Returns whether the item counts towards the high priority statistic.
    ///
    /// Only `High` counts; `Critical` is tracked separately by the dashboard.
    #[inline]
    pub fn is_high(self) -> bool {
        matches!(self, WishlistPriority::High)
    }
}

impl PartialOrd for WishlistPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WishlistPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_ordering() {
        let mut priorities = vec![
            WishlistPriority::Low,
            WishlistPriority::Critical,
            WishlistPriority::Medium,
            WishlistPriority::High,
        ];
        priorities.sort();

        assert_eq!(
            priorities,
            vec![
                WishlistPriority::Critical,
                WishlistPriority::High,
                WishlistPriority::Medium,
                WishlistPriority::Low,
            ]
        );
    }

    #[test]
    fn test_only_high_counts_as_high() {
        assert!(WishlistPriority::High.is_high());
        assert!(!WishlistPriority::Critical.is_high());
    }
}
