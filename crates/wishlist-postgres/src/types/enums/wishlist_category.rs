//! Wishlist category enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Infrastructure area a wishlist item belongs to.
///
/// This enumeration corresponds to the `WISHLIST_CATEGORY` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[derive(DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::WishlistCategory"]
#[strum(serialize_all = "snake_case")]
pub enum WishlistCategory {
    /// Physical machines, peripherals and components.
    #[db_rename = "hardware"]
    #[serde(rename = "hardware")]
    Hardware,

    /// Licenses, subscriptions and tooling.
    #[db_rename = "software"]
    #[serde(rename = "software")]
    Software,

    /// Connectivity and networking gear.
    #[db_rename = "network"]
    #[serde(rename = "network")]
    Network,

    /// Disks, arrays and backup capacity.
    #[db_rename = "storage"]
    #[serde(rename = "storage")]
    Storage,

    /// Anything that does not fit the other categories.
    #[db_rename = "other"]
    #[serde(rename = "other")]
    Other,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_display_matches_wire_format() {
        for category in WishlistCategory::iter() {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{category}\""));
            assert_eq!(WishlistCategory::from_str(&category.to_string()).unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!(WishlistCategory::from_str("furniture").is_err());
    }
}
