//! Wishlist item request types.

use serde::{Deserialize, Serialize};
use validator::Validate;
use wishlist_postgres::model::NewWishlistItem;
use wishlist_postgres::types::{WishlistCategory, WishlistPriority};

use super::validations::{deserialize_filter, normalized_option, not_blank};
use crate::service::wishlist::{ItemQuery, SortBy};

/// Request payload for adding a wishlist item.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWishlistItem {
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 500), custom(function = "not_blank"))]
    pub description: String,
    pub category: WishlistCategory,
    pub priority: WishlistPriority,
    /// Estimated cost in dollars.
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    /// Product or vendor page.
    #[validate(url)]
    #[serde(default)]
    pub link: Option<String>,
}

impl CreateWishlistItem {
    /// Converts to database model, recording the submitter's current name.
    pub fn into_model(self, user_id: &str, user_name: &str) -> NewWishlistItem {
        NewWishlistItem::for_user(
            user_id,
            user_name,
            self.name.trim(),
            self.description.trim(),
            self.category,
            self.priority,
        )
        .with_estimated_cost(self.estimated_cost)
        .with_link(normalized_option(self.link))
    }
}

/// Query parameters of the item listing.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListItems {
    /// Category filter; `all` or absent lists every category.
    #[serde(default, deserialize_with = "deserialize_filter")]
    pub category: Option<WishlistCategory>,
    #[serde(default)]
    pub sort_by: SortBy,
    /// Case-insensitive match on name and description.
    #[validate(length(max = 100))]
    #[serde(default)]
    pub search: Option<String>,
    /// Priority filter; `all` or absent keeps every priority.
    #[serde(default, deserialize_with = "deserialize_filter")]
    pub priority: Option<WishlistPriority>,
}

impl ListItems {
    pub fn into_query(self) -> ItemQuery {
        ItemQuery::new(self.category, self.sort_by)
            .with_search(normalized_option(self.search))
            .with_priority(self.priority)
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    fn request() -> CreateWishlistItem {
        CreateWishlistItem {
            name: "Spare NVMe drives".into(),
            description: "Two 4TB drives for the storage node".into(),
            category: WishlistCategory::Storage,
            priority: WishlistPriority::High,
            estimated_cost: Some(640.0),
            link: Some("https://vendor.example.com/nvme".into()),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut request = request();
        request.name = "   ".into();
        assert!(request.validate().is_err());
    }

    #[test]
    fn negative_cost_is_rejected() {
        let mut request = request();
        request.estimated_cost = Some(-1.0);
        assert!(request.validate().is_err());
    }

    #[test]
    fn malformed_link_is_rejected() {
        let mut request = request();
        request.link = Some("not a url".into());
        assert!(request.validate().is_err());
    }

    #[test]
    fn into_model_trims_and_records_submitter() {
        let mut request = request();
        request.name = "  Spare NVMe drives ".into();
        let model = request.into_model("auth0|ada", "Ada Lovelace");

        assert_eq!(model.name, "Spare NVMe drives");
        assert_eq!(model.submitted_by, "auth0|ada");
        assert_eq!(model.submitted_by_name, "Ada Lovelace");
        assert_eq!(model.estimated_cost, Some(640.0));
    }

    #[test]
    fn all_filters_deserialize_to_none() {
        let query: ListItems =
            serde_json::from_value(serde_json::json!({ "category": "all", "priority": "" }))
                .unwrap();
        assert_eq!(query.category, None);
        assert_eq!(query.priority, None);
        assert_eq!(query.sort_by, SortBy::Score);

        let query: ListItems = serde_json::from_value(serde_json::json!({
            "category": "network",
            "sortBy": "priority",
        }))
        .unwrap();
        assert_eq!(query.category, Some(WishlistCategory::Network));
        assert_eq!(query.sort_by, SortBy::Priority);
    }
}
