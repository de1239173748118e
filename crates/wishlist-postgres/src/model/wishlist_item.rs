//! Wishlist item model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::schema::wishlist_items;
use crate::types::{WishlistCategory, WishlistPriority};

/// Infrastructure request submitted to the wishlist.
///
/// Items are immutable after creation; the only mutation is deletion by the
/// submitter, which cascades to votes, comments and comment votes.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = wishlist_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WishlistItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// Short name of the requested item.
    pub name: String,
    /// Why the item is needed.
    pub description: String,
    /// Infrastructure area.
    pub category: WishlistCategory,
    /// Urgency chosen by the submitter.
    pub priority: WishlistPriority,
    /// Estimated cost, if known.
    pub estimated_cost: Option<f64>,
    /// Reference link (vendor page, ticket).
    pub link: Option<String>,
    /// Identity-provider id of the submitter.
    pub submitted_by: String,
    /// Display name of the submitter at submission time.
    pub submitted_by_name: String,
    /// Timestamp when the item was created.
    pub created_at: Timestamp,
}

/// Data for creating a new wishlist item.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = wishlist_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewWishlistItem {
    pub name: String,
    pub description: String,
    pub category: WishlistCategory,
    pub priority: WishlistPriority,
    pub estimated_cost: Option<f64>,
    pub link: Option<String>,
    pub submitted_by: String,
    pub submitted_by_name: String,
}

impl WishlistItem {
    /// Returns the creation timestamp as a [`jiff::Timestamp`].
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }

    /// Returns whether the given user submitted this item.
    #[inline]
    pub fn is_submitted_by(&self, user_id: &str) -> bool {
        self.submitted_by == user_id
    }

    /// Returns the estimated cost, treating an unknown cost as zero.
    #[inline]
    pub fn cost_or_zero(&self) -> f64 {
        self.estimated_cost.unwrap_or_default()
    }
}

impl NewWishlistItem {
    /// Creates a new item submitted by the given user.
    pub fn for_user(
        submitted_by: impl Into<String>,
        submitted_by_name: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        category: WishlistCategory,
        priority: WishlistPriority,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            category,
            priority,
            estimated_cost: None,
            link: None,
            submitted_by: submitted_by.into(),
            submitted_by_name: submitted_by_name.into(),
        }
    }

    /// Sets the estimated cost.
    pub fn with_estimated_cost(mut self, estimated_cost: Option<f64>) -> Self {
        self.estimated_cost = estimated_cost;
        self
    }

    /// Sets the reference link.
    pub fn with_link(mut self, link: Option<String>) -> Self {
        self.link = link;
        self
    }
}
