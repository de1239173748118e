//! Comment request types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::service::wishlist::CommentPlacement;

/// Request payload for commenting on an item or replying to a root comment.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    /// Comment text content.
    #[validate(length(min = 1, max = 10000))]
    pub content: String,
    /// Root comment being replied to.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

impl CreateComment {
    /// Returns where the comment goes in the thread.
    #[inline]
    pub fn placement(&self) -> CommentPlacement {
        CommentPlacement::from_parent(self.parent_id)
    }
}
