//! Path parameter types for HTTP handlers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path parameters for item operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPathParams {
    /// Unique identifier of the item.
    pub item_id: Uuid,
}

/// Path parameters for comment operations.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPathParams {
    /// Unique identifier of the comment.
    pub comment_id: Uuid,
}
