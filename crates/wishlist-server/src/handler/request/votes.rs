//! Vote request types.

use serde::{Deserialize, Serialize};
use validator::Validate;
use wishlist_postgres::types::VoteType;

/// Request payload for toggling a vote on an item or a comment.
///
/// Sending the caller's current vote again removes it.
#[must_use]
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ToggleVote {
    pub vote_type: VoteType,
}
