//! Mutation outcome bodies.

use serde::{Deserialize, Serialize};
use wishlist_postgres::types::VoteType;

use crate::service::wishlist::VoteTally;

/// Outcome of an add or delete mutation.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    #[inline]
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[inline]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Outcome of a vote toggle with the freshly recomputed tally.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    pub success: bool,
    pub upvotes: usize,
    pub downvotes: usize,
    /// The caller's vote after the toggle, `null` when none.
    pub user_vote: Option<VoteType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VoteResponse {
    pub fn from_tally(tally: VoteTally) -> Self {
        Self {
            success: true,
            upvotes: tally.upvotes,
            downvotes: tally.downvotes,
            user_vote: tally.user_vote,
            error: None,
        }
    }

    /// Failure body; counts are zeroed rather than guessed.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            upvotes: 0,
            downvotes: 0,
            user_vote: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_error() {
        let json = serde_json::to_value(ActionResponse::succeeded()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true }));
    }

    #[test]
    fn vote_response_serializes_null_user_vote() {
        let json = serde_json::to_value(VoteResponse::failed("Failed to toggle vote")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": false,
                "upvotes": 0,
                "downvotes": 0,
                "userVote": null,
                "error": "Failed to toggle vote",
            })
        );
    }

    #[test]
    fn vote_response_copies_tally() {
        let tally = VoteTally {
            upvotes: 3,
            downvotes: 1,
            user_vote: Some(VoteType::Down),
        };
        let json = serde_json::to_value(VoteResponse::from_tally(tally)).unwrap();

        assert_eq!(json["upvotes"], 3);
        assert_eq!(json["downvotes"], 1);
        assert_eq!(json["userVote"], "down");
    }
}
