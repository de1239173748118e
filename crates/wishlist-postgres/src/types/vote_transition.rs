//! Vote toggle planning shared by the item and comment vote tables.

use uuid::Uuid;

use super::VoteType;

/// Row change that toggles a user's vote on one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// The user has not voted yet.
    Insert(VoteType),
    /// The user repeated their vote, which withdraws it.
    Delete { vote_id: Uuid },
    /// The user switched polarity; the row is updated in place.
    Switch { vote_id: Uuid, to: VoteType },
}

impl VoteTransition {
    /// Plans the change from the user's `existing` vote, given as its row id
    /// and polarity, to `requested`.
    pub fn plan(existing: Option<(Uuid, VoteType)>, requested: VoteType) -> Self {
        match existing {
            None => Self::Insert(requested),
            Some((vote_id, vote_type)) if vote_type == requested => Self::Delete { vote_id },
            Some((vote_id, _)) => Self::Switch {
                vote_id,
                to: requested,
            },
        }
    }
}
