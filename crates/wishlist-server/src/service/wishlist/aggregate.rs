//! Vote tallies derived from raw vote rows.
//!
//! Nothing here is persisted: every read recomputes the tallies from the rows
//! the store returns.

use std::collections::HashMap;

use uuid::Uuid;
use wishlist_postgres::types::VoteType;

use crate::service::store::VoteRow;

/// Vote counts of a single item or comment, as seen by one user.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VoteTally {
    pub upvotes: usize,
    pub downvotes: usize,
    /// The acting user's vote on the target, if any.
    pub user_vote: Option<VoteType>,
}

impl VoteTally {
    /// Returns upvotes minus downvotes.
    #[inline]
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }

    /// Returns the total number of votes cast.
    #[inline]
    pub fn total(&self) -> usize {
        self.upvotes + self.downvotes
    }

    fn count(&mut self, vote: &VoteRow, user_id: &str) {
        match vote.vote_type {
            VoteType::Up => self.upvotes += 1,
            VoteType::Down => self.downvotes += 1,
        }

        if vote.user_id == user_id {
            self.user_vote = Some(vote.vote_type);
        }
    }
}

/// Tallies the votes of `target_id` from `votes`, ignoring other targets.
pub fn aggregate(votes: &[VoteRow], target_id: Uuid, user_id: &str) -> VoteTally {
    votes
        .iter()
        .filter(|vote| vote.target_id == target_id)
        .fold(VoteTally::default(), |mut tally, vote| {
            tally.count(vote, user_id);
            tally
        })
}

/// Tallies for many targets built in a single pass over the vote rows.
#[derive(Debug, Default, Clone)]
pub struct VoteIndex {
    tallies: HashMap<Uuid, VoteTally>,
}

impl VoteIndex {
    /// Indexes `votes` from the point of view of `user_id`.
    pub fn new(votes: &[VoteRow], user_id: &str) -> Self {
        let mut tallies: HashMap<Uuid, VoteTally> = HashMap::new();
        for vote in votes {
            tallies.entry(vote.target_id).or_default().count(vote, user_id);
        }

        Self { tallies }
    }

    /// Returns the tally of a target, or zeros when it has no votes.
    #[inline]
    pub fn tally(&self, target_id: Uuid) -> VoteTally {
        self.tallies.get(&target_id).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(target_id: Uuid, user_id: &str, vote_type: VoteType) -> VoteRow {
        VoteRow {
            id: Uuid::new_v4(),
            target_id,
            user_id: user_id.to_owned(),
            vote_type,
        }
    }

    #[test]
    fn test_aggregate_counts_only_the_target() {
        let target = Uuid::new_v4();
        let other = Uuid::new_v4();
        let votes = vec![
            vote(target, "a", VoteType::Up),
            vote(target, "b", VoteType::Up),
            vote(target, "c", VoteType::Down),
            vote(other, "a", VoteType::Down),
        ];

        let tally = aggregate(&votes, target, "c");
        assert_eq!(tally.upvotes, 2);
        assert_eq!(tally.downvotes, 1);
        assert_eq!(tally.score(), 1);
        assert_eq!(tally.user_vote, Some(VoteType::Down));
        assert!(tally.total() <= votes.len());
    }

    #[test]
    fn test_aggregate_without_user_vote() {
        let target = Uuid::new_v4();
        let votes = vec![vote(target, "a", VoteType::Down)];

        let tally = aggregate(&votes, target, "z");
        assert_eq!(tally.user_vote, None);
        assert_eq!(tally.score(), -1);
    }

    #[test]
    fn test_index_matches_aggregate() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let votes = vec![
            vote(first, "a", VoteType::Up),
            vote(second, "a", VoteType::Down),
            vote(second, "b", VoteType::Down),
        ];

        let index = VoteIndex::new(&votes, "a");
        assert_eq!(index.tally(first), aggregate(&votes, first, "a"));
        assert_eq!(index.tally(second), aggregate(&votes, second, "a"));
        assert_eq!(index.tally(Uuid::new_v4()), VoteTally::default());
    }
}
