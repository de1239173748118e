//! Two-level comment threads.

use std::collections::HashMap;

use uuid::Uuid;
use wishlist_postgres::model::WishlistComment;

use super::aggregate::{VoteIndex, VoteTally};

/// Where a new comment goes in its item's thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentPlacement {
    /// A top-level comment on the item.
    Root,
    /// A reply to a root comment of the same item.
    Reply { parent_id: Uuid },
}

impl CommentPlacement {
    /// Builds the placement from an optional parent id.
    #[inline]
    pub fn from_parent(parent_id: Option<Uuid>) -> Self {
        match parent_id {
            Some(parent_id) => Self::Reply { parent_id },
            None => Self::Root,
        }
    }

    #[inline]
    pub fn parent_id(self) -> Option<Uuid> {
        match self {
            Self::Root => None,
            Self::Reply { parent_id } => Some(parent_id),
        }
    }
}

/// A comment with its vote tally and, for roots, its replies.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentNode {
    pub comment: WishlistComment,
    pub tally: VoteTally,
    /// Always empty for replies.
    pub replies: Vec<CommentNode>,
}

impl CommentNode {
    fn leaf(comment: WishlistComment, votes: &VoteIndex) -> Self {
        Self {
            tally: votes.tally(comment.id),
            comment,
            replies: Vec::new(),
        }
    }
}

/// Arranges comments of one item into root nodes with attached replies.
///
/// `comments` must be in creation order; roots and replies keep it. Replies
/// whose parent is missing or is itself a reply are dropped.
pub fn thread_comments(comments: Vec<WishlistComment>, votes: &VoteIndex) -> Vec<CommentNode> {
    let (roots, replies): (Vec<_>, Vec<_>) = comments.into_iter().partition(|c| c.is_root());

    let mut nodes: Vec<CommentNode> = roots
        .into_iter()
        .map(|comment| CommentNode::leaf(comment, votes))
        .collect();

    let positions: HashMap<Uuid, usize> = nodes
        .iter()
        .enumerate()
        .map(|(position, node)| (node.comment.id, position))
        .collect();

    for reply in replies {
        let Some(position) = reply.parent_id.and_then(|id| positions.get(&id)) else {
            continue;
        };

        nodes[*position]
            .replies
            .push(CommentNode::leaf(reply, votes));
    }

    nodes
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use wishlist_postgres::types::VoteType;

    use super::*;
    use crate::service::store::VoteRow;

    fn comment(item_id: Uuid, parent_id: Option<Uuid>, content: &str) -> WishlistComment {
        WishlistComment {
            id: Uuid::new_v4(),
            item_id,
            parent_id,
            user_id: "u".to_owned(),
            user_name: "U".to_owned(),
            content: content.to_owned(),
            created_at: Timestamp::now().into(),
        }
    }

    #[test]
    fn test_replies_attach_to_roots_in_order() {
        let item = Uuid::new_v4();
        let first = comment(item, None, "first");
        let second = comment(item, None, "second");
        let reply_a = comment(item, Some(first.id), "a");
        let reply_b = comment(item, Some(first.id), "b");

        let nodes = thread_comments(
            vec![first.clone(), reply_a, second, reply_b],
            &VoteIndex::default(),
        );

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].comment.content, "first");
        let replies: Vec<_> = nodes[0]
            .replies
            .iter()
            .map(|r| r.comment.content.as_str())
            .collect();
        assert_eq!(replies, ["a", "b"]);
        assert!(nodes[1].replies.is_empty());
    }

    #[test]
    fn test_orphans_and_nested_replies_are_dropped() {
        let item = Uuid::new_v4();
        let root = comment(item, None, "root");
        let reply = comment(item, Some(root.id), "reply");
        let nested = comment(item, Some(reply.id), "nested");
        let orphan = comment(item, Some(Uuid::new_v4()), "orphan");

        let nodes = thread_comments(vec![root, reply, nested, orphan], &VoteIndex::default());

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].replies.len(), 1);
        assert_eq!(nodes[0].replies[0].comment.content, "reply");
    }

    #[test]
    fn test_nodes_carry_tallies() {
        let item = Uuid::new_v4();
        let root = comment(item, None, "root");
        let votes = vec![VoteRow {
            id: Uuid::new_v4(),
            target_id: root.id,
            user_id: "me".to_owned(),
            vote_type: VoteType::Up,
        }];

        let nodes = thread_comments(vec![root], &VoteIndex::new(&votes, "me"));
        assert_eq!(nodes[0].tally.upvotes, 1);
        assert_eq!(nodes[0].tally.user_vote, Some(VoteType::Up));
    }

    #[test]
    fn test_placement_from_parent() {
        let parent = Uuid::new_v4();
        assert_eq!(CommentPlacement::from_parent(None), CommentPlacement::Root);
        assert_eq!(
            CommentPlacement::from_parent(Some(parent)).parent_id(),
            Some(parent)
        );
    }
}
