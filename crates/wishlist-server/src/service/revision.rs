//! Monotonic revision of the wishlist views.
//!
//! Every successful mutation bumps the revision. Clients compare it against
//! the value they rendered to know when to re-fetch.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counter that signals view invalidation.
#[derive(Debug, Clone, Default)]
pub struct ViewRevision {
    counter: Arc<AtomicU64>,
}

impl ViewRevision {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current revision.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Acquire)
    }

    /// Advances the revision and returns the new value.
    pub fn bump(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::AcqRel) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_counter() {
        let revision = ViewRevision::new();
        assert_eq!(revision.current(), 0);

        assert_eq!(revision.clone().bump(), 1);
        assert_eq!(revision.bump(), 2);
        assert_eq!(revision.current(), 2);
    }
}
