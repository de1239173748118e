//! Contains constants, enumerations and other custom types.

pub mod constants;
mod enums;
mod vote_transition;

pub use enums::{ProfileTheme, VoteType, WishlistCategory, WishlistPriority};
pub use vote_transition::VoteTransition;
