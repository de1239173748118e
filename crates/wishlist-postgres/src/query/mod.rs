//! Database query repositories, one trait per table.
//!
//! Every repository is implemented for [`PgClient`], acquiring a pooled
//! connection per call.
//!
//! [`PgClient`]: crate::PgClient

mod user_profile;
mod wishlist_comment;
mod wishlist_item;
mod wishlist_vote;

pub use user_profile::UserProfileRepository;
pub use wishlist_comment::WishlistCommentRepository;
pub use wishlist_item::WishlistItemRepository;
pub use wishlist_vote::{CommentVoteRepository, ItemVoteRepository};
