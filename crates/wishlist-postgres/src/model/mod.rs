//! Database models for all tables.
//!
//! Each model provides the queryable row type, an insertable `New*` type and,
//! where the table supports updates, an `Update*` changeset.

mod user_profile;
mod wishlist_comment;
mod wishlist_item;
mod wishlist_vote;

pub use user_profile::{NewUserProfile, UpdateUserProfile, UserProfile};
pub use wishlist_comment::{NewWishlistComment, WishlistComment};
pub use wishlist_item::{NewWishlistItem, WishlistItem};
pub use wishlist_vote::{CommentVote, ItemVote, NewCommentVote, NewItemVote};
