//! Database enumeration types for type-safe queries.
//!
//! Each enumeration corresponds to a PostgreSQL ENUM type defined in the
//! migrations and provides serialization support for APIs.

// Wishlist-related enumerations
pub mod vote_type;
pub mod wishlist_category;
pub mod wishlist_priority;

// Profile-related enumerations
pub mod profile_theme;

pub use profile_theme::ProfileTheme;
pub use vote_type::VoteType;
pub use wishlist_category::WishlistCategory;
pub use wishlist_priority::WishlistPriority;
