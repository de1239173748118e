//! Constants used throughout the application.

/// Wishlist item constants.
pub mod item {
    /// Maximum length of an item name in characters.
    pub const MAX_NAME_LENGTH: usize = 100;

    /// Maximum length of an item description in characters.
    pub const MAX_DESCRIPTION_LENGTH: usize = 500;

    /// Number of items reported as recently added by the statistics.
    pub const RECENT_ITEMS_LIMIT: usize = 5;
}

/// Comment constants.
pub mod comment {
    /// Maximum length of a comment in characters.
    pub const MAX_CONTENT_LENGTH: usize = 10_000;
}

/// User profile constants.
pub mod profile {
    /// Maximum length of a display name in characters.
    pub const MAX_DISPLAY_NAME_LENGTH: usize = 100;

    /// Maximum length of a profile bio in characters.
    pub const MAX_BIO_LENGTH: usize = 500;
}
