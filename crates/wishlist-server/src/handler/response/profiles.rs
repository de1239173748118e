//! User profile response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use wishlist_postgres::model::UserProfile;
use wishlist_postgres::types::ProfileTheme;

/// The caller's profile.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Identity-provider user id.
    pub id: String,
    pub email: String,
    /// Explicit display name override, if set.
    pub display_name: Option<String>,
    /// Name shown on new submissions and comments.
    pub resolved_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: ProfileTheme,
    pub email_notifications: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Profile {
    pub fn from_model(profile: UserProfile) -> Self {
        Self {
            resolved_name: profile.display_name(),
            created_at: profile.created_at(),
            updated_at: profile.updated_at(),
            id: profile.id,
            email: profile.email,
            display_name: profile.display_name,
            first_name: profile.first_name,
            last_name: profile.last_name,
            bio: profile.bio,
            avatar_url: profile.avatar_url,
            theme: profile.theme,
            email_notifications: profile.email_notifications,
        }
    }
}
