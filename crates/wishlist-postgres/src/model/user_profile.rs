//! User profile model for PostgreSQL database operations.

use diesel::prelude::*;
use jiff_diesel::Timestamp;

use crate::schema::user_profiles;
use crate::types::ProfileTheme;

/// Profile of an authenticated user, keyed by the identity-provider id.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserProfile {
    /// Identity-provider user id.
    pub id: String,
    /// Primary email address.
    pub email: String,
    /// Explicit display name override.
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// Preferred color theme.
    pub theme: ProfileTheme,
    /// Whether the user wants email notifications.
    pub email_notifications: bool,
    /// Timestamp when the profile was created.
    pub created_at: Timestamp,
    /// Timestamp when the profile was last updated.
    pub updated_at: Timestamp,
}

/// Data for creating a new user profile.
#[derive(Debug, Clone, PartialEq, Insertable)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewUserProfile {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Data for updating a user profile.
///
/// `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq, AsChangeset)]
#[diesel(table_name = user_profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UpdateUserProfile {
    pub display_name: Option<Option<String>>,
    pub first_name: Option<Option<String>>,
    pub last_name: Option<Option<String>>,
    pub bio: Option<Option<String>>,
    pub avatar_url: Option<Option<String>>,
    pub theme: Option<ProfileTheme>,
    pub email_notifications: Option<bool>,
    pub updated_at: Option<Timestamp>,
}

impl UserProfile {
    /// Returns the creation timestamp as a [`jiff::Timestamp`].
    #[inline]
    pub fn created_at(&self) -> jiff::Timestamp {
        self.created_at.into()
    }

    /// Returns the last update timestamp as a [`jiff::Timestamp`].
    #[inline]
    pub fn updated_at(&self) -> jiff::Timestamp {
        self.updated_at.into()
    }

    /// Returns the name shown next to the user's submissions.
    ///
    /// Falls back from the explicit display name to the full name, then to
    /// either name part, and finally to the local part of the email.
    pub fn display_name(&self) -> String {
        if let Some(name) = non_blank(self.display_name.as_deref()) {
            return name.to_owned();
        }

        match (
            non_blank(self.first_name.as_deref()),
            non_blank(self.last_name.as_deref()),
        ) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_owned(),
            (None, Some(last)) => last.to_owned(),
            (None, None) => self
                .email
                .split_once('@')
                .map_or(self.email.as_str(), |(local, _)| local)
                .to_owned(),
        }
    }
}

impl NewUserProfile {
    /// Creates a new profile for the given identity.
    pub fn for_user(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            first_name: None,
            last_name: None,
            avatar_url: None,
        }
    }

    /// Sets the given and family names.
    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name;
        self.last_name = last_name;
        self
    }

    /// Sets the avatar url.
    pub fn with_avatar_url(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = avatar_url;
        self
    }
}

impl UpdateUserProfile {
    /// Returns whether the update changes any user-facing column.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.bio.is_none()
            && self.avatar_url.is_none()
            && self.theme.is_none()
            && self.email_notifications.is_none()
    }

    /// Stamps the update with the given modification time.
    pub fn touched_at(mut self, now: jiff::Timestamp) -> Self {
        self.updated_at = Some(now.into());
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(email: &str) -> UserProfile {
        let now = jiff::Timestamp::now();
        UserProfile {
            id: "user-1".to_owned(),
            email: email.to_owned(),
            display_name: None,
            first_name: None,
            last_name: None,
            bio: None,
            avatar_url: None,
            theme: ProfileTheme::default(),
            email_notifications: true,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn test_display_name_prefers_override() {
        let mut p = profile("ada@example.com");
        p.display_name = Some("Countess".to_owned());
        p.first_name = Some("Ada".to_owned());
        assert_eq!(p.display_name(), "Countess");
    }

    #[test]
    fn test_display_name_from_name_parts() {
        let mut p = profile("ada@example.com");
        p.first_name = Some("Ada".to_owned());
        p.last_name = Some("Lovelace".to_owned());
        assert_eq!(p.display_name(), "Ada Lovelace");

        p.last_name = None;
        assert_eq!(p.display_name(), "Ada");

        p.first_name = None;
        p.last_name = Some("Lovelace".to_owned());
        assert_eq!(p.display_name(), "Lovelace");
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut p = profile("ada@example.com");
        p.display_name = Some("   ".to_owned());
        assert_eq!(p.display_name(), "ada");

        let p = profile("no-at-sign");
        assert_eq!(p.display_name(), "no-at-sign");
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateUserProfile::default().is_empty());
        assert!(
            UpdateUserProfile::default()
                .touched_at(jiff::Timestamp::now())
                .is_empty()
        );

        let update = UpdateUserProfile {
            theme: Some(ProfileTheme::Dark),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
