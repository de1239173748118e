//! User profile request types.

use serde::{Deserialize, Serialize};
use validator::Validate;
use wishlist_postgres::model::UpdateUserProfile;
use wishlist_postgres::types::ProfileTheme;

/// Request payload for updating the caller's profile.
///
/// Absent fields stay unchanged; an empty string clears a text field.
#[must_use]
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    #[validate(length(max = 100))]
    pub display_name: Option<String>,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 500))]
    pub bio: Option<String>,
    pub theme: Option<ProfileTheme>,
    pub email_notifications: Option<bool>,
}

impl UpdateProfile {
    /// Converts to database model.
    pub fn into_model(self) -> UpdateUserProfile {
        UpdateUserProfile {
            display_name: self.display_name.map(clearable),
            first_name: self.first_name.map(clearable),
            last_name: self.last_name.map(clearable),
            bio: self.bio.map(clearable),
            theme: self.theme,
            email_notifications: self.email_notifications,
            ..UpdateUserProfile::default()
        }
    }
}

/// Maps a blank value to `None`, which clears the column.
fn clearable(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_clears_and_absent_keeps() {
        let request = UpdateProfile {
            display_name: Some(String::new()),
            bio: Some(" Racks and cables ".into()),
            ..UpdateProfile::default()
        };
        let model = request.into_model();

        assert_eq!(model.display_name, Some(None));
        assert_eq!(model.bio, Some(Some("Racks and cables".into())));
        assert_eq!(model.first_name, None);
        assert_eq!(model.theme, None);
    }

    #[test]
    fn long_display_name_is_rejected() {
        let request = UpdateProfile {
            display_name: Some("x".repeat(101)),
            ..UpdateProfile::default()
        };
        assert!(request.validate().is_err());
    }
}
