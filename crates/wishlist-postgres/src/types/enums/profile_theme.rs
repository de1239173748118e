//! Profile theme preference enumeration.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Color theme preferred by a user.
///
/// This enumeration corresponds to the `PROFILE_THEME` PostgreSQL enum.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[derive(DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::ProfileTheme"]
#[strum(serialize_all = "snake_case")]
pub enum ProfileTheme {
    #[db_rename = "light"]
    #[serde(rename = "light")]
    Light,

    #[db_rename = "dark"]
    #[serde(rename = "dark")]
    Dark,

    /// Follows the operating system preference.
    #[db_rename = "system"]
    #[serde(rename = "system")]
    #[default]
    System,
}
