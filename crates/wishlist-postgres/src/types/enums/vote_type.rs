//! Vote polarity enumeration shared by item and comment votes.

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Polarity of a single vote row.
///
/// This enumeration corresponds to the `VOTE_TYPE` PostgreSQL enum.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[derive(DbEnum, Display, EnumIter, EnumString)]
#[ExistingTypePath = "crate::schema::sql_types::VoteType"]
#[strum(serialize_all = "snake_case")]
pub enum VoteType {
    #[db_rename = "up"]
    #[serde(rename = "up")]
    Up,

    #[db_rename = "down"]
    #[serde(rename = "down")]
    Down,
}

impl VoteType {
    /// Returns the signed contribution of this vote to a score.
    #[inline]
    pub fn weight(self) -> i64 {
        match self {
            VoteType::Up => 1,
            VoteType::Down => -1,
        }
    }

    /// Returns the opposite polarity.
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            VoteType::Up => VoteType::Down,
            VoteType::Down => VoteType::Up,
        }
    }
}
