//! Monitor response types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Reachability of the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[derive(Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// System monitoring status response.
#[must_use]
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorStatus {
    /// Timestamp when this status was generated.
    pub checked_at: Timestamp,
    pub status: ServiceStatus,
    /// Application version.
    pub version: String,
    /// Current wishlist view revision.
    pub revision: u64,
}

impl MonitorStatus {
    pub fn new(is_healthy: bool, revision: u64) -> Self {
        let status = if is_healthy {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Unhealthy
        };

        Self {
            checked_at: Timestamp::now(),
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            revision,
        }
    }
}
