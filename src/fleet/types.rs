use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{AsRefStr, Display};
use utoipa::ToSchema;

/// Opaque satellite identifier, unique within a fleet (e.g. `SAT-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct SatelliteId(String);

impl SatelliteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SatelliteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SatelliteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SatelliteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SatelliteStatus {
    Active,
    Warning,
    Error,
}

impl SatelliteStatus {
    /// Display colour used by the dashboard status badges.
    pub fn color(&self) -> &'static str {
        match self {
            SatelliteStatus::Active => "#00FFAB",
            SatelliteStatus::Warning => "#FFD700",
            SatelliteStatus::Error => "#FF4C4C",
        }
    }
}

/// One entry of the fleet registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SatelliteRecord {
    pub id: SatelliteId,
    pub name: String,
    pub status: SatelliteStatus,
    pub last_update: String,
    /// Degraded satellites get amplified error predictions and lower stability.
    #[serde(default)]
    pub degraded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
