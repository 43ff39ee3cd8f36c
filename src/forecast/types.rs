use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use utoipa::ToSchema;

use crate::fleet::SatelliteId;

const MEDIUM_THRESHOLD_M: f64 = 50.0;
const HIGH_THRESHOLD_M: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_combined_error(combined_error_m: f64) -> Self {
        if combined_error_m < MEDIUM_THRESHOLD_M {
            RiskLevel::Low
        } else if combined_error_m < HIGH_THRESHOLD_M {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#00FFAB",
            RiskLevel::Medium => "#FFD700",
            RiskLevel::High => "#FF4C4C",
        }
    }
}

/// A single predicted error point.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorSample {
    pub offset_minutes: u32,
    pub timestamp: DateTime<Utc>,
    /// Microseconds
    pub clock_error: f64,
    /// Meters
    pub ephemeris_error: f64,
    /// Meters
    pub combined_error: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Confidence {
    pub clock_std: String,
    pub ephemeris_std: String,
    pub stability: f64,
}

/// Forecast for one satellite over the prediction horizon.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorSeries {
    pub satellite_id: SatelliteId,
    pub generated_at: DateTime<Utc>,
    pub horizon_hours: u32,
    pub sample_count: usize,
    pub samples: Vec<ErrorSample>,
    pub confidence: Confidence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_thresholds_are_exclusive_upper_bounds() {
        assert_eq!(RiskLevel::from_combined_error(0.0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_combined_error(49.9), RiskLevel::Low);
        assert_eq!(RiskLevel::from_combined_error(50.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_combined_error(149.9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_combined_error(150.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_combined_error(1e6), RiskLevel::High);
    }

    #[test]
    fn risk_level_renders_snake_case() {
        assert_eq!(RiskLevel::Medium.to_string(), "medium");
        assert_eq!(RiskLevel::High.as_ref(), "high");
        assert_eq!(
            serde_json::to_string(&RiskLevel::Low).unwrap(),
            "\"low\""
        );
    }
}
