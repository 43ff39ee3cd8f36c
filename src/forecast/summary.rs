use serde::Serialize;
use utoipa::ToSchema;

use crate::forecast::types::{ErrorSeries, RiskLevel};

const BAR_FULL_SCALE_M: f64 = 300.0;
const BAR_MIN_PERCENT: f64 = 8.0;

/// Aggregate figures shown in the dashboard summary panel.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SeriesSummary {
    pub max_combined_error: f64,
    pub average_combined_error: f64,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl ErrorSeries {
    pub fn max_combined_error(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.combined_error)
            .reduce(f64::max)
    }

    pub fn average_combined_error(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let total: f64 = self.samples.iter().map(|s| s.combined_error).sum();
        Some(total / self.samples.len() as f64)
    }

    /// `None` for an empty series.
    pub fn summary(&self) -> Option<SeriesSummary> {
        let max_combined_error = self.max_combined_error()?;
        let average_combined_error = self.average_combined_error()?;

        let count = |level: RiskLevel| {
            self.samples
                .iter()
                .filter(|s| s.risk_level == level)
                .count()
        };

        Some(SeriesSummary {
            max_combined_error,
            average_combined_error,
            low: count(RiskLevel::Low),
            medium: count(RiskLevel::Medium),
            high: count(RiskLevel::High),
        })
    }
}

/// Formats a minute offset as `H:MM`.
pub fn format_offset(minutes: u32) -> String {
    format!("{}:{:02}", minutes / 60, minutes % 60)
}

/// Timeline bar height, in percent of the bar container.
pub fn bar_height_percent(combined_error_m: f64) -> f64 {
    (combined_error_m / BAR_FULL_SCALE_M * 100.0).clamp(BAR_MIN_PERCENT, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::SatelliteId;
    use crate::forecast::generate;
    use chrono::Utc;

    #[test]
    fn summary_of_generated_series() {
        let series = generate(&SatelliteId::from("SAT-001"), false, Utc::now());
        let summary = series.summary().unwrap();

        let max = series
            .samples
            .iter()
            .map(|s| s.combined_error)
            .fold(f64::MIN, f64::max);
        assert_eq!(summary.max_combined_error, max);
        assert!(summary.average_combined_error <= summary.max_combined_error);
        assert!(summary.average_combined_error > 0.0);
        assert_eq!(summary.low + summary.medium + summary.high, 48);
    }

    #[test]
    fn empty_series_has_no_summary() {
        let mut series = generate(&SatelliteId::from("SAT-001"), false, Utc::now());
        series.samples.clear();
        assert_eq!(series.max_combined_error(), None);
        assert_eq!(series.average_combined_error(), None);
        assert!(series.summary().is_none());
    }

    #[test]
    fn formats_offsets() {
        assert_eq!(format_offset(0), "0:00");
        assert_eq!(format_offset(30), "0:30");
        assert_eq!(format_offset(90), "1:30");
        assert_eq!(format_offset(1410), "23:30");
    }

    #[test]
    fn bar_height_is_clamped() {
        assert_eq!(bar_height_percent(0.0), 8.0);
        assert_eq!(bar_height_percent(150.0), 50.0);
        assert_eq!(bar_height_percent(900.0), 100.0);
    }
}
