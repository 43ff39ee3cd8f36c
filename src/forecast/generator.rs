use chrono::{DateTime, Duration, Utc};

use crate::fleet::{SatelliteId, SatelliteRecord};
use crate::forecast::types::{Confidence, ErrorSample, ErrorSeries, RiskLevel};

pub const HORIZON_HOURS: u32 = 24;
pub const STEP_MINUTES: u32 = 30;
pub const SAMPLE_COUNT: usize = (HORIZON_HOURS * 60 / STEP_MINUTES) as usize;

const DEGRADED_VARIATION: f64 = 1.5;
const NOMINAL_STABILITY: f64 = 0.89;
const DEGRADED_STABILITY: f64 = 0.72;
const CLOCK_STD: &str = "0.05μs";
const EPHEMERIS_STD: &str = "0.12m";

// Clock error in µs scales to meters of range by roughly 30.
const CLOCK_TO_RANGE: f64 = 30.0;

/// Generate the synthetic error forecast for a fleet record.
pub fn generate_for(record: &SatelliteRecord, generated_at: DateTime<Utc>) -> ErrorSeries {
    generate(&record.id, record.degraded, generated_at)
}

/// Generate a deterministic 24 h error forecast at 30 minute spacing.
///
/// Degraded satellites have every error term amplified by 1.5 and report a
/// lower prediction stability.
pub fn generate(
    satellite_id: &SatelliteId,
    degraded: bool,
    generated_at: DateTime<Utc>,
) -> ErrorSeries {
    let variation = if degraded { DEGRADED_VARIATION } else { 1.0 };

    let samples = (0..SAMPLE_COUNT)
        .map(|i| {
            let n = i as f64;
            let offset_minutes = i as u32 * STEP_MINUTES;

            let clock = (0.08 + 0.04 * (n * 0.3).sin()) * variation;
            let ephemeris = (0.15 + 0.08 * (n * 0.2).cos()) * variation;
            let combined = (clock * CLOCK_TO_RANGE + ephemeris) * (1.0 + n * 0.01);
            let combined_error = round_to(combined, 1);

            ErrorSample {
                offset_minutes,
                timestamp: generated_at + Duration::minutes(offset_minutes as i64),
                clock_error: round_to(clock, 3),
                ephemeris_error: round_to(ephemeris, 2),
                combined_error,
                risk_level: RiskLevel::from_combined_error(combined_error),
            }
        })
        .collect();

    ErrorSeries {
        satellite_id: satellite_id.clone(),
        generated_at,
        horizon_hours: HORIZON_HOURS,
        sample_count: SAMPLE_COUNT,
        samples,
        confidence: Confidence {
            clock_std: CLOCK_STD.to_string(),
            ephemeris_std: EPHEMERIS_STD.to_string(),
            stability: if degraded {
                DEGRADED_STABILITY
            } else {
                NOMINAL_STABILITY
            },
        },
    }
}

/// Round on the exact binary value. Scaling by a power of ten first can
/// land a value just below a half exactly on it.
fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 12, 10, 0, 0).unwrap()
    }

    #[test]
    fn produces_48_samples_at_fixed_spacing() {
        let series = generate(&SatelliteId::from("SAT-001"), false, t0());
        assert_eq!(series.sample_count, 48);
        assert_eq!(series.samples.len(), series.sample_count);
        assert_eq!(series.horizon_hours, 24);

        for (i, sample) in series.samples.iter().enumerate() {
            assert_eq!(sample.offset_minutes, i as u32 * 30);
            assert_eq!(
                sample.timestamp,
                t0() + Duration::minutes(i as i64 * 30)
            );
        }
        assert_eq!(series.samples.last().unwrap().offset_minutes, 1410);
    }

    #[test]
    fn first_sample_matches_formula() {
        let series = generate(&SatelliteId::from("SAT-001"), false, t0());
        let first = &series.samples[0];
        assert_eq!(first.clock_error, 0.08);
        // cos(0) = 1, so the ephemeris term starts at its peak
        assert_eq!(first.ephemeris_error, 0.23);
        assert_eq!(first.combined_error, 2.6);
        assert_eq!(first.risk_level, RiskLevel::Low);
    }

    #[test]
    fn degraded_first_sample_rounds_exact_value() {
        let series = generate(&SatelliteId::from("SAT-004"), true, t0());
        let first = &series.samples[0];
        // 0.23 * 1.5 is stored as 0.34499999999999997
        assert_eq!(first.ephemeris_error, 0.34);
        assert_eq!(first.clock_error, 0.12);
    }

    #[test]
    fn rounds_below_half_down() {
        assert_eq!(round_to(0.34499999999999997, 2), 0.34);
        assert_eq!(round_to(1.005, 2), 1.0);
        assert_eq!(round_to(2.63, 1), 2.6);
        assert_eq!(round_to(0.0813, 3), 0.081);
    }

    #[test]
    fn errors_are_non_negative_and_classified() {
        for degraded in [false, true] {
            let series = generate(&SatelliteId::from("X"), degraded, t0());
            for s in &series.samples {
                assert!(s.clock_error >= 0.0);
                assert!(s.ephemeris_error >= 0.0);
                assert!(s.combined_error >= 0.0);
                assert_eq!(s.risk_level, RiskLevel::from_combined_error(s.combined_error));
            }
        }
    }

    #[test]
    fn degraded_series_dominates_nominal() {
        let nominal = generate(&SatelliteId::from("SAT-001"), false, t0());
        let degraded = generate(&SatelliteId::from("SAT-004"), true, t0());
        for (n, d) in nominal.samples.iter().zip(&degraded.samples) {
            assert!(d.combined_error >= n.combined_error);
            assert!(d.clock_error >= n.clock_error);
        }
        assert_eq!(nominal.confidence.stability, 0.89);
        assert_eq!(degraded.confidence.stability, 0.72);
    }

    #[test]
    fn confidence_constants() {
        let series = generate(&SatelliteId::from("anything"), false, t0());
        assert_eq!(series.confidence.clock_std, "0.05μs");
        assert_eq!(series.confidence.ephemeris_std, "0.12m");
    }

    #[test]
    fn generation_is_deterministic() {
        let id = SatelliteId::from("SAT-002");
        let a = generate(&id, false, t0());
        let b = generate(&id, false, t0());
        let combined = |s: &ErrorSeries| s.samples.iter().map(|p| p.combined_error).collect::<Vec<_>>();
        assert_eq!(combined(&a), combined(&b));
    }

    #[test]
    fn generate_for_uses_record_flag() {
        let fleet = crate::fleet::Fleet::builtin();
        let gps = fleet.get(&SatelliteId::from("SAT-004")).unwrap();
        let series = generate_for(gps, t0());
        assert_eq!(series.satellite_id, gps.id);
        assert_eq!(series.confidence.stability, 0.72);
    }
}
