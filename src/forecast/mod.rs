mod generator;
mod summary;
mod types;

pub use generator::{generate, generate_for, HORIZON_HOURS, SAMPLE_COUNT, STEP_MINUTES};
pub use summary::{bar_height_percent, format_offset, SeriesSummary};
pub use types::{Confidence, ErrorSample, ErrorSeries, RiskLevel};
