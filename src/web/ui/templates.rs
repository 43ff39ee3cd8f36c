use askama::Template;
use askama_web::WebTemplate;

use crate::carousel::Carousel;
use crate::fleet::{Fleet, SatelliteId};
use crate::forecast::{bar_height_percent, format_offset, ErrorSample, ErrorSeries};
use crate::session::Session;

pub struct FleetRow {
    pub id: String,
    pub name: String,
    pub status: String,
    pub status_color: &'static str,
    pub last_update: String,
    pub selected: bool,
    pub link: String,
}

pub struct SlideRow {
    pub title: String,
    pub button_label: String,
    pub image_ref: String,
    pub status: String,
    pub status_color: &'static str,
    pub last_update: String,
    pub current: bool,
    pub link: String,
}

pub struct TimelineBar {
    pub time_label: String,
    pub value_label: String,
    pub height_percent: String,
    pub color: &'static str,
    pub risk: String,
    pub clock_error: String,
    pub ephemeris_error: String,
}

pub struct SeriesPanel {
    pub satellite_id: String,
    pub horizon_hours: u32,
    pub sample_count: usize,
    pub max_error: String,
    pub average_error: String,
    pub risk_points: usize,
    pub stability_percent: String,
    pub stability_color: &'static str,
    pub clock_std: String,
    pub ephemeris_std: String,
    pub bars: Vec<TimelineBar>,
    pub clock_line: String,
    pub ephemeris_line: String,
}

const STABLE_COLOR: &str = "#00FFAB";
const UNSTABLE_COLOR: &str = "#FFD700";
const NEUTRAL_COLOR: &str = "#A0AEC0";

// Error chart viewport, in SVG user units.
const CHART_WIDTH: f64 = 800.0;
const CHART_BASELINE: f64 = 200.0;
const CLOCK_FULL_SCALE: f64 = 0.25;
const CLOCK_SPAN: f64 = 120.0;
const EPHEMERIS_FULL_SCALE: f64 = 0.6;
const EPHEMERIS_SPAN: f64 = 100.0;

impl SeriesPanel {
    pub fn new(series: &ErrorSeries) -> Self {
        let summary = series.summary();
        let stability = series.confidence.stability;

        SeriesPanel {
            satellite_id: series.satellite_id.to_string(),
            horizon_hours: series.horizon_hours,
            sample_count: series.sample_count,
            max_error: summary
                .as_ref()
                .map(|s| format!("{:.1}m", s.max_combined_error))
                .unwrap_or_else(|| "n/a".to_string()),
            average_error: summary
                .as_ref()
                .map(|s| format!("{:.1}m", s.average_combined_error))
                .unwrap_or_else(|| "n/a".to_string()),
            risk_points: summary.as_ref().map_or(0, |s| s.high),
            stability_percent: format!("{:.0}%", stability * 100.0),
            stability_color: if stability > 0.8 {
                STABLE_COLOR
            } else {
                UNSTABLE_COLOR
            },
            clock_std: series.confidence.clock_std.clone(),
            ephemeris_std: series.confidence.ephemeris_std.clone(),
            bars: series
                .samples
                .iter()
                .map(|s| TimelineBar {
                    time_label: format_offset(s.offset_minutes),
                    value_label: format!("{}m", s.combined_error),
                    height_percent: format!("{:.1}", bar_height_percent(s.combined_error)),
                    color: s.risk_level.color(),
                    risk: s.risk_level.to_string(),
                    clock_error: format!("{:.3}μs", s.clock_error),
                    ephemeris_error: format!("{:.2}m", s.ephemeris_error),
                })
                .collect(),
            clock_line: chart_line(series, |s| s.clock_error / CLOCK_FULL_SCALE * CLOCK_SPAN),
            ephemeris_line: chart_line(series, |s| {
                s.ephemeris_error / EPHEMERIS_FULL_SCALE * EPHEMERIS_SPAN
            }),
        }
    }
}

/// SVG `points` for one error term, spread evenly across the chart width.
fn chart_line<F>(series: &ErrorSeries, height: F) -> String
where
    F: Fn(&ErrorSample) -> f64,
{
    let last = series.samples.len().saturating_sub(1).max(1) as f64;
    series
        .samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "{:.1},{:.1}",
                i as f64 / last * CHART_WIDTH,
                CHART_BASELINE - height(s)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub selected_name: String,
    pub synchronized: bool,
    pub slides: Vec<SlideRow>,
    pub previous_link: String,
    pub next_link: String,
    pub fleet: Vec<FleetRow>,
    pub panel: SeriesPanel,
}

impl DashboardTemplate {
    pub fn new(fleet: &Fleet, session: &Session) -> Self {
        let carousel = session.carousel();
        let current = carousel.current_index();
        let selected = session.selected_satellite_id();

        let slides = carousel
            .slides()
            .iter()
            .enumerate()
            .map(|(i, slide)| SlideRow {
                title: slide.title.clone(),
                button_label: slide.button_label.clone(),
                image_ref: slide.image_ref.clone(),
                status: slide.status.map(|s| s.to_string()).unwrap_or_default(),
                status_color: slide.status.map_or(NEUTRAL_COLOR, |s| s.color()),
                last_update: slide.last_update.clone().unwrap_or_default(),
                current: i == current,
                link: dashboard_link(i, None),
            })
            .collect();

        let fleet_rows = fleet
            .iter()
            .map(|sat| FleetRow {
                id: sat.id.to_string(),
                name: sat.name.clone(),
                status: sat.status.to_string(),
                status_color: sat.status.color(),
                last_update: sat.last_update.clone(),
                selected: &sat.id == selected,
                link: dashboard_link(current, Some(&sat.id)),
            })
            .collect();

        DashboardTemplate {
            selected_name: session
                .selected_satellite()
                .map(|s| s.name.clone())
                .unwrap_or_else(|| selected.to_string()),
            synchronized: session.is_synchronized(),
            slides,
            previous_link: dashboard_link(neighbour(carousel, Carousel::previous), None),
            next_link: dashboard_link(neighbour(carousel, Carousel::next), None),
            fleet: fleet_rows,
            panel: SeriesPanel::new(session.series()),
        }
    }
}

/// Dashboard URL for a slide and optional side-panel selection. Satellite
/// ids are free-form, so the query is percent-encoded.
fn dashboard_link(slide: usize, satellite: Option<&SatelliteId>) -> String {
    let slide = slide.to_string();
    let mut params = vec![("slide", slide.as_str())];
    if let Some(id) = satellite {
        params.push(("satellite", id.as_str()));
    }
    match serde_urlencoded::to_string(&params) {
        Ok(query) => format!("/?{}", query),
        Err(e) => {
            log::warn!("Failed to encode dashboard link: {}", e);
            format!("/?slide={}", slide)
        }
    }
}

fn neighbour<F>(carousel: &Carousel, step: F) -> usize
where
    F: for<'a> FnOnce(&'a mut Carousel) -> Option<&'a SatelliteId>,
{
    let mut moved = carousel.clone();
    step(&mut moved);
    moved.current_index()
}

#[derive(Template, WebTemplate)]
#[template(path = "timeline.html")]
pub struct TimelineTemplate {
    pub name: String,
    pub panel: SeriesPanel,
}
