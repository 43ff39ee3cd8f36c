use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use crate::fleet::SatelliteId;
use crate::forecast::generate;
use crate::session::Session;
use crate::web::state::AppState;

use super::templates::{DashboardTemplate, SeriesPanel, TimelineTemplate};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub slide: Option<usize>,
    #[serde(default)]
    pub satellite: Option<String>,
}

/// Server-rendered dashboard. The page is rebuilt from the query on every
/// request: `slide` positions the carousel (selecting its satellite) and
/// `satellite` then selects directly from the fleet panel.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> impl IntoResponse {
    let now = Utc::now();
    let mut session = Session::new(state.fleet.clone(), now);

    if let Some(index) = query.slide {
        if let Err(e) = session.jump_to(index, now) {
            log::debug!("Ignoring dashboard slide parameter: {}", e);
        }
    }
    if let Some(id) = query.satellite {
        session.select_satellite(SatelliteId::from(id), now);
    }

    DashboardTemplate::new(&state.fleet, &session)
}

#[derive(Debug, Deserialize)]
pub struct TimelineQuery {
    #[serde(default)]
    pub satellite: Option<String>,
}

pub async fn timeline(
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> impl IntoResponse {
    let id = query
        .satellite
        .map(SatelliteId::from)
        .unwrap_or_else(|| state.fleet.first().id.clone());
    let name = state
        .fleet
        .get(&id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| id.to_string());
    let series = generate(&id, state.fleet.is_degraded(&id), Utc::now());

    TimelineTemplate {
        name,
        panel: SeriesPanel::new(&series),
    }
}
