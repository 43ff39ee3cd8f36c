use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::fleet::SatelliteId;
use crate::forecast::{generate, ErrorSeries, SeriesSummary};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ForecastQuery {
    /// Generation time (RFC3339), defaults to now
    #[serde(default)]
    pub at: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastResponse {
    pub series: ErrorSeries,
    pub summary: Option<SeriesSummary>,
}

#[utoipa::path(
    get,
    path = "/api/forecast/{satellite_id}",
    params(
        ("satellite_id" = String, Path, description = "Satellite ID"),
        ForecastQuery
    ),
    responses(
        (status = 200, description = "24 hour error forecast", body = ForecastResponse),
        (status = 400, description = "Invalid generation time", body = ErrorResponse)
    ),
    tag = "forecast"
)]
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(satellite_id): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> ApiResult<Json<ForecastResponse>> {
    let generated_at = match query.at.as_deref() {
        Some(at) => parse_rfc3339(at)?,
        None => Utc::now(),
    };

    let id = SatelliteId::from(satellite_id);
    let series = generate(&id, state.fleet.is_degraded(&id), generated_at);
    let summary = series.summary();

    Ok(Json(ForecastResponse { series, summary }))
}

fn parse_rfc3339(s: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::Validation(format!("invalid time '{}': {}", s, e)))
}
