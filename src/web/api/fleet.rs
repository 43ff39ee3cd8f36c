use axum::{extract::State, Json};

use crate::fleet::SatelliteRecord;
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/fleet",
    responses(
        (status = 200, description = "Satellites in fleet order", body = Vec<SatelliteRecord>)
    ),
    tag = "fleet"
)]
pub async fn list_fleet(State(state): State<AppState>) -> Json<Vec<SatelliteRecord>> {
    Json(state.fleet.records().to_vec())
}
