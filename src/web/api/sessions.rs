use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::carousel::CarouselSlide;
use crate::fleet::{SatelliteId, SatelliteRecord};
use crate::forecast::{ErrorSeries, SeriesSummary};
use crate::session::Session;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

const SESSION_NOT_FOUND: &str = "session_not_found";

/// Everything a dashboard view needs to render its current selection.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    pub selected_satellite_id: SatelliteId,
    pub current_slide_index: usize,
    /// False after a direct selection that the carousel does not show
    pub synchronized: bool,
    pub satellite: Option<SatelliteRecord>,
    pub slides: Vec<CarouselSlide>,
    pub series: ErrorSeries,
    pub summary: Option<SeriesSummary>,
}

impl SessionView {
    fn new(session_id: Uuid, session: &Session) -> Self {
        SessionView {
            session_id,
            selected_satellite_id: session.selected_satellite_id().clone(),
            current_slide_index: session.current_slide_index(),
            synchronized: session.is_synchronized(),
            satellite: session.selected_satellite().cloned(),
            slides: session.carousel().slides().to_vec(),
            series: session.series().clone(),
            summary: session.series().summary(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct JumpRequest {
    pub index: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectRequest {
    pub satellite_id: SatelliteId,
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    responses(
        (status = 201, description = "Session created", body = SessionView),
        (status = 503, description = "Session limit reached", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn create_session(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let mut sessions = state.sessions.lock().await;
    let id = sessions.create(Utc::now())?;
    let session = sessions
        .get(&id)
        .ok_or(ApiError::NotFound(SESSION_NOT_FOUND))?;
    Ok((StatusCode::CREATED, Json(SessionView::new(id, session))))
}

#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session state", body = SessionView),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    let mut sessions = state.sessions.lock().await;
    let session = sessions
        .get_mut(&id, Utc::now())
        .ok_or(ApiError::NotFound(SESSION_NOT_FOUND))?;
    Ok(Json(SessionView::new(id, session)))
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 204, description = "Session closed"),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .sessions
        .lock()
        .await
        .remove(&id)
        .ok_or(ApiError::NotFound(SESSION_NOT_FOUND))?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/previous",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Carousel moved back one slide", body = SessionView),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn navigate_previous(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    with_session(&state, id, |session| {
        session.navigate_previous(Utc::now());
        Ok(())
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/next",
    params(("id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Carousel moved forward one slide", body = SessionView),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn navigate_next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SessionView>> {
    with_session(&state, id, |session| {
        session.navigate_next(Utc::now());
        Ok(())
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/jump",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = JumpRequest,
    responses(
        (status = 200, description = "Carousel moved to slide", body = SessionView),
        (status = 400, description = "Slide index out of range", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn jump_to(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<JumpRequest>,
) -> ApiResult<Json<SessionView>> {
    with_session(&state, id, |session| {
        session.jump_to(request.index, Utc::now())?;
        Ok(())
    })
    .await
}

#[utoipa::path(
    post,
    path = "/api/sessions/{id}/select",
    params(("id" = Uuid, Path, description = "Session ID")),
    request_body = SelectRequest,
    responses(
        (status = 200, description = "Satellite selected; the carousel does not move", body = SessionView),
        (status = 404, description = "Session not found", body = ErrorResponse)
    ),
    tag = "sessions"
)]
pub async fn select_satellite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectRequest>,
) -> ApiResult<Json<SessionView>> {
    with_session(&state, id, |session| {
        session.select_satellite(request.satellite_id, Utc::now());
        Ok(())
    })
    .await
}

async fn with_session<F>(state: &AppState, id: Uuid, apply: F) -> ApiResult<Json<SessionView>>
where
    F: FnOnce(&mut Session) -> ApiResult<()>,
{
    let mut sessions = state.sessions.lock().await;
    let session = sessions
        .get_mut(&id, Utc::now())
        .ok_or(ApiError::NotFound(SESSION_NOT_FOUND))?;
    apply(&mut *session)?;
    Ok(Json(SessionView::new(id, session)))
}
