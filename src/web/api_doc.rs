use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::forecast::ForecastResponse;
use super::api::sessions::{JumpRequest, SelectRequest, SessionView};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::fleet::list_fleet,
        super::api::forecast::get_forecast,
        super::api::sessions::create_session,
        super::api::sessions::get_session,
        super::api::sessions::delete_session,
        super::api::sessions::navigate_previous,
        super::api::sessions::navigate_next,
        super::api::sessions::jump_to,
        super::api::sessions::select_satellite,
    ),
    components(
        schemas(
            ForecastResponse,
            SessionView,
            JumpRequest,
            SelectRequest,
            ErrorResponse,
            crate::fleet::SatelliteId,
            crate::fleet::SatelliteRecord,
            crate::fleet::SatelliteStatus,
            crate::forecast::ErrorSeries,
            crate::forecast::ErrorSample,
            crate::forecast::Confidence,
            crate::forecast::RiskLevel,
            crate::forecast::SeriesSummary,
            crate::carousel::CarouselSlide,
        )
    ),
    info(
        title = "Sat-O-Scope API",
        description = "Satellite clock and ephemeris error forecasts and dashboard selection sessions",
        version = "0.1.0"
    ),
    tags(
        (name = "fleet", description = "Fleet registry"),
        (name = "forecast", description = "Synthetic error forecasts"),
        (name = "sessions", description = "Dashboard carousel and selection state")
    )
)]
pub struct ApiDoc;
