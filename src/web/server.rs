use axum::{routing::get, routing::post, Router};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::session::SessionReaper;

use super::api::fleet as fleet_handlers;
use super::api::forecast as forecast_handlers;
use super::api::sessions as session_handlers;
use super::api_doc::ApiDoc;
use super::config::{Config, ConfigError};
use super::state::AppState;
use super::ui::handlers as ui_handlers;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn router(state: AppState) -> Router {
    let static_dir = state.config.web.static_dir.clone();
    if !static_dir.is_dir() {
        log::warn!(
            "Static directory {} not found, images will not load",
            static_dir.display()
        );
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::dashboard))
        .route("/timeline", get(ui_handlers::timeline))
        // Fleet and forecast
        .route("/api/fleet", get(fleet_handlers::list_fleet))
        .route(
            "/api/forecast/{satellite_id}",
            get(forecast_handlers::get_forecast),
        )
        // Dashboard sessions
        .route("/api/sessions", post(session_handlers::create_session))
        .route(
            "/api/sessions/{id}",
            get(session_handlers::get_session).delete(session_handlers::delete_session),
        )
        .route(
            "/api/sessions/{id}/previous",
            post(session_handlers::navigate_previous),
        )
        .route(
            "/api/sessions/{id}/next",
            post(session_handlers::navigate_next),
        )
        .route("/api/sessions/{id}/jump", post(session_handlers::jump_to))
        .route(
            "/api/sessions/{id}/select",
            post(session_handlers::select_satellite),
        )
        // Static files
        .nest_service("/static", ServeDir::new(static_dir))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    let fleet = config.load_fleet()?;
    log::info!("Serving forecasts for {} satellites", fleet.len());

    let idle_timeout = config.sessions.idle_timeout;
    let sweep_interval = config.sessions.sweep_interval;
    let state = AppState::new(config, fleet);
    let reaper = SessionReaper::start(state.sessions.clone(), idle_timeout, sweep_interval);

    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    reaper.stop().await;
    log::info!("Server stopped");
    served?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}
