//! Route configuration and setup

use std::path::Path;
use std::sync::Arc;

use admissions_core::BaseConfig;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{any, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::map_response_body::MapResponseBodyLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::constants::{
    APPLICATIONS_COUNT_PATH, APPLICATIONS_PATH, HEALTH_PATH, READY_PATH, SESSION_PATH,
    SUBMIT_APPLICATION_PATH,
};
use crate::handlers::{applications, health, session, submission};
use crate::state::{GatewayState, StoreState};

/// Routes of the Application Store Service.
pub fn store_routes(
    config: &BaseConfig,
    state: Arc<StoreState>,
    max_body_bytes: usize,
) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route(APPLICATIONS_PATH, post(applications::create_application))
        .route(APPLICATIONS_COUNT_PATH, get(applications::count_pending))
        .route(HEALTH_PATH, get(health::liveness_check))
        .route(READY_PATH, get(health::readiness_check))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(MapResponseBodyLayer::new(axum::body::Body::new))
                .layer(RequestBodyLimitLayer::new(max_body_bytes))
                .layer(DefaultBodyLimit::disable()),
        );

    Ok(app)
}

/// Routes of the Submission Gateway. Stored uploads are served under `upload_prefix`.
///
/// The submission handler enforces its own body cap while streaming, so no request
/// body limit layer is applied here.
pub fn gateway_routes(
    config: &BaseConfig,
    state: Arc<GatewayState>,
    upload_dir: &Path,
    upload_prefix: &str,
) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let app = Router::new()
        .route(SUBMIT_APPLICATION_PATH, any(submission::submit_application))
        .route(SESSION_PATH, get(session::session_status))
        .route(HEALTH_PATH, get(health::liveness_check))
        .with_state(state)
        .nest_service(upload_prefix, ServeDir::new(upload_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        );

    Ok(app)
}

/// Setup CORS configuration
fn setup_cors(config: &BaseConfig) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.allows_any_origin() {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", o))
            })
            .collect::<Result<Vec<_>, _>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}
