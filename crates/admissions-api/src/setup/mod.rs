//! Application setup and initialization
//!
//! Builds the router of each service from its configuration. The binaries only load
//! the configuration, call one of these and hand the router to [`server::start_server`].

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use std::sync::Arc;
use std::time::Duration;

use admissions_api_client::ApiClient;
use admissions_core::{GatewayConfig, LogFormat, StoreServiceConfig};
use admissions_db::ApplicationRepository;
use anyhow::{Context, Result};
use axum::Router;

use crate::services::submission::SubmissionService;
use crate::state::{GatewayState, StoreState};

/// Initialize the Application Store Service: telemetry, database, routes.
pub async fn initialize_store(config: &StoreServiceConfig) -> Result<Router> {
    init_telemetry(config.base.log_format)?;
    tracing::info!(
        environment = %config.base.environment,
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(config).await?;
    let state = Arc::new(StoreState::new(Arc::new(ApplicationRepository::new(pool))));

    routes::store_routes(&config.base, state, config.max_body_bytes)
}

/// Initialize the Submission Gateway: telemetry, upload storage, store client, routes.
pub async fn initialize_gateway(config: &GatewayConfig) -> Result<Router> {
    init_telemetry(config.base.log_format)?;
    tracing::info!(
        environment = %config.base.environment,
        store_service_url = %config.store_service_url,
        "Configuration loaded and validated successfully"
    );

    let storage = storage::setup_storage(config).await?;
    let client = ApiClient::new(
        config.store_service_url.clone(),
        Duration::from_secs(config.store_service_timeout_secs),
    )
    .context("Failed to create Store Service client")?;

    let state = Arc::new(GatewayState::new(
        SubmissionService::new(storage, client),
        config.max_body_bytes,
    ));

    routes::gateway_routes(
        &config.base,
        state,
        &config.upload_dir,
        &config.upload_public_prefix,
    )
}

fn init_telemetry(format: LogFormat) -> Result<()> {
    crate::telemetry::init_telemetry(format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))
}
