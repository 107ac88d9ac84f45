//! Application Store Service handlers.

use std::sync::Arc;

use admissions_core::models::{NewApplication, PendingCount};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::error::{HttpAppError, ValidatedJson};
use crate::state::StoreState;

/// `POST /applications`: validate, insert, return the stored row with 201.
#[tracing::instrument(skip(state, payload), fields(operation = "create_application"))]
pub async fn create_application(
    State(state): State<Arc<StoreState>>,
    ValidatedJson(payload): ValidatedJson<NewApplication>,
) -> Result<impl IntoResponse, HttpAppError> {
    let record = payload.into_record(Utc::now())?;
    let application = state.applications.create_application(&record).await?;

    tracing::info!(
        application_id = application.id,
        program = %application.program,
        "Application stored"
    );

    Ok((StatusCode::CREATED, Json(application)))
}

/// `GET /applications/count`: number of applications still pending review.
#[tracing::instrument(skip(state), fields(operation = "count_pending"))]
pub async fn count_pending(
    State(state): State<Arc<StoreState>>,
) -> Result<Json<PendingCount>, HttpAppError> {
    let count = state.applications.count_pending().await?;
    Ok(Json(PendingCount { count }))
}
