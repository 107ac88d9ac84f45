//! Submission Gateway entry point.

use std::sync::Arc;

use admissions_core::constants::SUBMISSION_ACCEPTED_MESSAGE;
use admissions_core::AppError;
use admissions_processing::{parse_boundary, MultipartError, MultipartExtractor};
use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::error::HttpAppError;
use crate::state::GatewayState;

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

/// Accept a `multipart/form-data` application form and forward it to the store.
///
/// Bound for every method: anything but POST is answered with 405 before the body is read.
#[tracing::instrument(skip_all, fields(method = %method))]
pub async fn submit_application(
    State(state): State<Arc<GatewayState>>,
    method: Method,
    headers: HeaderMap,
    body: Body,
) -> Result<impl IntoResponse, HttpAppError> {
    if method != Method::POST {
        return Err(AppError::MethodNotAllowed.into());
    }

    if declared_length(&headers).is_some_and(|len| len > state.max_body_bytes as u64) {
        return Err(MultipartError::BodyTooLarge {
            limit: state.max_body_bytes,
        }
        .into());
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let boundary = parse_boundary(content_type)?;

    let form = MultipartExtractor::new(state.max_body_bytes)
        .extract(body.into_data_stream(), boundary)
        .await?;
    state.submission.submit(form).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: SUBMISSION_ACCEPTED_MESSAGE,
        }),
    ))
}

fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}
