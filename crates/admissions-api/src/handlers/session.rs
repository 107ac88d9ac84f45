//! Bearer-token session check.

use admissions_core::is_token_expired;
use axum::{
    http::{header, HeaderMap},
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionStatus {
    pub authenticated: bool,
}

/// `GET /api/session`: whether the bearer token is still usable. Never fails; a missing,
/// malformed or expired token is simply not authenticated.
pub async fn session_status(headers: HeaderMap) -> Json<SessionStatus> {
    let authenticated = bearer_token(&headers).is_some_and(|token| !is_token_expired(token));
    Json(SessionStatus { authenticated })
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    Some(token.trim()).filter(|t| !t.is_empty())
}
