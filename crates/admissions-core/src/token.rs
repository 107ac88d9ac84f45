//! Bearer token expiry check.
//!
//! Tokens have the shape `header.payload.signature`. Only the payload is inspected, for
//! its `exp` claim (Unix seconds). The signature is never verified: this answers "should
//! the client still treat itself as logged in", not "who is this".
//!
//! Every decode failure is reported as expired.

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TokenClaims {
    /// Seconds since the epoch. Issuers occasionally emit fractional values.
    exp: f64,
}

/// Returns `true` when the token is malformed or its `exp` is not in the future.
pub fn is_token_expired(token: &str) -> bool {
    is_token_expired_at(token, chrono::Utc::now().timestamp_millis())
}

/// Same as [`is_token_expired`] with an explicit clock, in epoch milliseconds.
pub fn is_token_expired_at(token: &str, now_ms: i64) -> bool {
    let Some(claims) = decode_claims(token) else {
        return true;
    };
    (now_ms as f64) >= claims.exp * 1000.0
}

fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        tracing::debug!("Token rejected: expected three dot-separated segments");
        return None;
    };

    let payload_bytes = decode_segment(payload)?;
    match serde_json::from_slice::<TokenClaims>(&payload_bytes) {
        Ok(claims) => Some(claims),
        Err(e) => {
            tracing::debug!(error = %e, "Token rejected: payload is not a JSON object with numeric exp");
            None
        }
    }
}

/// JWTs use unpadded base64url; browsers' `atob` only takes the standard alphabet, so
/// tokens minted by other issuers may use either.
fn decode_segment(segment: &str) -> Option<Vec<u8>> {
    let trimmed = segment.trim_end_matches('=');
    general_purpose::URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| general_purpose::STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| tracing::debug!(error = %e, "Token rejected: payload is not base64"))
        .ok()
}
