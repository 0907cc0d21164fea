use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::error::AuthError;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: serde_json::Number,
}

/// Read the `exp` claim of a JWT without verifying its signature.
///
/// Only the payload segment is inspected; the server remains the authority
/// on whether the token is actually valid.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>, AuthError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => {
            return Err(AuthError::MalformedToken(
                "expected three dot-separated segments".to_string(),
            ))
        }
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::MalformedToken(format!("payload is not base64url: {}", e)))?;

    let claims: Claims = serde_json::from_slice(&bytes)
        .map_err(|e| AuthError::MalformedToken(format!("payload is not a claims object: {}", e)))?;

    let exp = claims
        .exp
        .as_i64()
        .or_else(|| claims.exp.as_f64().map(|secs| secs as i64))
        .ok_or_else(|| AuthError::MalformedToken("exp is not a timestamp".to_string()))?;

    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::MalformedToken(format!("exp {} is out of range", exp)))
}

/// True when less than `threshold` remains before `expiry`
pub fn needs_refresh(expiry: DateTime<Utc>, now: DateTime<Utc>, threshold: Duration) -> bool {
    expiry.signed_duration_since(now) < threshold
}
