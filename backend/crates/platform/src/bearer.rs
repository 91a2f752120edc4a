//! Bearer Token Extraction
//!
//! Reads the credential from `Authorization: Bearer <token>`.

use axum::http::{HeaderMap, header};

/// Authentication scheme expected in the `Authorization` header
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract a bearer token from headers
///
/// The scheme is matched case-insensitively. Returns `None` when the header
/// is absent, not valid ASCII, uses another scheme, or carries an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

/// Build an `Authorization` header value for a token
pub fn bearer_value(token: &str) -> String {
    format!("{} {}", BEARER_SCHEME, token)
}
