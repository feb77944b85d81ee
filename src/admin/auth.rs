//! Admin Gate
//!
//! HTTP Basic check in front of the upload and admin routes. Stateless: every
//! request is checked on its own, and a rejected request never reaches a handler.

use crate::config::AdminCredentials;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use std::sync::Arc;

pub const REALM: &str = "Basic realm=\"Secure Area\"";

/// Middleware for `axum::middleware::from_fn_with_state`.
pub async fn require_admin(
    State(credentials): State<Arc<AdminCredentials>>,
    request: Request,
    next: Next,
) -> Response {
    if is_authorized(request.headers(), &credentials) {
        return next.run(request).await;
    }

    tracing::warn!(
        "Rejected unauthenticated {} {}",
        request.method(),
        request.uri().path()
    );
    challenge()
}

pub fn is_authorized(headers: &HeaderMap, credentials: &AdminCredentials) -> bool {
    let Some((username, password)) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(decode_basic)
    else {
        return false;
    };

    // Both comparisons always run.
    let username_ok = digest_eq(&username, &credentials.username);
    let password_ok = digest_eq(&password, &credentials.password);
    username_ok && password_ok
}

/// Splits a `Basic <base64(user:pass)>` header value into its two halves.
pub fn decode_basic(value: &str) -> Option<(String, String)> {
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

/// Compares fixed-length digests instead of the raw strings.
fn digest_eq(given: &str, expected: &str) -> bool {
    Sha256::digest(given.as_bytes()) == Sha256::digest(expected.as_bytes())
}

fn challenge() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, HeaderValue::from_static(REALM))],
        "Unauthorized",
    )
        .into_response()
}
