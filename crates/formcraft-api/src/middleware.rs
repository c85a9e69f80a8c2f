//! Session check at the request boundary
//!
//! Paths outside the public prefixes require a valid session token, taken
//! from the `Authorization: Bearer` header or the session cookie. The
//! verified identity is stored in request extensions for handlers.

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;

use crate::error::ApiError;
use crate::session::SESSION_COOKIE;
use crate::AppState;

/// Prefixes reachable without a session: auth exchange, public share
/// fetch, respondent submission, and the liveness probe.
const PUBLIC_PREFIXES: &[&str] = &["/auth", "/api/share", "/api/forms/submit", "/health"];

pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path();
    if path == "/" || PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(req.headers()).or_else(|| cookie_token(req.headers()));
    let identity = token
        .and_then(|t| state.sessions.verify(&t))
        .ok_or_else(|| ApiError::Auth("Unauthorized: No session found".into()))?;

    tracing::debug!(user = %identity.email, path, "session verified");
    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}
