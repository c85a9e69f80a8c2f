//! Session establishment
//!
//! The browser exchanges a provider access token for the session cookie.
//! The token itself is the session; the cookie only carries it where
//! scripts cannot reach it.

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::session::SESSION_COOKIE;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub access_token: String,
}

/// Validate the provider token and attach it as an httpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = state
        .sessions
        .verify(&req.access_token)
        .ok_or_else(|| ApiError::Auth("No session found.".into()))?;

    tracing::info!(user = %identity.email, "session established");

    let cookie = format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Strict",
        req.access_token
    );
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    ))
}

pub async fn logout() -> impl IntoResponse {
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Strict; Max-Age=0");
    (
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "success": true })),
    )
}
