//! Public surface: anonymous form fetch and submission admission

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use formcraft_core::{find_email, Form, Responses, Submission};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/:url_id", get(fetch))
}

/// Anonymous fetch by the public sharing token.
pub async fn fetch(
    State(state): State<AppState>,
    Path(url_id): Path<Uuid>,
) -> Result<Json<Form>, ApiError> {
    state
        .forms
        .find_by_url_id(url_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Form not found.".into()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub url_id: Uuid,
    pub responses: Responses,
}

/// Submission admission: resolve the form, locate the respondent email by
/// schema scan, and insert. The store rejects a duplicate (form, email)
/// pair at insert time.
pub async fn submit(
    State(state): State<AppState>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(req) = body.map_err(|_| {
        ApiError::Validation("Invalid request: Form ID and responses are required.".into())
    })?;

    let form = state
        .forms
        .find_by_url_id(req.url_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Form not found.".into()))?;

    let email = find_email(&form.fields, &req.responses)
        .ok_or_else(|| ApiError::Validation("Submission requires a valid email field.".into()))?
        .to_string();

    let submission = Submission::new(form.id, email, req.responses);
    state.submissions.insert(&submission).await?;

    tracing::info!(form = %form.id, submission = %submission.id, "submission accepted");
    Ok(Json(json!({ "message": "Form submitted successfully." })))
}
