//! Form CRUD endpoints, scoped to the caller's identity

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use formcraft_core::{require_email_field, Field, Form, FormSummary};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::session::Identity;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_forms).post(create_form))
        .route("/submit", post(super::share::submit))
        .route("/submissions", get(super::submissions::list_grouped))
        .route("/:id", get(get_form).put(update_form).delete(delete_form))
}

#[derive(Deserialize)]
pub struct FormContent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<Field>,
}

impl FormContent {
    /// Shared save precondition: non-blank title and at least one email
    /// field, checked before persistence is attempted.
    fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation(
                "Invalid input. Title and fields are required.".into(),
            ));
        }
        require_email_field(&self.fields).map_err(|e| ApiError::Validation(e.to_string()))
    }
}

/// Caller's forms, newest first, each with a computed submission count.
pub async fn list_forms(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<FormSummary>>, ApiError> {
    let forms = state.forms.find_by_owner(identity.sub).await?;

    let mut summaries = Vec::with_capacity(forms.len());
    for form in &forms {
        let count = state.submissions.count_by_form(form.id).await?;
        summaries.push(FormSummary::of(form, count));
    }
    Ok(Json(summaries))
}

pub async fn create_form(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(content): Json<FormContent>,
) -> Result<(StatusCode, Json<Form>), ApiError> {
    content.validate()?;

    let form = Form::new(identity.sub, content.title, content.description, content.fields);
    state.forms.save(&form).await?;

    tracing::info!(form = %form.id, owner = %identity.sub, "form created");
    Ok((StatusCode::CREATED, Json(form)))
}

pub async fn get_form(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<Form>, ApiError> {
    let form = owned_form(&state, &identity, id).await?;
    Ok(Json(form))
}

/// Whole-document replace of title, description, and fields.
pub async fn update_form(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
    Json(content): Json<FormContent>,
) -> Result<Json<serde_json::Value>, ApiError> {
    content.validate()?;

    let mut form = owned_form(&state, &identity, id).await?;
    form.replace_content(content.title, content.description, content.fields);
    state.forms.save(&form).await?;

    Ok(Json(json!({ "message": "Form updated successfully." })))
}

/// Delete the form; its submissions go with it.
pub async fn delete_form(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    owned_form(&state, &identity, id).await?;
    state.forms.delete(id).await?;

    tracing::info!(form = %id, "form deleted");
    Ok(Json(json!({ "message": "Form deleted successfully." })))
}

/// Fetch a form the caller owns; anything else is a 404, never a hint that
/// the id exists under another owner.
async fn owned_form(state: &AppState, identity: &Identity, id: Uuid) -> Result<Form, ApiError> {
    state
        .forms
        .find_by_id(id)
        .await?
        .filter(|form| form.owner_id == identity.sub)
        .ok_or_else(|| ApiError::NotFound("Form not found.".into()))
}
