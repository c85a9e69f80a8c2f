//! Per-form grouped submission listing

use axum::extract::State;
use axum::{Extension, Json};
use formcraft_core::Submission;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::session::Identity;
use crate::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSubmissions {
    pub form_id: Uuid,
    pub form_title: String,
    pub submissions: Vec<Submission>,
}

/// All of the caller's forms with their submissions, grouped per form.
pub async fn list_grouped(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<Vec<FormSubmissions>>, ApiError> {
    let forms = state.forms.find_by_owner(identity.sub).await?;

    let mut grouped = Vec::with_capacity(forms.len());
    for form in forms {
        let submissions = state.submissions.find_by_form(form.id).await?;
        grouped.push(FormSubmissions {
            form_id: form.id,
            form_title: form.title,
            submissions,
        });
    }
    Ok(Json(grouped))
}
