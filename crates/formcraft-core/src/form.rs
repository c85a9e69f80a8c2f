//! Form and submission records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::field::Field;
use crate::response::Responses;

/// A saved form: owner-scoped metadata plus the ordered field sequence.
///
/// Field order is meaningful; it is both the display order and the storage
/// order. `url_id` is the public sharing token granting anonymous
/// read/submit access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub fields: Vec<Field>,
    pub url_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Form {
    pub fn new(owner_id: Uuid, title: String, description: String, fields: Vec<Field>) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title,
            description,
            fields,
            url_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }

    /// Whole-document replace of the editable parts.
    pub fn replace_content(&mut self, title: String, description: String, fields: Vec<Field>) {
        self.title = title;
        self.description = description;
        self.fields = fields;
    }
}

/// Dashboard row: form metadata plus a computed submission count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub url_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub submission_count: u64,
    pub fields: Vec<Field>,
}

impl FormSummary {
    pub fn of(form: &Form, submission_count: u64) -> Self {
        Self {
            id: form.id,
            title: form.title.clone(),
            description: form.description.clone(),
            url_id: form.url_id,
            created_at: form.created_at,
            submission_count,
            fields: form.fields.clone(),
        }
    }
}

/// One respondent's completed answer set for a form.
///
/// `email` is denormalized out of `responses` at admission time; `responses`
/// maps composite keys to string, object, or array values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Uuid,
    pub form_id: Uuid,
    pub email: String,
    pub responses: Responses,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(form_id: Uuid, email: String, responses: Responses) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_id,
            email,
            responses,
            created_at: Utc::now(),
        }
    }
}
