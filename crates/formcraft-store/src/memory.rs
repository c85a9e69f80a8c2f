//! In-memory repository implementation
//!
//! Both tables live behind one `RwLock` so the (form, email) uniqueness
//! check and the cascade delete are atomic with the writes they guard.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use formcraft_core::{Form, Submission};
use uuid::Uuid;

use crate::{FormRepository, StoreError, SubmissionRepository};

#[derive(Default)]
struct Tables {
    forms: HashMap<Uuid, Form>,
    submissions: HashMap<Uuid, Submission>,
}

/// Single-node store over `RwLock<HashMap>` tables.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FormRepository for MemoryStore {
    async fn save(&self, form: &Form) -> Result<(), StoreError> {
        let mut tables = self.tables.write().unwrap();
        tables.forms.insert(form.id, form.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Form>, StoreError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.forms.get(&id).cloned())
    }

    async fn find_by_url_id(&self, url_id: Uuid) -> Result<Option<Form>, StoreError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.forms.values().find(|f| f.url_id == url_id).cloned())
    }

    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Form>, StoreError> {
        let tables = self.tables.read().unwrap();
        let mut forms: Vec<Form> = tables
            .forms
            .values()
            .filter(|f| f.owner_id == owner_id)
            .cloned()
            .collect();
        forms.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(forms)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().unwrap();
        if tables.forms.remove(&id).is_none() {
            return Err(StoreError::NotFound);
        }
        let before = tables.submissions.len();
        tables.submissions.retain(|_, s| s.form_id != id);
        tracing::debug!(form = %id, cascaded = before - tables.submissions.len(), "deleted form");
        Ok(())
    }
}

#[async_trait]
impl SubmissionRepository for MemoryStore {
    async fn insert(&self, submission: &Submission) -> Result<(), StoreError> {
        let mut tables = self.tables.write().unwrap();
        let duplicate = tables
            .submissions
            .values()
            .any(|s| s.form_id == submission.form_id && s.email == submission.email);
        if duplicate {
            return Err(StoreError::DuplicateEmail);
        }
        tables.submissions.insert(submission.id, submission.clone());
        Ok(())
    }

    async fn find_by_form(&self, form_id: Uuid) -> Result<Vec<Submission>, StoreError> {
        let tables = self.tables.read().unwrap();
        let mut submissions: Vec<Submission> = tables
            .submissions
            .values()
            .filter(|s| s.form_id == form_id)
            .cloned()
            .collect();
        submissions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(submissions)
    }

    async fn count_by_form(&self, form_id: Uuid) -> Result<u64, StoreError> {
        let tables = self.tables.read().unwrap();
        Ok(tables.submissions.values().filter(|s| s.form_id == form_id).count() as u64)
    }
}
