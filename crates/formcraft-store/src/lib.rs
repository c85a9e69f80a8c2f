//! Repository ports for FormCraft
//!
//! The relational store is an external collaborator; handlers only see these
//! traits. The in-memory implementation in [`memory`] backs tests and
//! single-node deployments.

use async_trait::async_trait;
use formcraft_core::{Form, Submission};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;

pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    /// Uniqueness violation on (form, email).
    #[error("a submission for this email already exists")]
    DuplicateEmail,

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Form persistence port.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// Insert or whole-document replace.
    async fn save(&self, form: &Form) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Form>, StoreError>;

    /// Lookup by the public sharing token.
    async fn find_by_url_id(&self, url_id: Uuid) -> Result<Option<Form>, StoreError>;

    /// Owner's forms, newest first.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Form>, StoreError>;

    /// Delete the form and cascade to its submissions.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Submission persistence port.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert-only; a second submission for the same (form, email) pair is
    /// rejected with [`StoreError::DuplicateEmail`]. The uniqueness check
    /// and the insert happen in one critical section.
    async fn insert(&self, submission: &Submission) -> Result<(), StoreError>;

    async fn find_by_form(&self, form_id: Uuid) -> Result<Vec<Submission>, StoreError>;

    async fn count_by_form(&self, form_id: Uuid) -> Result<u64, StoreError>;
}
