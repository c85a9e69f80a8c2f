//! FormCraft form-builder core
//!
//! Domain model for the form builder: the field schema (a fixed palette of
//! field kinds with per-kind attributes), editor operations over an ordered
//! field sequence, a behavior registry that maps each kind to its rendering
//! and validation strategy, composite-key response collection, and the CSV
//! export codec.
//!
//! Everything here is pure logic; persistence and HTTP live in the
//! `formcraft-store` and `formcraft-api` crates.

use thiserror::Error;

pub mod codec;
pub mod editor;
pub mod field;
pub mod form;
pub mod registry;
pub mod response;

pub use editor::FormEditor;
pub use field::{response_key, Field, FieldKind, FieldPatch};
pub use form::{Form, FormSummary, Submission};
pub use registry::{behavior, Control, EditorCard, FieldBehavior};
pub use response::{find_email, require_email_field, ResponseSet, Responses};

/// Schema-level failures surfaced by the editor and save-time checks.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("The form must contain at least one email field.")]
    MissingEmailField,

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("reorder index {index} out of range for {len} fields")]
    ReorderOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
