//! Form editor operations
//!
//! Mutates an ordered field sequence: add, partial update, delete, reorder.
//! Save-time precondition: the sequence must contain at least one email
//! field, checked here before persistence is ever attempted.

use crate::field::{Field, FieldKind, FieldPatch};
use crate::form::Form;
use crate::registry::{behavior, Control, EditorCard};
use crate::response::require_email_field;
use crate::{Result, SchemaError};

/// Editing state for one form: title, description, ordered fields.
#[derive(Debug, Clone)]
pub struct FormEditor {
    pub title: String,
    pub description: String,
    fields: Vec<Field>,
}

impl Default for FormEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FormEditor {
    pub fn new() -> Self {
        Self {
            title: "Untitled Form".into(),
            description: String::new(),
            fields: Vec::new(),
        }
    }

    /// Load an existing form into the editor.
    pub fn from_form(form: &Form) -> Self {
        Self {
            title: form.title.clone(),
            description: form.description.clone(),
            fields: form.fields.clone(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }

    /// Append a new field of the given kind; returns its generated id.
    pub fn add_field(&mut self, kind: FieldKind) -> String {
        let field = Field::new(kind);
        let id = field.id.clone();
        self.fields.push(field);
        id
    }

    /// Merge a partial attribute patch into the matching field.
    pub fn update_field(&mut self, id: &str, patch: FieldPatch) -> Result<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| SchemaError::FieldNotFound(id.to_string()))?;
        field.apply(patch);
        Ok(())
    }

    /// Remove by identifier; unknown ids are a no-op.
    pub fn delete_field(&mut self, id: &str) {
        self.fields.retain(|f| f.id != id);
    }

    /// Move one field from `source` to `destination` within the sequence.
    /// Equal indices are a no-op.
    pub fn reorder(&mut self, source: usize, destination: usize) -> Result<()> {
        let len = self.fields.len();
        if source >= len {
            return Err(SchemaError::ReorderOutOfRange { index: source, len });
        }
        if destination >= len {
            return Err(SchemaError::ReorderOutOfRange { index: destination, len });
        }
        if source == destination {
            return Ok(());
        }
        let field = self.fields.remove(source);
        self.fields.insert(destination, field);
        Ok(())
    }

    /// Save precondition: at least one email field must exist.
    pub fn validate_for_save(&self) -> Result<()> {
        require_email_field(&self.fields)
    }

    /// Settings cards for the builder pane, one per field in order.
    pub fn editor_cards(&self) -> Vec<EditorCard> {
        self.fields.iter().map(|f| (behavior(f.kind).editor)(f)).collect()
    }

    /// Read-only preview controls, one per field in order.
    pub fn preview(&self) -> Vec<Control> {
        self.fields.iter().map(|f| (behavior(f.kind).preview)(f)).collect()
    }
}
