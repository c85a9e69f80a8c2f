//! Response collection and validation
//!
//! Respondent values are stored under composite keys derived by
//! [`response_key`]; validation errors use the same keys. Validation is
//! dual-triggered: per field on blur, whole-form before submit.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::field::{response_key, Field, FieldKind};
use crate::registry::behavior;
use crate::{Result, SchemaError};

/// Composite key to response value, in insertion (display) order.
pub type Responses = serde_json::Map<String, Value>;

/// In-flight answer set for one respondent filling out a form.
#[derive(Debug, Default)]
pub struct ResponseSet {
    values: Responses,
    errors: BTreeMap<String, String>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &Responses {
        &self.values
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Store a value under the field's composite key. A value that now
    /// satisfies the field's rule clears any recorded error for it.
    pub fn set_response(&mut self, field: &Field, value: Value) {
        let key = response_key(field);
        if (behavior(field.kind).validate)(field, Some(&value)).is_none() {
            self.errors.remove(&key);
        }
        self.values.insert(key, value);
    }

    /// Blur-time check for one field; records or clears its error and
    /// returns the message when invalid.
    pub fn validate_field(&mut self, field: &Field) -> Option<String> {
        let key = response_key(field);
        match (behavior(field.kind).validate)(field, self.values.get(&key)) {
            Some(message) => {
                self.errors.insert(key, message.clone());
                Some(message)
            }
            None => {
                self.errors.remove(&key);
                None
            }
        }
    }

    /// Submit-time check across the whole form. Rebuilds the error map and
    /// returns true when every field passes.
    pub fn validate_all(&mut self, fields: &[Field]) -> bool {
        self.errors.clear();
        for field in fields {
            let key = response_key(field);
            if let Some(message) = (behavior(field.kind).validate)(field, self.values.get(&key)) {
                self.errors.insert(key, message);
            }
        }
        self.errors.is_empty()
    }

    /// Responses ready for submission: empty-object artifacts are dropped
    /// from array values (unchecked checkbox rows).
    pub fn cleaned(&self) -> Responses {
        self.values
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    Value::Array(items) => Value::Array(
                        items
                            .iter()
                            .filter(|item| !matches!(item, Value::Object(map) if map.is_empty()))
                            .cloned()
                            .collect(),
                    ),
                    other => other.clone(),
                };
                (key.clone(), value)
            })
            .collect()
    }
}

/// At least one email field must exist before a form can be saved.
pub fn require_email_field(fields: &[Field]) -> Result<()> {
    if fields.iter().any(|f| f.kind == FieldKind::Email) {
        Ok(())
    } else {
        Err(SchemaError::MissingEmailField)
    }
}

/// Respondent email located by schema scan: the first email field whose
/// composite key holds a non-empty string. Robust to field reordering,
/// unlike a first-entry positional convention.
pub fn find_email<'a>(fields: &[Field], responses: &'a Responses) -> Option<&'a str> {
    fields
        .iter()
        .filter(|f| f.kind == FieldKind::Email)
        .find_map(|f| responses.get(&response_key(f)).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
}
