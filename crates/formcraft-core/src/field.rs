//! Field schema model
//!
//! A [`Field`] is one configurable input unit within a form: a kind drawn
//! from a fixed palette, a label, a required flag, and kind-specific
//! attributes. The composite response key derived by [`response_key`] is the
//! single source of truth for how a field's answer is stored, validated, and
//! recovered during export.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fixed palette of recognized field kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Heading,
    Text,
    Email,
    Address,
    Phone,
    Date,
    Appointment,
    Dropdown,
    Radio,
    Checkbox,
    LongText,
    Scale,
    Divider,
    PageBreak,
    Signature,
    FileUpload,
    ProductList,
}

impl FieldKind {
    /// Every kind, in palette order. Indexing matches the enum discriminants.
    pub const ALL: [FieldKind; 17] = [
        FieldKind::Heading,
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Address,
        FieldKind::Phone,
        FieldKind::Date,
        FieldKind::Appointment,
        FieldKind::Dropdown,
        FieldKind::Radio,
        FieldKind::Checkbox,
        FieldKind::LongText,
        FieldKind::Scale,
        FieldKind::Divider,
        FieldKind::PageBreak,
        FieldKind::Signature,
        FieldKind::FileUpload,
        FieldKind::ProductList,
    ];

    /// Kinds that carry an ordered options list.
    pub fn has_options(self) -> bool {
        matches!(
            self,
            FieldKind::Dropdown | FieldKind::Radio | FieldKind::Checkbox | FieldKind::ProductList
        )
    }

    /// Kinds that carry a unit price.
    pub fn has_price(self) -> bool {
        matches!(self, FieldKind::ProductList)
    }

    /// Structural kinds that collect no respondent data and are exempt from
    /// required checks.
    pub fn is_static(self) -> bool {
        matches!(self, FieldKind::Heading | FieldKind::Divider | FieldKind::PageBreak)
    }

    /// Kinds whose response value is an array (multi-select).
    pub fn collects_array(self) -> bool {
        matches!(self, FieldKind::Checkbox)
    }

    /// Palette display title, also used for default labels.
    pub fn title(self) -> &'static str {
        match self {
            FieldKind::Heading => "Heading",
            FieldKind::Text => "Short Text",
            FieldKind::Email => "Email",
            FieldKind::Address => "Address",
            FieldKind::Phone => "Phone",
            FieldKind::Date => "Date Picker",
            FieldKind::Appointment => "Appointment",
            FieldKind::Dropdown => "Dropdown",
            FieldKind::Radio => "Single Choice",
            FieldKind::Checkbox => "Multiple Choice",
            FieldKind::LongText => "Long Text",
            FieldKind::Scale => "Scale Rating",
            FieldKind::Divider => "Divider",
            FieldKind::PageBreak => "Page Break",
            FieldKind::Signature => "Signature",
            FieldKind::FileUpload => "File Upload",
            FieldKind::ProductList => "Product List",
        }
    }
}

/// One configurable input unit within a form's schema.
///
/// Invariant: `options` is present iff the kind is choice-like and `price`
/// is present iff the kind is `product_list`. [`Field::normalize`] restores
/// the invariant after any kind change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Editor-only upload preview reference; never persisted.
    #[serde(skip)]
    pub preview: Option<String>,
}

impl Field {
    /// A fresh field with a generated id, default label, and kind-appropriate
    /// default attributes.
    pub fn new(kind: FieldKind) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            kind,
            label: format!("Untitled {}", kind.title()),
            required: false,
            options: kind.has_options().then(|| vec![String::new()]),
            price: kind.has_price().then_some(0.0),
            preview: None,
        }
    }

    /// Merge a partial attribute patch into this field.
    ///
    /// A kind change normalizes the attributes afterwards so the
    /// options/price invariant holds under every editor operation.
    pub fn apply(&mut self, patch: FieldPatch) {
        let kind_changed = patch.kind.is_some_and(|k| k != self.kind);
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = patch.options {
            self.options = Some(options);
        }
        if let Some(price) = patch.price {
            self.price = Some(price);
        }
        if let Some(preview) = patch.preview {
            self.preview = Some(preview);
        }
        if kind_changed {
            self.normalize();
            tracing::debug!(field = %self.id, kind = ?self.kind, "normalized attributes after kind change");
        }
    }

    /// Clear attributes the kind does not support and seed missing defaults.
    pub fn normalize(&mut self) {
        if self.kind.has_options() {
            if self.options.is_none() {
                self.options = Some(vec![String::new()]);
            }
        } else {
            self.options = None;
        }
        if self.kind.has_price() {
            if self.price.is_none() {
                self.price = Some(0.0);
            }
        } else {
            self.price = None;
        }
    }
}

/// Partial field update accepted by the editor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldPatch {
    #[serde(rename = "type")]
    pub kind: Option<FieldKind>,
    pub label: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub price: Option<f64>,
    #[serde(skip)]
    pub preview: Option<String>,
}

/// Composite key under which a field's response value is stored.
///
/// `{id}_{sanitized label}`. The same derivation is used when collecting
/// responses, keying validation errors, and recovering labels during export;
/// the three must never drift apart.
pub fn response_key(field: &Field) -> String {
    format!("{}_{}", field.id, sanitize_label(&field.label))
}

/// Whitespace runs become a single underscore; anything outside
/// `[A-Za-z0-9_-]` is dropped.
fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_space = false;
    for ch in label.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            in_space = false;
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
                out.push(ch);
            }
        }
    }
    out
}
