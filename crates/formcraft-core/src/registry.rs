//! Field behavior registry
//!
//! One lookup from [`FieldKind`] to the kind's behavior record: the settings
//! card shown in the builder, the read-only preview control, the interactive
//! control served to respondents, and the required-value rule. Call sites
//! dispatch through [`behavior`] instead of matching on the kind themselves.

use serde::Serialize;
use serde_json::Value;

use crate::field::{Field, FieldKind};

/// Serializable description of the input widget a client renders for a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    Heading { text: String },
    TextInput { placeholder: &'static str },
    EmailInput { placeholder: &'static str },
    AddressGroup { inputs: [&'static str; 4] },
    PhoneInput { placeholder: &'static str },
    DateInput,
    DateTimeInput,
    Dropdown { options: Vec<String> },
    RadioGroup { options: Vec<String> },
    CheckboxGroup { options: Vec<String> },
    TextArea { rows: u8 },
    ScaleGroup { min: u8, max: u8 },
    Divider,
    PageBreak,
    SignaturePad,
    FileUpload,
    ProductList { options: Vec<String>, price: f64 },
}

/// Settings card rendered in the builder pane for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorCard {
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    pub option_editor: bool,
    pub price_editor: bool,
}

/// Per-kind behavior record.
pub struct FieldBehavior {
    pub kind: FieldKind,
    /// Settings card for the builder.
    pub editor: fn(&Field) -> EditorCard,
    /// Read-only control for the editor's preview tab.
    pub preview: fn(&Field) -> Control,
    /// Interactive control served to respondents.
    pub public: fn(&Field) -> Control,
    /// Required-value rule; returns the error message when unsatisfied.
    pub validate: fn(&Field, Option<&Value>) -> Option<String>,
}

/// Behavior record for a kind. Registry order matches the enum, so the
/// lookup is a direct index.
pub fn behavior(kind: FieldKind) -> &'static FieldBehavior {
    &REGISTRY[kind as usize]
}

fn editor_card(field: &Field) -> EditorCard {
    EditorCard {
        kind: field.kind,
        label: field.label.clone(),
        required: field.required,
        option_editor: field.kind.has_options(),
        price_editor: field.kind.has_price(),
    }
}

fn options_of(field: &Field) -> Vec<String> {
    field.options.clone().unwrap_or_default()
}

/// A value counts as present unless it is absent, null, an empty string, or
/// an empty array.
fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn validate_required(field: &Field, value: Option<&Value>) -> Option<String> {
    if field.required && !is_present(value) {
        Some(format!("{} is required.", field.label))
    } else {
        None
    }
}

/// Structural kinds never fail validation.
fn validate_none(_field: &Field, _value: Option<&Value>) -> Option<String> {
    None
}

fn heading(f: &Field) -> Control {
    Control::Heading { text: f.label.clone() }
}
fn text(_: &Field) -> Control {
    Control::TextInput { placeholder: "Short Text" }
}
fn email(_: &Field) -> Control {
    Control::EmailInput { placeholder: "Enter Email" }
}
fn address(_: &Field) -> Control {
    Control::AddressGroup { inputs: ["Street Address", "City", "State", "Postal Code"] }
}
fn phone(_: &Field) -> Control {
    Control::PhoneInput { placeholder: "Enter Phone Number" }
}
fn date(_: &Field) -> Control {
    Control::DateInput
}
fn appointment(_: &Field) -> Control {
    Control::DateTimeInput
}
fn dropdown(f: &Field) -> Control {
    Control::Dropdown { options: options_of(f) }
}
fn radio(f: &Field) -> Control {
    Control::RadioGroup { options: options_of(f) }
}
fn checkbox(f: &Field) -> Control {
    Control::CheckboxGroup { options: options_of(f) }
}
fn long_text(_: &Field) -> Control {
    Control::TextArea { rows: 4 }
}
fn scale(_: &Field) -> Control {
    Control::ScaleGroup { min: 1, max: 5 }
}
fn divider(_: &Field) -> Control {
    Control::Divider
}
fn page_break(_: &Field) -> Control {
    Control::PageBreak
}
fn signature(_: &Field) -> Control {
    // Placeholder pad; the drawn signature is not functionally captured.
    Control::SignaturePad
}
fn file_upload(_: &Field) -> Control {
    Control::FileUpload
}
fn product_list(f: &Field) -> Control {
    Control::ProductList { options: options_of(f), price: f.price.unwrap_or(0.0) }
}

macro_rules! entry {
    ($kind:ident, $render:ident, $validate:ident) => {
        FieldBehavior {
            kind: FieldKind::$kind,
            editor: editor_card,
            preview: $render,
            public: $render,
            validate: $validate,
        }
    };
}

static REGISTRY: [FieldBehavior; 17] = [
    entry!(Heading, heading, validate_none),
    entry!(Text, text, validate_required),
    entry!(Email, email, validate_required),
    entry!(Address, address, validate_required),
    entry!(Phone, phone, validate_required),
    entry!(Date, date, validate_required),
    entry!(Appointment, appointment, validate_required),
    entry!(Dropdown, dropdown, validate_required),
    entry!(Radio, radio, validate_required),
    entry!(Checkbox, checkbox, validate_required),
    entry!(LongText, long_text, validate_required),
    entry!(Scale, scale, validate_required),
    entry!(Divider, divider, validate_none),
    entry!(PageBreak, page_break, validate_none),
    entry!(Signature, signature, validate_required),
    entry!(FileUpload, file_upload, validate_required),
    entry!(ProductList, product_list, validate_required),
];
