//! Submission export codec
//!
//! Turns one submission's composite-keyed responses into a flat, tabular
//! record: the leading field-id segment is stripped from each key to recover
//! the human label, object values are flattened one level as
//! `label_subKey`, and arrays pass through. The CSV document covers exactly
//! one submission.

use serde_json::Value;

use crate::form::Submission;
use crate::response::Responses;

/// Drop the leading `{fieldId}_` segment; fall back to the whole key when
/// nothing remains (labels can sanitize to empty).
pub fn recover_label(key: &str) -> &str {
    match key.split_once('_') {
        Some((_, rest)) if !rest.is_empty() => rest,
        _ => key,
    }
}

/// Label-keyed, one-level-flattened view of a response map, in response
/// order. Arrays are passed through unmodified.
pub fn flatten(responses: &Responses) -> Vec<(String, Value)> {
    let mut flat = Vec::with_capacity(responses.len());
    for (key, value) in responses {
        let label = recover_label(key);
        match value {
            Value::Object(entries) => {
                for (sub_key, sub_value) in entries {
                    flat.push((format!("{label}_{sub_key}"), sub_value.clone()));
                }
            }
            other => flat.push((label.to_string(), other.clone())),
        }
    }
    flat
}

/// One CSV document for one submission: a header row of `Email`, the
/// recovered labels, and `Submitted At`, then a single quoted data row.
/// Embedded commas and quotes inside values are not escaped further.
pub fn to_csv(submission: &Submission) -> String {
    let flat = flatten(&submission.responses);

    let mut headers = Vec::with_capacity(flat.len() + 2);
    headers.push("Email".to_string());
    headers.extend(flat.iter().map(|(label, _)| label.clone()));
    headers.push("Submitted At".to_string());

    let mut cells = Vec::with_capacity(flat.len() + 2);
    cells.push(format!("\"{}\"", submission.email));
    cells.extend(flat.iter().map(|(_, value)| format!("\"{}\"", cell(value))));
    cells.push(format!(
        "\"{}\"",
        submission.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    format!("{}\n{}", headers.join(","), cells.join(","))
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(","),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn responses(entries: &[(&str, Value)]) -> Responses {
        entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    #[test]
    fn recover_label_strips_id_segment() {
        assert_eq!(recover_label("f1_Name"), "Name");
        assert_eq!(recover_label("f1_Work_Email"), "Work_Email");
        // Empty-label keys fall back to the full key.
        assert_eq!(recover_label("f1_"), "f1_");
        assert_eq!(recover_label("plain"), "plain");
    }

    #[test]
    fn flatten_expands_objects_one_level() {
        let input = responses(&[
            ("f1_Name", json!("Jo")),
            ("f2_Address", json!({"street": "1 Rd", "city": "X"})),
        ]);
        let flat = flatten(&input);
        let keys: Vec<&str> = flat.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Name", "Address_street", "Address_city"]);
        assert_eq!(flat[1].1, json!("1 Rd"));
    }

    #[test]
    fn flatten_passes_arrays_through() {
        let input = responses(&[("f1_Toppings", json!(["A", "B"]))]);
        let flat = flatten(&input);
        assert_eq!(flat, vec![("Toppings".to_string(), json!(["A", "B"]))]);
    }

    #[test]
    fn csv_has_one_header_row_and_one_data_row() {
        let submission = Submission::new(
            Uuid::new_v4(),
            "jo@example.com".into(),
            responses(&[
                ("f1_Name", json!("Jo")),
                ("f2_Address", json!({"street": "1 Rd", "city": "X"})),
                ("f3_Toppings", json!(["A", "B"])),
            ]),
        );

        let csv = to_csv(&submission);
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        let row = lines.next().unwrap();
        assert!(lines.next().is_none());

        assert_eq!(header, "Email,Name,Address_street,Address_city,Toppings,Submitted At");
        assert!(row.starts_with("\"jo@example.com\",\"Jo\",\"1 Rd\",\"X\",\"A,B\","));
    }

    #[test]
    fn cells_are_quote_wrapped_without_further_escaping() {
        let submission = Submission::new(
            Uuid::new_v4(),
            "jo@example.com".into(),
            responses(&[("f1_Note", json!("contains, comma"))]),
        );
        let csv = to_csv(&submission);
        assert!(csv.contains("\"contains, comma\""));
    }
}
