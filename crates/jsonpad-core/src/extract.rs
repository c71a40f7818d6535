//! Field extraction over array-of-objects documents.
//!
//! Pure transform: given an array-rooted JSON payload and a field selection,
//! project the selected fields out of every element into a new array. With
//! `flatten` enabled, object-valued fields contribute their own keys one
//! level deep as `"field.subkey"` columns.

use crate::document::DocumentContent;
use crate::error::{JsonpadError, Result};
use serde_json::{Map, Value};

/// Default field selection for a document: the key set of the first element
/// when the content parses to a non-empty array of objects, empty otherwise.
pub fn default_fields(content: &DocumentContent) -> Vec<String> {
    let Ok(value) = content.to_value() else {
        return Vec::new();
    };
    match value {
        Value::Array(items) => match items.first() {
            Some(Value::Object(obj)) => obj.keys().cloned().collect(),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Projects `fields` out of every element of an array-rooted payload.
///
/// Elements are expected to be objects; fields missing from an element are
/// simply omitted from its output. Non-object elements produce an empty
/// output object.
///
/// # Errors
///
/// - [`JsonpadError::Json`] if raw text content is not valid JSON
/// - [`JsonpadError::Format`] if the parsed root is not an array
pub fn extract(content: &DocumentContent, fields: &[String], flatten: bool) -> Result<Value> {
    let value = content.to_value()?;
    let Value::Array(items) = value else {
        return Err(JsonpadError::format("JSON root must be an array"));
    };

    let rows = items
        .iter()
        .map(|item| Value::Object(extract_row(item, fields, flatten)))
        .collect();
    Ok(Value::Array(rows))
}

fn extract_row(item: &Value, fields: &[String], flatten: bool) -> Map<String, Value> {
    let mut row = Map::new();
    let Value::Object(obj) = item else {
        return row;
    };
    for field in fields {
        match obj.get(field) {
            Some(Value::Object(nested)) if flatten => {
                for (subkey, subvalue) in nested {
                    row.insert(format!("{}.{}", field, subkey), subvalue.clone());
                }
            }
            Some(value) => {
                row.insert(field.clone(), value.clone());
            }
            None => {}
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_fields_from_first_element() {
        let content = DocumentContent::text(r#"[{"a": 1, "b": 2}, {"c": 3}]"#);
        assert_eq!(default_fields(&content), vec!["a", "b"]);
    }

    #[test]
    fn test_default_fields_empty_for_non_array_or_empty() {
        assert!(default_fields(&DocumentContent::text(r#"{"a": 1}"#)).is_empty());
        assert!(default_fields(&DocumentContent::text("[]")).is_empty());
        assert!(default_fields(&DocumentContent::text("[1, 2]")).is_empty());
        assert!(default_fields(&DocumentContent::text("not json")).is_empty());
    }

    #[test]
    fn test_extract_with_flatten_expands_nested_objects() {
        let content = DocumentContent::json(json!([{"a": 1, "b": {"c": 2}}]));
        let out = extract(&content, &fields(&["a", "b"]), true).unwrap();
        assert_eq!(out, json!([{"a": 1, "b.c": 2}]));
    }

    #[test]
    fn test_extract_without_flatten_copies_raw_values() {
        let content = DocumentContent::json(json!([{"a": 1, "b": {"c": 2}}]));
        let out = extract(&content, &fields(&["a", "b"]), false).unwrap();
        assert_eq!(out, json!([{"a": 1, "b": {"c": 2}}]));
    }

    #[test]
    fn test_extract_omits_missing_fields() {
        let content = DocumentContent::json(json!([{"a": 1}, {"b": 2}]));
        let out = extract(&content, &fields(&["a", "b"]), false).unwrap();
        assert_eq!(out, json!([{"a": 1}, {"b": 2}]));
    }

    #[test]
    fn test_extract_non_object_elements_become_empty_rows() {
        let content = DocumentContent::json(json!([{"a": 1}, 7, "x"]));
        let out = extract(&content, &fields(&["a"]), false).unwrap();
        assert_eq!(out, json!([{"a": 1}, {}, {}]));
    }

    #[test]
    fn test_extract_rejects_non_array_root() {
        let content = DocumentContent::json(json!({"a": 1}));
        let err = extract(&content, &fields(&["a"]), false).unwrap_err();
        assert!(matches!(err, JsonpadError::Format(_)));
    }

    #[test]
    fn test_extract_rejects_malformed_text() {
        let content = DocumentContent::text("{oops");
        let err = extract(&content, &fields(&["a"]), false).unwrap_err();
        assert!(matches!(err, JsonpadError::Json { .. }));
    }

    #[test]
    fn test_flatten_only_descends_one_level() {
        let content = DocumentContent::json(json!([{"b": {"c": {"d": 1}}}]));
        let out = extract(&content, &fields(&["b"]), true).unwrap();
        assert_eq!(out, json!([{"b.c": {"d": 1}}]));
    }
}
