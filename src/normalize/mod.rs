//! Response normalizer
//!
//! The workflow has answered in three different shapes over time, so the
//! decoded payload is first classified into a [`ResponseShape`] and then
//! flattened into one row-oriented table:
//!
//! - `{"records": [...], "outputs": {...}}` → rows + metadata
//! - `[...]`                               → rows, no metadata
//! - anything else                         → a single wrapped row
//!
//! A payload that arrives as a JSON *string* is decoded first and then
//! classified again. Typing and validation of the rows lives in [`records`].

pub mod records;

use serde_json::{Map, Value};
use thiserror::Error;

pub use records::{validate, AnalysisRecord, ValidationError, SEVERITY_FIELD};

/// One untyped row of the normalized table
pub type Row = Map<String, Value>;

/// Key a wrapped scalar row is stored under
const WRAPPED_VALUE_KEY: &str = "value";

/// Failure to decode a string payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("Parse error: {0}")]
    Parse(String),
}

/// The accepted payload shapes
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// Object carrying a `records` key, with optional `outputs`
    Envelope { records: Value, outputs: Option<Value> },
    /// Bare array of rows
    Rows(Vec<Value>),
    /// Anything else, kept whole as one row
    Wrapped(Value),
}

impl ResponseShape {
    /// Classify a decoded payload, decoding string payloads first
    pub fn classify(value: Value) -> Result<Self, NormalizeError> {
        match value {
            Value::String(text) => {
                let decoded: Value = serde_json::from_str(&text)
                    .map_err(|e| NormalizeError::Parse(e.to_string()))?;
                Self::classify(decoded)
            }
            Value::Object(mut map) if map.contains_key("records") => {
                let records = map.remove("records").unwrap_or(Value::Null);
                let outputs = map.remove("outputs");
                Ok(ResponseShape::Envelope { records, outputs })
            }
            Value::Array(items) => Ok(ResponseShape::Rows(items)),
            other => Ok(ResponseShape::Wrapped(other)),
        }
    }

    /// Flatten into a table
    pub fn into_table(self) -> NormalizedTable {
        match self {
            ResponseShape::Envelope { records, outputs } => {
                let rows = match records {
                    Value::Array(items) => items.into_iter().map(into_row).collect(),
                    Value::Null => Vec::new(),
                    single => vec![into_row(single)],
                };
                let outputs = match outputs {
                    Some(Value::Object(map)) => map,
                    _ => Map::new(),
                };
                NormalizedTable { rows, outputs }
            }
            ResponseShape::Rows(items) => NormalizedTable {
                rows: items.into_iter().map(into_row).collect(),
                outputs: Map::new(),
            },
            ResponseShape::Wrapped(value) => NormalizedTable {
                rows: vec![into_row(value)],
                outputs: Map::new(),
            },
        }
    }
}

fn into_row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => {
            let mut row = Map::new();
            row.insert(WRAPPED_VALUE_KEY.to_string(), other);
            row
        }
    }
}

/// Uniform tabular form of a workflow response
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedTable {
    /// Rows in the order the workflow returned them
    pub rows: Vec<Row>,
    /// Auxiliary `outputs` metadata (empty unless the envelope carried one)
    pub outputs: Map<String, Value>,
}

impl NormalizedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Union of row keys in first-seen order
    pub fn columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = Vec::new();
        for row in &self.rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        columns
    }
}

/// Normalize a decoded payload into a table
pub fn normalize(value: Value) -> Result<NormalizedTable, NormalizeError> {
    let shape = ResponseShape::classify(value)?;
    let table = shape.into_table();
    tracing::debug!(
        "Normalized response: {} rows, {} output keys",
        table.len(),
        table.outputs.len()
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(values: &[Value]) -> Vec<Row> {
        values
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn test_envelope_keeps_rows_and_outputs() {
        let payload = json!({
            "records": [
                {"record_id": 1, "ai_severity_score": 5},
                {"record_id": 2, "ai_severity_score": 1},
            ],
            "outputs": {"email_sent": true}
        });

        let table = normalize(payload).unwrap();
        assert_eq!(
            table.rows,
            rows(&[
                json!({"record_id": 1, "ai_severity_score": 5}),
                json!({"record_id": 2, "ai_severity_score": 1}),
            ])
        );
        assert_eq!(Value::Object(table.outputs), json!({"email_sent": true}));
    }

    #[test]
    fn test_envelope_without_outputs_has_empty_metadata() {
        let table = normalize(json!({"records": [{"a": 1}]})).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.outputs.is_empty());
    }

    #[test]
    fn test_bare_array_becomes_rows() {
        let payload = json!([{"a": 1}, {"a": 2}, {"a": 3}]);
        let table = normalize(payload).unwrap();
        assert_eq!(
            table.rows,
            rows(&[json!({"a": 1}), json!({"a": 2}), json!({"a": 3})])
        );
        assert!(table.outputs.is_empty());
    }

    #[test]
    fn test_bare_object_is_wrapped_as_one_row() {
        let payload = json!({"record_id": "X", "ai_severity_score": 4});
        let table = normalize(payload.clone()).unwrap();
        assert_eq!(table.rows, rows(&[payload]));
        assert!(table.outputs.is_empty());
    }

    #[test]
    fn test_string_payload_is_decoded_first() {
        let payload = Value::String(r#"{"records": [{"a": 1}], "outputs": {"k": "v"}}"#.into());
        let table = normalize(payload).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.outputs.get("k"), Some(&json!("v")));
    }

    #[test]
    fn test_invalid_string_payload_is_parse_error() {
        let err = normalize(Value::String("not json {".into())).unwrap_err();
        assert!(matches!(err, NormalizeError::Parse(_)));
        assert!(err.to_string().starts_with("Parse error"));
    }

    #[test]
    fn test_scalar_rows_are_wrapped() {
        let table = normalize(json!([1, {"a": 2}])).unwrap();
        assert_eq!(table.rows[0].get("value"), Some(&json!(1)));
        assert_eq!(table.columns(), vec!["value".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_null_records_yield_empty_table() {
        let table = normalize(json!({"records": null})).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_classify_shapes() {
        assert!(matches!(
            ResponseShape::classify(json!({"records": []})).unwrap(),
            ResponseShape::Envelope { .. }
        ));
        assert!(matches!(
            ResponseShape::classify(json!([])).unwrap(),
            ResponseShape::Rows(_)
        ));
        assert!(matches!(
            ResponseShape::classify(json!(42)).unwrap(),
            ResponseShape::Wrapped(_)
        ));
    }
}
