//! Typed analysis records and table validation

use super::{NormalizedTable, Row};
use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Field every row must carry before anything is rendered
pub const SEVERITY_FIELD: &str = "ai_severity_score";

/// Valid AI severity scores
pub const SEVERITY_RANGE: std::ops::RangeInclusive<i64> = 1..=5;

/// One AI-scored adverse event row
///
/// Known fields are typed; anything else the workflow sends is kept in
/// `extra`. Exports write the received rows, not this view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisRecord {
    #[serde(default)]
    pub record_id: Value,

    #[serde(default, deserialize_with = "lenient_text")]
    pub source: Option<String>,

    /// AI severity, 1 (minor) to 5 (life-threatening)
    #[serde(deserialize_with = "severity_score")]
    pub ai_severity_score: i64,

    #[serde(default, deserialize_with = "lenient_text")]
    pub ai_category: Option<String>,

    /// "urgent" and "immediate" mark the urgent set
    #[serde(default, deserialize_with = "lenient_text")]
    pub ai_urgency: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub ai_action: Option<String>,

    #[serde(default)]
    pub ai_confidence: Option<Value>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub pubmed_title: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub pubmed_journal: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub pubmed_authors: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub pubmed_date: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub pubmed_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisRecord {
    /// Record id as display text (empty when absent)
    pub fn id_text(&self) -> String {
        value_text(&self.record_id)
    }

    /// Confidence as display text (empty when absent)
    pub fn confidence_text(&self) -> String {
        self.ai_confidence.as_ref().map(value_text).unwrap_or_default()
    }

    pub fn source_text(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }

    pub fn category_text(&self) -> &str {
        self.ai_category.as_deref().unwrap_or("unknown")
    }

    pub fn urgency_text(&self) -> &str {
        self.ai_urgency.as_deref().unwrap_or("")
    }

    pub fn action_text(&self) -> &str {
        self.ai_action.as_deref().unwrap_or("No action")
    }

    /// True for urgency "urgent" or "immediate"
    pub fn is_urgent(&self) -> bool {
        matches!(self.ai_urgency.as_deref(), Some("urgent" | "immediate"))
    }

    /// Non-empty PubMed title, if any
    pub fn title(&self) -> Option<&str> {
        self.pubmed_title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Render a JSON scalar the way a table cell shows it
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fields deserialized through [`lenient_text`]
const TEXT_FIELDS: [&str; 10] = [
    "source",
    "ai_category",
    "ai_urgency",
    "ai_action",
    "pubmed_title",
    "pubmed_journal",
    "pubmed_authors",
    "pubmed_date",
    "pubmed_id",
    "url",
];

/// Accept strings, numbers and booleans as text; null as absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value) => text_value(value).map_err(de::Error::custom),
        None => Ok(None),
    }
}

/// Accept integers, integral floats and numeric strings inside 1..=5
fn severity_score<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    severity_value(&value).map_err(de::Error::custom)
}

fn text_value(value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        v @ (Value::Number(_) | Value::Bool(_)) => Ok(Some(v.to_string())),
        other => Err(format!("expected text, found {}", kind_of(&other))),
    }
}

fn whole_value(value: &Value) -> Result<i64, String> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    };

    parsed.ok_or_else(|| format!("expected a whole number, found {}", value))
}

fn severity_value(value: &Value) -> Result<i64, String> {
    let score = whole_value(value)?;
    if SEVERITY_RANGE.contains(&score) {
        Ok(score)
    } else {
        Err(format!(
            "severity {} is outside {}..={}",
            score,
            SEVERITY_RANGE.start(),
            SEVERITY_RANGE.end()
        ))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Why a normalized table cannot be rendered
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No data: the workflow returned zero records")]
    Empty,

    #[error("Missing AI analysis columns: no `{field}` in row {row}. Columns: {}", .columns.join(", "))]
    MissingField {
        field: &'static str,
        row: usize,
        columns: Vec<String>,
    },

    #[error("Row {row}: invalid `{field}`: {reason}")]
    InvalidField {
        row: usize,
        field: String,
        reason: String,
    },
}

/// Type every row, rejecting the whole batch on the first problem
pub fn validate(table: &NormalizedTable) -> Result<Vec<AnalysisRecord>, ValidationError> {
    if table.is_empty() {
        return Err(ValidationError::Empty);
    }

    if let Some(row) = table
        .rows
        .iter()
        .position(|r| !r.contains_key(SEVERITY_FIELD))
    {
        return Err(ValidationError::MissingField {
            field: SEVERITY_FIELD,
            row,
            columns: table.columns(),
        });
    }

    table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| type_row(idx, row))
        .collect()
}

fn type_row(idx: usize, row: &Row) -> Result<AnalysisRecord, ValidationError> {
    serde_json::from_value(Value::Object(row.clone())).map_err(|e| ValidationError::InvalidField {
        row: idx,
        field: offending_field(row),
        reason: e.to_string(),
    })
}

/// First field whose value the typed record rejects
fn offending_field(row: &Row) -> String {
    row.iter()
        .find_map(|(key, value)| {
            let bad = if key == SEVERITY_FIELD {
                severity_value(value).is_err()
            } else if TEXT_FIELDS.contains(&key.as_str()) {
                text_value(value.clone()).is_err()
            } else {
                false
            };
            bad.then(|| key.clone())
        })
        .unwrap_or_else(|| SEVERITY_FIELD.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use serde_json::json;

    #[test]
    fn test_validate_types_known_fields() {
        let table = normalize(json!([{
            "record_id": 17,
            "source": "pubmed",
            "ai_severity_score": 4,
            "ai_category": "cardiovascular",
            "ai_urgency": "urgent",
            "ai_action": "Review",
            "ai_confidence": 0.92,
            "pubmed_title": "QT prolongation",
            "pubmed_id": 12345,
            "drug": "ondansetron"
        }]))
        .unwrap();

        let records = validate(&table).unwrap();
        let r = &records[0];
        assert_eq!(r.id_text(), "17");
        assert_eq!(r.ai_severity_score, 4);
        assert_eq!(r.pubmed_id.as_deref(), Some("12345"));
        assert_eq!(r.confidence_text(), "0.92");
        assert!(r.is_urgent());
        assert_eq!(r.title(), Some("QT prolongation"));
        assert_eq!(r.extra.get("drug"), Some(&json!("ondansetron")));
    }

    #[test]
    fn test_severity_accepts_float_and_string_forms() {
        let table = normalize(json!([
            {"ai_severity_score": 3.0},
            {"ai_severity_score": " 5 "},
        ]))
        .unwrap();
        let records = validate(&table).unwrap();
        assert_eq!(records[0].ai_severity_score, 3);
        assert_eq!(records[1].ai_severity_score, 5);
    }

    #[test]
    fn test_empty_table_is_rejected() {
        let table = normalize(json!([])).unwrap();
        assert_eq!(validate(&table), Err(ValidationError::Empty));
    }

    #[test]
    fn test_missing_severity_lists_columns() {
        let table = normalize(json!([
            {"record_id": 1, "ai_severity_score": 2},
            {"record_id": 2, "summary": "no score"},
        ]))
        .unwrap();

        match validate(&table) {
            Err(ValidationError::MissingField {
                field,
                row,
                columns,
            }) => {
                assert_eq!(field, "ai_severity_score");
                assert_eq!(row, 1);
                assert_eq!(columns, vec!["record_id", "ai_severity_score", "summary"]);
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_message_names_columns() {
        let table = normalize(json!({"status": "queued"})).unwrap();
        let err = validate(&table).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("ai_severity_score"));
        assert!(msg.contains("status"));
    }

    #[test]
    fn test_non_numeric_severity_is_invalid() {
        let table = normalize(json!([{"ai_severity_score": "high"}])).unwrap();
        match validate(&table) {
            Err(ValidationError::InvalidField { row, field, .. }) => {
                assert_eq!(row, 0);
                assert_eq!(field, "ai_severity_score");
            }
            other => panic!("expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_severity_outside_scale_is_invalid() {
        for score in [json!(0), json!(6), json!("99"), json!(i64::MAX)] {
            let table = normalize(json!([
                {"ai_severity_score": 3},
                {"ai_severity_score": score},
            ]))
            .unwrap();
            match validate(&table) {
                Err(ValidationError::InvalidField { row, field, reason }) => {
                    assert_eq!(row, 1);
                    assert_eq!(field, "ai_severity_score");
                    assert!(reason.contains("outside 1..=5"), "{}", reason);
                }
                other => panic!("expected InvalidField for {}, got {:?}", score, other),
            }
        }
    }

    #[test]
    fn test_invalid_text_field_is_named() {
        let table = normalize(json!([{"ai_severity_score": 2, "ai_category": ["a", "b"]}])).unwrap();
        match validate(&table) {
            Err(ValidationError::InvalidField { field, .. }) => assert_eq!(field, "ai_category"),
            other => panic!("expected InvalidField, got {:?}", other),
        }
    }

    #[test]
    fn test_urgency_set_is_exact() {
        let table = normalize(json!([
            {"ai_severity_score": 1, "ai_urgency": "immediate"},
            {"ai_severity_score": 1, "ai_urgency": "Urgent"},
            {"ai_severity_score": 1},
        ]))
        .unwrap();
        let records = validate(&table).unwrap();
        let urgent: Vec<bool> = records.iter().map(AnalysisRecord::is_urgent).collect();
        assert_eq!(urgent, vec![true, false, false]);
    }

    #[test]
    fn test_blank_title_is_not_a_title() {
        let table = normalize(json!([{"ai_severity_score": 2, "pubmed_title": "  "}])).unwrap();
        let records = validate(&table).unwrap();
        assert_eq!(records[0].title(), None);
    }
}
