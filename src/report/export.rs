//! CSV / JSON / text exports of a stored analysis

use super::summary::SummaryReport;
use super::Threshold;
use crate::normalize::records::value_text;
use crate::normalize::Row;
use crate::session::AnalysisResult;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// The three downloadable artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Csv,
    Json,
    Summary,
}

impl ExportKind {
    pub const ALL: [ExportKind; 3] = [ExportKind::Csv, ExportKind::Json, ExportKind::Summary];

    pub fn label(&self) -> &'static str {
        match self {
            ExportKind::Csv => "CSV",
            ExportKind::Json => "JSON",
            ExportKind::Summary => "Summary Report",
        }
    }

    /// Timestamped file name, minute resolution
    pub fn file_name(&self, at: NaiveDateTime) -> String {
        let stamp = at.format("%Y%m%d_%H%M");
        match self {
            ExportKind::Csv => format!("fda_results_{}.csv", stamp),
            ExportKind::Json => format!("fda_results_{}.json", stamp),
            ExportKind::Summary => format!("summary_{}.txt", stamp),
        }
    }

    pub fn render(
        &self,
        result: &AnalysisResult,
        threshold: Threshold,
        contact: &str,
        at: NaiveDateTime,
    ) -> Result<String> {
        match self {
            ExportKind::Csv => to_csv(&result.rows),
            ExportKind::Json => to_json(&result.rows),
            ExportKind::Summary => Ok(SummaryReport::new(result, threshold, contact, at).render()),
        }
    }
}

/// One line per row; header is the union of columns in first-seen order
pub fn to_csv(rows: &[Row]) -> Result<String> {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&columns)
        .context("Failed to write CSV header")?;
    for row in rows {
        let cells = columns
            .iter()
            .map(|c| row.get(*c).map(value_text).unwrap_or_default());
        writer
            .write_record(cells)
            .context("Failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

/// Pretty JSON array of the rows as received (2-space indent)
pub fn to_json(rows: &[Row]) -> Result<String> {
    serde_json::to_string_pretty(rows).context("Failed to serialize records to JSON")
}

/// Write all three exports into `dir`, creating it if needed
pub fn write_exports(
    dir: &Path,
    result: &AnalysisResult,
    threshold: Threshold,
    contact: &str,
    at: NaiveDateTime,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {:?}", dir))?;

    let mut written = Vec::with_capacity(ExportKind::ALL.len());
    for kind in ExportKind::ALL {
        let path = dir.join(kind.file_name(at));
        let content = kind.render(result, threshold, contact, at)?;
        std::fs::write(&path, content).with_context(|| format!("Failed to write {:?}", path))?;
        tracing::info!("Exported {} to {}", kind.label(), path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::trigger::AnalysisRequest;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn result_from(response: Value) -> AnalysisResult {
        let table = normalize(response.clone()).unwrap();
        let request = AnalysisRequest::new(table.rows.len() as u32);
        AnalysisResult::from_table(table, request, response, Duration::from_secs(4)).unwrap()
    }

    fn result() -> AnalysisResult {
        result_from(json!([
            {"record_id": "A-1", "source": "cadec", "ai_severity_score": 4, "ai_category": "cardiac, QT"},
            {"record_id": 2, "source": "pubmed", "ai_severity_score": 2, "pubmed_title": "Study", "drug": "x"},
        ]))
    }

    fn at() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2026-02-03 14:07", "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(ExportKind::Csv.file_name(at()), "fda_results_20260203_1407.csv");
        assert_eq!(ExportKind::Json.file_name(at()), "fda_results_20260203_1407.json");
        assert_eq!(ExportKind::Summary.file_name(at()), "summary_20260203_1407.txt");
    }

    #[test]
    fn test_csv_header_is_column_union() {
        let csv = to_csv(&result().rows).unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert_eq!(
            header,
            "record_id,source,ai_severity_score,ai_category,pubmed_title,drug"
        );
        // Embedded comma is quoted
        assert_eq!(lines.next().unwrap(), "A-1,cadec,4,\"cardiac, QT\",,");
        assert_eq!(lines.next().unwrap(), "2,pubmed,2,,Study,x");
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_json_export_reparses_to_same_rows() {
        // Coercible values and a missing record_id must survive untouched
        let original = result_from(json!([
            {"source": "pubmed", "ai_severity_score": "5", "pubmed_id": 12345},
            {"record_id": 2, "ai_severity_score": 3.0, "zeta": 1, "alpha": 2},
        ]));
        let text = to_json(&original.rows).unwrap();
        assert!(text.starts_with("[\n  {"));

        let decoded: Value = serde_json::from_str(&text).unwrap();
        let again = normalize(decoded).unwrap();
        assert_eq!(again.rows, original.rows);

        let keys: Vec<&str> = again.rows[1].keys().map(String::as_str).collect();
        assert_eq!(keys, ["record_id", "ai_severity_score", "zeta", "alpha"]);
    }

    #[test]
    fn test_csv_does_not_invent_columns() {
        let r = result_from(json!([
            {"source": "pubmed", "ai_severity_score": "5", "pubmed_id": 12345},
        ]));
        let csv = to_csv(&r.rows).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), "source,ai_severity_score,pubmed_id");
        assert_eq!(lines.next().unwrap(), "pubmed,5,12345");
    }

    #[test]
    fn test_write_exports_creates_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out");

        let paths =
            write_exports(&target, &result(), Threshold::default(), "ops@example.org", at()).unwrap();
        assert_eq!(paths.len(), 3);
        for path in &paths {
            assert!(path.exists());
        }
        let summary = std::fs::read_to_string(&paths[2]).unwrap();
        assert!(summary.contains("TOTAL RECORDS ANALYZED: 2"));
    }
}
