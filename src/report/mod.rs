//! Presentation model derived from a stored analysis
//!
//! Everything here is a pure function of `(&AnalysisResult, Threshold)`:
//! the TUI redraws from it every frame and the exporters reuse it, so the
//! same stored result always yields the same figures.

pub mod export;
pub mod summary;

use crate::normalize::AnalysisRecord;
use crate::session::AnalysisResult;
use crate::util::percent;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Fixed per-record analysis cost (USD)
pub const COST_PER_RECORD: f64 = 0.002;

/// Rough wall-clock estimate shown before a run
pub const EST_SECS_PER_RECORD: u64 = 2;

/// PubMed risk bands; independent of the user's critical threshold
pub const HIGH_RISK_SEVERITY: i64 = 4;
pub const MODERATE_RISK_SEVERITY: i64 = 3;

/// Critical alert cards previewed before "+N more"
pub const CRITICAL_PREVIEW: usize = 2;

/// Cases listed in the urgent summary
pub const URGENT_TOP: usize = 5;

/// Validated per-record timings of the workflow at different batch sizes
pub const BENCHMARK: [(u32, f64); 5] = [(1, 3.94), (10, 2.39), (30, 3.04), (50, 2.46), (100, 1.93)];

// ─────────────────────────────────────────────────────────────────────────────
// Threshold
// ─────────────────────────────────────────────────────────────────────────────

/// Critical severity threshold: one of 3, 4, 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Threshold(u8);

impl Threshold {
    pub const CHOICES: [u8; 3] = [3, 4, 5];

    /// Accepts only 3, 4 or 5
    pub fn new(value: u8) -> Option<Self> {
        Self::CHOICES.contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> i64 {
        self.0 as i64
    }

    /// Cycle 3 → 4 → 5 → 3
    pub fn next(self) -> Self {
        match self.0 {
            3 => Self(4),
            4 => Self(5),
            _ => Self(3),
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(4)
    }
}

impl std::fmt::Display for Threshold {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Source classification
// ─────────────────────────────────────────────────────────────────────────────

/// Closed set of data sources the dashboard breaks down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Cadec,
    Fda,
    Pubmed,
    Other,
}

impl SourceKind {
    /// "cadec" substring, then "fda"/"medwatch" substring, then exact "pubmed"
    pub fn classify(source: &str) -> Self {
        let lower = source.to_lowercase();
        if lower.contains("cadec") {
            SourceKind::Cadec
        } else if lower.contains("fda") || lower.contains("medwatch") {
            SourceKind::Fda
        } else if source == "pubmed" {
            SourceKind::Pubmed
        } else {
            SourceKind::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Cadec => "CADEC",
            SourceKind::Fda => "FDA",
            SourceKind::Pubmed => "PubMed",
            SourceKind::Other => "Other",
        }
    }

    /// What each record of this source represents
    pub fn noun(&self) -> &'static str {
        match self {
            SourceKind::Cadec => "Patient Reports",
            SourceKind::Fda => "Safety Alerts",
            SourceKind::Pubmed => "Research Articles",
            SourceKind::Other => "Unclassified",
        }
    }
}

/// Counts for the three published buckets. Unclassified rows are left
/// out, so the three counts may sum to less than the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceMix {
    pub cadec: usize,
    pub fda: usize,
    pub pubmed: usize,
}

impl SourceMix {
    pub fn count(records: &[AnalysisRecord]) -> Self {
        let mut mix = Self::default();
        for record in records {
            match record.source.as_deref().map(SourceKind::classify) {
                Some(SourceKind::Cadec) => mix.cadec += 1,
                Some(SourceKind::Fda) => mix.fda += 1,
                Some(SourceKind::Pubmed) => mix.pubmed += 1,
                _ => {}
            }
        }
        mix
    }

    pub fn get(&self, kind: SourceKind) -> usize {
        match kind {
            SourceKind::Cadec => self.cadec,
            SourceKind::Fda => self.fda,
            SourceKind::Pubmed => self.pubmed,
            SourceKind::Other => 0,
        }
    }
}

/// True when any record carries a source tag at all
pub fn has_sources(records: &[AnalysisRecord]) -> bool {
    records.iter().any(|r| r.source.is_some())
}

// ─────────────────────────────────────────────────────────────────────────────
// Scalar metrics
// ─────────────────────────────────────────────────────────────────────────────

/// Headline figures for one stored result at one threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub threshold: Threshold,
    pub critical: usize,
    pub urgent: usize,
    pub mean_severity: f64,
    pub elapsed_secs: f64,
    /// Elapsed seconds per record; 0 for an empty result
    pub per_record_secs: f64,
    pub cost: f64,
}

impl Summary {
    pub fn compute(result: &AnalysisResult, threshold: Threshold) -> Self {
        let records = &result.records;
        let total = records.len();
        let elapsed_secs = result.elapsed_secs();

        Self {
            total,
            threshold,
            critical: critical_rows(records, threshold).len(),
            urgent: urgent_rows(records).len(),
            mean_severity: mean_severity(records),
            elapsed_secs,
            per_record_secs: if total == 0 {
                0.0
            } else {
                elapsed_secs / total as f64
            },
            cost: total as f64 * COST_PER_RECORD,
        }
    }

    pub fn critical_pct(&self) -> f64 {
        percent(self.critical, self.total)
    }

    pub fn urgent_pct(&self) -> f64 {
        percent(self.urgent, self.total)
    }
}

/// Mean severity; 0 for no records
pub fn mean_severity(records: &[AnalysisRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let sum: i64 = records.iter().map(|r| r.ai_severity_score).sum();
    sum as f64 / records.len() as f64
}

/// Pre-run estimate shown in the sidebar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub secs: u64,
    pub cost: f64,
    pub ai_calls: u32,
}

impl Estimate {
    pub fn for_count(record_count: u32) -> Self {
        Self {
            secs: record_count as u64 * EST_SECS_PER_RECORD,
            cost: record_count as f64 * COST_PER_RECORD,
            ai_calls: record_count,
        }
    }

    pub fn minutes(&self) -> f64 {
        self.secs as f64 / 60.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sets and distributions
// ─────────────────────────────────────────────────────────────────────────────

/// Rows at or above the threshold, in table order
pub fn critical_rows(records: &[AnalysisRecord], threshold: Threshold) -> Vec<&AnalysisRecord> {
    records
        .iter()
        .filter(|r| r.ai_severity_score >= threshold.value())
        .collect()
}

/// Rows tagged "urgent" or "immediate", in table order
pub fn urgent_rows(records: &[AnalysisRecord]) -> Vec<&AnalysisRecord> {
    records.iter().filter(|r| r.is_urgent()).collect()
}

/// Count per severity value, ascending by severity
pub fn severity_distribution(records: &[AnalysisRecord]) -> Vec<(i64, usize)> {
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.ai_severity_score).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}

/// Most common severity; ties go to the smallest value
pub fn severity_mode(distribution: &[(i64, usize)]) -> Option<(i64, usize)> {
    distribution.iter().fold(None, |best, &(severity, count)| match best {
        Some((_, best_count)) if best_count >= count => best,
        _ => Some((severity, count)),
    })
}

/// Count per category in order of first occurrence (missing categories skipped)
pub fn category_distribution(records: &[AnalysisRecord]) -> Vec<(String, usize)> {
    count_in_first_seen_order(records.iter().filter_map(|r| r.ai_category.as_deref()))
}

/// Count per urgency tag in order of first occurrence
pub fn urgency_distribution(records: &[AnalysisRecord]) -> Vec<(String, usize)> {
    count_in_first_seen_order(records.iter().filter_map(|r| r.ai_urgency.as_deref()))
}

fn count_in_first_seen_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(k, _)| k == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value.to_string(), 1)),
        }
    }
    counts
}

/// Same entries sorted by descending count; ties keep their order
pub fn by_count_desc(entries: &[(String, usize)]) -> Vec<(String, usize)> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

// ─────────────────────────────────────────────────────────────────────────────
// PubMed
// ─────────────────────────────────────────────────────────────────────────────

/// Severity band shown on PubMed article cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    High,
    Moderate,
    Low,
}

impl RiskBand {
    pub fn from_severity(severity: i64) -> Self {
        if severity >= HIGH_RISK_SEVERITY {
            RiskBand::High
        } else if severity >= MODERATE_RISK_SEVERITY {
            RiskBand::Moderate
        } else {
            RiskBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::High => "HIGH",
            RiskBand::Moderate => "MODERATE",
            RiskBand::Low => "LOW",
        }
    }
}

/// Rows whose source is exactly "pubmed"
pub fn pubmed_rows(records: &[AnalysisRecord]) -> Vec<&AnalysisRecord> {
    records
        .iter()
        .filter(|r| r.source.as_deref() == Some("pubmed"))
        .collect()
}

/// PubMed rows with a non-empty title, paired with their risk band
pub fn pubmed_articles(records: &[AnalysisRecord]) -> Vec<(&AnalysisRecord, RiskBand)> {
    pubmed_rows(records)
        .into_iter()
        .filter(|r| r.title().is_some())
        .map(|r| (r, RiskBand::from_severity(r.ai_severity_score)))
        .collect()
}

/// Header figures for the PubMed tab (over all PubMed rows)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PubmedStats {
    pub articles: usize,
    pub mean_severity: f64,
    pub high_risk: usize,
}

impl PubmedStats {
    pub fn compute(records: &[AnalysisRecord]) -> Self {
        let rows = pubmed_rows(records);
        let mean = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|r| r.ai_severity_score).sum::<i64>() as f64 / rows.len() as f64
        };
        Self {
            articles: rows.len(),
            mean_severity: mean,
            high_risk: rows
                .iter()
                .filter(|r| r.ai_severity_score >= HIGH_RISK_SEVERITY)
                .count(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Alert previews
// ─────────────────────────────────────────────────────────────────────────────

/// Discord-style card for one critical record
pub fn critical_alert_card(record: &AnalysisRecord) -> String {
    format!(
        "🚨 CRITICAL ADVERSE EVENT\n\n\
         Severity: {}/5\n\
         Category: {}\n\n\
         Action: {}\n\n\
         Confidence: {}\n\n\
         ⚡ IMMEDIATE REVIEW REQUIRED",
        record.ai_severity_score,
        record.category_text(),
        record.action_text(),
        record.confidence_text()
    )
}

/// Urgent rows ranked by severity (highest first, ties in table order)
pub fn top_urgent(records: &[AnalysisRecord], n: usize) -> Vec<&AnalysisRecord> {
    let mut urgent = urgent_rows(records);
    urgent.sort_by(|a, b| b.ai_severity_score.cmp(&a.ai_severity_score));
    urgent.truncate(n);
    urgent
}

/// Summary message the workflow posts for urgent cases; None when there are none
pub fn urgent_summary(records: &[AnalysisRecord], now: NaiveDateTime) -> Option<String> {
    let urgent_total = urgent_rows(records).len();
    if urgent_total == 0 {
        return None;
    }

    let mut text = format!(
        "🚨 URGENT ALERTS ({} total)\n⏰ {}\n\nTop {} Cases:\n",
        urgent_total,
        now.format("%m/%d/%Y, %I:%M %p"),
        URGENT_TOP
    );
    for (i, record) in top_urgent(records, URGENT_TOP).iter().enumerate() {
        text.push_str(&format!(
            "{}. Severity {}/5 | {}\n",
            i + 1,
            record.ai_severity_score,
            record.category_text()
        ));
    }
    if urgent_total > URGENT_TOP {
        text.push_str(&format!("\n+{} more\n", urgent_total - URGENT_TOP));
    }
    text.push_str("\n⚡ REVIEW REQUIRED");
    Some(text)
}

/// Request and raw response of a stored run, pretty-printed
pub fn run_details(result: &AnalysisResult, webhook_url: &str) -> String {
    let request = serde_json::json!({
        "record_count": result.request.record_count,
        "triggered_by": result.request.triggered_by,
    });
    format!(
        "📤 Request\nPOST {}\n{:#}\n\n📥 Response\n{:#}",
        webhook_url, request, result.response
    )
}

/// Output key the workflow sets after mailing the report
pub const EMAIL_SENT_OUTPUT: &str = "email_sent";

/// Notice for the report the workflow mails with the full dataset
///
/// None only when the workflow explicitly reports `email_sent: false`.
pub fn email_notice(result: &AnalysisResult, contact: &str) -> Option<String> {
    if result.outputs.get(EMAIL_SENT_OUTPUT) == Some(&serde_json::Value::Bool(false)) {
        return None;
    }
    Some(format!(
        "📧 Email sent to {}: report with {} records attached as JSON",
        contact,
        result.len()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, validate};
    use crate::trigger::AnalysisRequest;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn records(rows: Value) -> Vec<AnalysisRecord> {
        validate(&normalize(rows).unwrap()).unwrap()
    }

    fn result(rows: Value, secs: u64) -> AnalysisResult {
        let table = normalize(rows.clone()).unwrap();
        let request = AnalysisRequest::new(table.rows.len() as u32);
        AnalysisResult::from_table(table, request, rows, Duration::from_secs(secs)).unwrap()
    }

    fn t(v: u8) -> Threshold {
        Threshold::new(v).unwrap()
    }

    #[test]
    fn test_threshold_choices() {
        assert!(Threshold::new(2).is_none());
        assert!(Threshold::new(6).is_none());
        assert_eq!(Threshold::default().value(), 4);
        assert_eq!(t(3).next(), t(4));
        assert_eq!(t(5).next(), t(3));
    }

    #[test]
    fn test_classify_sources() {
        assert_eq!(SourceKind::classify("CADEC"), SourceKind::Cadec);
        assert_eq!(SourceKind::classify("fda_alert"), SourceKind::Fda);
        assert_eq!(SourceKind::classify("MedWatch"), SourceKind::Fda);
        assert_eq!(SourceKind::classify("pubmed"), SourceKind::Pubmed);
        // PubMed match is exact and case-sensitive
        assert_eq!(SourceKind::classify("PubMed"), SourceKind::Other);
        assert_eq!(SourceKind::classify("unknown"), SourceKind::Other);
    }

    #[test]
    fn test_source_mix_excludes_unknown() {
        let rows = records(json!([
            {"ai_severity_score": 1, "source": "CADEC"},
            {"ai_severity_score": 1, "source": "fda_alert"},
            {"ai_severity_score": 1, "source": "pubmed"},
            {"ai_severity_score": 1, "source": "unknown"},
        ]));
        let mix = SourceMix::count(&rows);
        assert_eq!(
            mix,
            SourceMix {
                cadec: 1,
                fda: 1,
                pubmed: 1
            }
        );
        assert_eq!(mix.cadec + mix.fda + mix.pubmed, 3);
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_summary_for_5_5_1() {
        let r = result(
            json!([
                {"ai_severity_score": 5, "ai_urgency": "urgent"},
                {"ai_severity_score": 5, "ai_urgency": "routine"},
                {"ai_severity_score": 1, "ai_urgency": "immediate"},
            ]),
            9,
        );
        let s = Summary::compute(&r, t(4));
        assert_eq!(s.total, 3);
        assert_eq!(s.critical, 2);
        assert_eq!(s.urgent, 2);
        assert!((s.mean_severity - 3.67).abs() < 0.01);
        assert!((s.per_record_secs - 3.0).abs() < f64::EPSILON);
        assert!((s.cost - 0.006).abs() < 1e-9);
        assert_eq!(format!("{:.1}", s.critical_pct()), "66.7");
    }

    #[test]
    fn test_critical_count_tracks_threshold() {
        let r = result(
            json!([
                {"ai_severity_score": 3},
                {"ai_severity_score": 4},
                {"ai_severity_score": 5},
                {"ai_severity_score": 2},
            ]),
            1,
        );
        let counts: Vec<usize> = Threshold::CHOICES
            .iter()
            .map(|&v| Summary::compute(&r, t(v)).critical)
            .collect();
        assert_eq!(counts, vec![3, 2, 1]);
    }

    #[test]
    fn test_per_record_zero_for_empty_result() {
        let r = AnalysisResult {
            records: Vec::new(),
            rows: Vec::new(),
            outputs: Default::default(),
            request: AnalysisRequest::new(1),
            response: json!([]),
            elapsed: Duration::from_secs(5),
        };
        let s = Summary::compute(&r, Threshold::default());
        assert_eq!(s.per_record_secs, 0.0);
        assert_eq!(s.critical_pct(), 0.0);
        assert_eq!(s.mean_severity, 0.0);
    }

    #[test]
    fn test_severity_distribution_and_mode() {
        let rows = records(json!([
            {"ai_severity_score": 4},
            {"ai_severity_score": 2},
            {"ai_severity_score": 4},
            {"ai_severity_score": 2},
            {"ai_severity_score": 5},
        ]));
        let dist = severity_distribution(&rows);
        assert_eq!(dist, vec![(2, 2), (4, 2), (5, 1)]);
        // Tie between 2 and 4 resolves to the smaller severity
        assert_eq!(severity_mode(&dist), Some((2, 2)));
        assert_eq!(severity_mode(&[]), None);
    }

    #[test]
    fn test_category_distribution_orders() {
        let rows = records(json!([
            {"ai_severity_score": 1, "ai_category": "hepatic"},
            {"ai_severity_score": 1, "ai_category": "cardiac"},
            {"ai_severity_score": 1, "ai_category": "cardiac"},
            {"ai_severity_score": 1},
            {"ai_severity_score": 1, "ai_category": "renal"},
        ]));
        let dist = category_distribution(&rows);
        assert_eq!(
            dist,
            vec![
                ("hepatic".to_string(), 1),
                ("cardiac".to_string(), 2),
                ("renal".to_string(), 1),
            ]
        );
        assert_eq!(
            by_count_desc(&dist),
            vec![
                ("cardiac".to_string(), 2),
                ("hepatic".to_string(), 1),
                ("renal".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(RiskBand::from_severity(5), RiskBand::High);
        assert_eq!(RiskBand::from_severity(4), RiskBand::High);
        assert_eq!(RiskBand::from_severity(3), RiskBand::Moderate);
        assert_eq!(RiskBand::from_severity(2), RiskBand::Low);
        assert_eq!(RiskBand::from_severity(3).label(), "MODERATE");
    }

    #[test]
    fn test_pubmed_articles_need_titles() {
        let rows = records(json!([
            {"ai_severity_score": 4, "source": "pubmed", "pubmed_title": "A"},
            {"ai_severity_score": 2, "source": "pubmed"},
            {"ai_severity_score": 5, "source": "cadec", "pubmed_title": "B"},
        ]));
        let articles = pubmed_articles(&rows);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].1, RiskBand::High);

        let stats = PubmedStats::compute(&rows);
        assert_eq!(stats.articles, 2);
        assert_eq!(stats.high_risk, 1);
        assert!((stats.mean_severity - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_urgent_is_stable_by_severity() {
        let rows = records(json!([
            {"record_id": "a", "ai_severity_score": 3, "ai_urgency": "urgent"},
            {"record_id": "b", "ai_severity_score": 5, "ai_urgency": "immediate"},
            {"record_id": "c", "ai_severity_score": 3, "ai_urgency": "urgent"},
            {"record_id": "d", "ai_severity_score": 5, "ai_urgency": "routine"},
        ]));
        let ids: Vec<String> = top_urgent(&rows, 5).iter().map(|r| r.id_text()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_urgent_summary_lists_overflow() {
        let rows: Vec<Value> = (0..7)
            .map(|i| json!({"ai_severity_score": 1 + i % 5, "ai_urgency": "urgent", "ai_category": "renal"}))
            .collect();
        let rows = records(Value::Array(rows));
        let now = NaiveDateTime::parse_from_str("2026-02-03 14:05", "%Y-%m-%d %H:%M").unwrap();

        let text = urgent_summary(&rows, now).unwrap();
        assert!(text.starts_with("🚨 URGENT ALERTS (7 total)"));
        assert!(text.contains("02/03/2026, 02:05 PM"));
        assert!(text.contains("1. Severity 5/5 | renal"));
        assert!(text.contains("+2 more"));
        assert!(urgent_summary(&records(json!([{"ai_severity_score": 1}])), now).is_none());
    }

    #[test]
    fn test_critical_card_mentions_fields() {
        let rows = records(json!([{
            "ai_severity_score": 5,
            "ai_category": "hepatic",
            "ai_action": "Stop drug",
            "ai_confidence": "high"
        }]));
        let card = critical_alert_card(&rows[0]);
        assert!(card.contains("Severity: 5/5"));
        assert!(card.contains("Category: hepatic"));
        assert!(card.contains("Action: Stop drug"));
        assert!(card.contains("Confidence: high"));
    }

    #[test]
    fn test_estimate() {
        let e = Estimate::for_count(30);
        assert_eq!(e.secs, 60);
        assert_eq!(e.ai_calls, 30);
        assert!((e.cost - 0.06).abs() < 1e-9);
        assert!((e.minutes() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_email_notice_names_contact_and_count() {
        let r = result(
            json!({
                "records": [{"ai_severity_score": 2}, {"ai_severity_score": 4}],
                "outputs": {"email_sent": true}
            }),
            1,
        );
        assert_eq!(
            email_notice(&r, "ops@example.org").as_deref(),
            Some("📧 Email sent to ops@example.org: report with 2 records attached as JSON")
        );

        // No outputs at all still shows the notice
        let r = result(json!([{"ai_severity_score": 1}]), 1);
        assert!(email_notice(&r, "ops@example.org").is_some());
    }

    #[test]
    fn test_email_notice_hidden_when_workflow_says_not_sent() {
        let r = result(
            json!({"records": [{"ai_severity_score": 2}], "outputs": {"email_sent": false}}),
            1,
        );
        assert_eq!(email_notice(&r, "ops@example.org"), None);
    }

    #[test]
    fn test_run_details_shows_request_and_raw_response() {
        let r = result(json!([{"ai_severity_score": "5", "drug": "x"}]), 1);
        let text = run_details(&r, "http://wf/webhook/abc");
        assert!(text.starts_with("📤 Request\nPOST http://wf/webhook/abc\n{\n"));
        assert!(text.contains("\"record_count\": 1"));
        assert!(text.contains("\"triggered_by\": \"streamlit\""));
        // Raw response, before any typing
        assert!(text.contains("📥 Response\n[\n  {\n    \"ai_severity_score\": \"5\""));
    }
}
