//! Remote trigger client
//!
//! Fires the external analysis workflow with a single webhook call and
//! classifies whatever comes back. There is exactly one attempt per
//! analysis: the count-scaled timeout is the only bound, nothing retries.
//!
//! A secondary health probe (`GET {base}/healthz`) only feeds the
//! online/sleeping hint in the sidebar and never fails the main flow.

pub mod mock;

use crate::util::truncate_chars;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Hosted workflow deployment used when nothing is configured
pub const DEFAULT_BASE_URL: &str = "https://fda-adverse-event-intelligence.onrender.com";

/// Webhook path appended to the base URL
pub const DEFAULT_WEBHOOK_PATH: &str = "webhook/c4e3e139-affc-40e5-a550-11c1b30540fe";

/// Tag the workflow expects in `triggered_by`
pub const TRIGGERED_BY: &str = "streamlit";

/// Upper bound on records per analysis
pub const MAX_RECORD_COUNT: u32 = 100;

/// Floor for the request timeout
const MIN_TIMEOUT_SECS: u64 = 300;

/// Timeout budget per requested record
const SECS_PER_RECORD: u64 = 3;

/// Health probe timeout
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Characters of a non-200 body shown to the user
const HTTP_BODY_PREVIEW: usize = 200;

/// Characters of a JSON parse error shown to the user
const JSON_ERROR_PREVIEW: usize = 100;

// ─────────────────────────────────────────────────────────────────────────────
// Request
// ─────────────────────────────────────────────────────────────────────────────

/// Payload of the webhook call. Built per trigger and dropped afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub record_count: u32,
    pub triggered_by: &'static str,
}

impl AnalysisRequest {
    /// Build a request, clamping the count into `1..=MAX_RECORD_COUNT`
    pub fn new(record_count: u32) -> Self {
        Self {
            record_count: record_count.clamp(1, MAX_RECORD_COUNT),
            triggered_by: TRIGGERED_BY,
        }
    }

    /// Timeout in seconds: `max(300, record_count * 3)`
    pub fn timeout_secs(&self) -> u64 {
        timeout_secs_for(self.record_count)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs())
    }
}

/// Count-scaled timeout for a given record count
pub fn timeout_secs_for(record_count: u32) -> u64 {
    MIN_TIMEOUT_SECS.max(record_count as u64 * SECS_PER_RECORD)
}

// ─────────────────────────────────────────────────────────────────────────────
// Outcome
// ─────────────────────────────────────────────────────────────────────────────

/// Classified result of one webhook call
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 200 with a parseable JSON body
    Success(Value),
    /// Could not reach the webhook at all
    ConnectionError { url: String },
    /// No response inside the count-scaled window
    Timeout { secs: u64 },
    /// Any status other than 200 (body truncated)
    HttpError { status: u16, body: String },
    /// 200 with an empty or whitespace-only body
    EmptyResponse,
    /// 200 with a body that is not JSON (error truncated)
    MalformedJson { error: String },
}

impl Outcome {
    /// Short label for logs and the status bar
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Success(_) => "success",
            Outcome::ConnectionError { .. } => "connection-error",
            Outcome::Timeout { .. } => "timeout",
            Outcome::HttpError { .. } => "http-error",
            Outcome::EmptyResponse => "empty-response",
            Outcome::MalformedJson { .. } => "malformed-json",
        }
    }

    /// Split into the parsed payload or a user-facing error
    pub fn into_result(self) -> Result<Value, TriggerError> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::ConnectionError { url } => Err(TriggerError::Connection { url }),
            Outcome::Timeout { secs } => Err(TriggerError::Timeout { secs }),
            Outcome::HttpError { status, body } => Err(TriggerError::Http { status, body }),
            Outcome::EmptyResponse => Err(TriggerError::EmptyResponse),
            Outcome::MalformedJson { error } => Err(TriggerError::MalformedJson { error }),
        }
    }
}

/// Failure side of [`Outcome`], shown verbatim to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("Cannot connect to workflow at {url}")]
    Connection { url: String },

    #[error("Timeout after {secs}s")]
    Timeout { secs: u64 },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Workflow returned an empty response")]
    EmptyResponse,

    #[error("Invalid JSON: {error}")]
    MalformedJson { error: String },
}

impl TriggerError {
    /// Troubleshooting steps shown under the error
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            TriggerError::Connection { .. } => &[
                "Check that the base URL is correct",
                "Make sure the workflow deployment is running",
            ],
            TriggerError::Timeout { .. } => &[
                "Try again with fewer records (5-10)",
                "The first analysis after a cold start can take 30-60s",
            ],
            TriggerError::Http { .. } | TriggerError::EmptyResponse => &[
                "Make sure the workflow is published, not just activated",
                "Check that the webhook URL is correct",
                "Try with fewer records (5-10)",
            ],
            TriggerError::MalformedJson { .. } => &[
                "Check the workflow's final response node returns JSON",
                "Try with fewer records (5-10)",
            ],
        }
    }
}

/// Classify a received response. Pure so every branch is testable.
pub fn classify_response(status: u16, body: &str) -> Outcome {
    if status != 200 {
        return Outcome::HttpError {
            status,
            body: truncate_chars(body, HTTP_BODY_PREVIEW).to_string(),
        };
    }

    if body.trim().is_empty() {
        return Outcome::EmptyResponse;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(value) => Outcome::Success(value),
        Err(e) => Outcome::MalformedJson {
            error: truncate_chars(&e.to_string(), JSON_ERROR_PREVIEW).to_string(),
        },
    }
}

/// Classify a transport failure. Connection problems win over timeouts.
fn classify_transport(err: &reqwest::Error, url: &str, timeout_secs: u64) -> Outcome {
    if err.is_connect() {
        Outcome::ConnectionError {
            url: url.to_string(),
        }
    } else if err.is_timeout() {
        Outcome::Timeout { secs: timeout_secs }
    } else {
        Outcome::ConnectionError {
            url: url.to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

/// Result of the soft health probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    Checking,
    Online,
    /// Probe failed; hosted deployments wake on the first real call
    Sleeping,
}

impl HealthStatus {
    pub fn describe(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "not checked",
            HealthStatus::Checking => "checking…",
            HealthStatus::Online => "online",
            HealthStatus::Sleeping => "may be sleeping (wakes on first analysis)",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client bound to one workflow deployment
#[derive(Debug, Clone)]
pub struct TriggerClient {
    client: reqwest::Client,
    base_url: String,
    webhook_path: String,
    /// Replaces the count-scaled timeout when set
    timeout_override: Option<Duration>,
}

impl TriggerClient {
    /// Create a client for `base_url` + `webhook_path`
    ///
    /// No client-wide timeout is set; each call carries its own.
    pub fn new(base_url: &str, webhook_path: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("adverse-intel/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            webhook_path: webhook_path.trim_start_matches('/').to_string(),
            timeout_override: None,
        })
    }

    /// Use a fixed per-call timeout instead of `max(300, 3n)` seconds
    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_override = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full webhook address
    pub fn webhook_url(&self) -> String {
        format!("{}/{}", self.base_url, self.webhook_path)
    }

    pub fn health_url(&self) -> String {
        format!("{}/healthz", self.base_url)
    }

    /// Fire the workflow once and classify the result
    pub async fn trigger(&self, record_count: u32) -> Outcome {
        let request = AnalysisRequest::new(record_count);
        let url = self.webhook_url();
        let timeout = self.timeout_override.unwrap_or_else(|| request.timeout());
        let timeout_secs = timeout.as_secs();

        tracing::info!(
            "Triggering workflow: POST {} (records: {}, timeout: {}s)",
            url,
            request.record_count,
            timeout_secs
        );

        let response = match self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let outcome = classify_transport(&e, &url, timeout_secs);
                tracing::warn!("Workflow call failed ({}): {}", outcome.label(), e);
                return outcome;
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let outcome = classify_transport(&e, &url, timeout_secs);
                tracing::warn!("Reading workflow response failed ({}): {}", outcome.label(), e);
                return outcome;
            }
        };

        let outcome = classify_response(status, &body);
        tracing::debug!(
            "Workflow responded: status {}, {} bytes, outcome {}",
            status,
            body.len(),
            outcome.label()
        );
        outcome
    }

    /// Soft health probe; any response at all counts as online
    pub async fn check_health(&self) -> HealthStatus {
        let url = self.health_url();
        match self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await {
            Ok(response) => {
                tracing::debug!("Health probe {} -> {}", url, response.status());
                HealthStatus::Online
            }
            Err(e) => {
                tracing::debug!("Health probe {} failed: {}", url, e);
                HealthStatus::Sleeping
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{MockReply, MockWorkflow};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timeout_scales_with_count() {
        assert_eq!(timeout_secs_for(1), 300);
        assert_eq!(timeout_secs_for(100), 300);
        assert_eq!(timeout_secs_for(101), 303);
        for n in 1..=MAX_RECORD_COUNT {
            let secs = AnalysisRequest::new(n).timeout_secs();
            assert_eq!(secs, 300u64.max(3 * n as u64));
            assert!(secs >= 300);
        }
    }

    #[test]
    fn test_request_clamps_count() {
        assert_eq!(AnalysisRequest::new(0).record_count, 1);
        assert_eq!(AnalysisRequest::new(500).record_count, 100);
        assert_eq!(AnalysisRequest::new(10).triggered_by, "streamlit");
    }

    #[test]
    fn test_request_payload_shape() {
        let payload = serde_json::to_value(AnalysisRequest::new(10)).unwrap();
        assert_eq!(
            payload,
            json!({"record_count": 10, "triggered_by": "streamlit"})
        );
    }

    #[test]
    fn test_webhook_url_joins_base_and_path() {
        let client = TriggerClient::new("https://wf.example.com/", DEFAULT_WEBHOOK_PATH).unwrap();
        assert_eq!(
            client.webhook_url(),
            "https://wf.example.com/webhook/c4e3e139-affc-40e5-a550-11c1b30540fe"
        );
        assert_eq!(client.health_url(), "https://wf.example.com/healthz");
    }

    #[test]
    fn test_classify_non_200_truncates_body() {
        assert_eq!(
            classify_response(500, "server error"),
            Outcome::HttpError {
                status: 500,
                body: "server error".to_string()
            }
        );

        let long = "x".repeat(500);
        match classify_response(502, &long) {
            Outcome::HttpError { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.chars().count(), 200);
            }
            other => panic!("expected HttpError, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_status_checked_before_body() {
        // Empty body on a 404 is still an HTTP error, not an empty response
        assert!(matches!(
            classify_response(404, ""),
            Outcome::HttpError { status: 404, .. }
        ));
    }

    #[test]
    fn test_classify_empty_and_whitespace_body() {
        assert_eq!(classify_response(200, ""), Outcome::EmptyResponse);
        assert_eq!(classify_response(200, "  \n\t "), Outcome::EmptyResponse);
    }

    #[test]
    fn test_classify_malformed_json() {
        match classify_response(200, "{\"records\": [") {
            Outcome::MalformedJson { error } => {
                assert!(!error.is_empty());
                assert!(error.chars().count() <= 100);
            }
            other => panic!("expected MalformedJson, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_success() {
        assert_eq!(
            classify_response(200, r#"[{"ai_severity_score": 3}]"#),
            Outcome::Success(json!([{"ai_severity_score": 3}]))
        );
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        let err = Outcome::HttpError {
            status: 500,
            body: "server error".into(),
        }
        .into_result()
        .unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: server error");
        assert!(!err.hints().is_empty());

        let err = Outcome::Timeout { secs: 300 }.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Timeout after 300s");
    }

    #[tokio::test]
    async fn test_trigger_empty_body_scenario() {
        let mock = MockWorkflow::spawn(MockReply::Status {
            status: 200,
            body: String::new(),
        })
        .await
        .unwrap();
        let client = TriggerClient::new(&mock.base_url(), DEFAULT_WEBHOOK_PATH).unwrap();

        assert_eq!(client.trigger(10).await, Outcome::EmptyResponse);
        mock.shutdown().await;
    }

    #[tokio::test]
    async fn test_trigger_http_500_scenario() {
        let mock = MockWorkflow::spawn(MockReply::Status {
            status: 500,
            body: "server error".to_string(),
        })
        .await
        .unwrap();
        let client = TriggerClient::new(&mock.base_url(), DEFAULT_WEBHOOK_PATH).unwrap();

        assert_eq!(
            client.trigger(5).await,
            Outcome::HttpError {
                status: 500,
                body: "server error".to_string()
            }
        );
        mock.shutdown().await;
    }

    #[tokio::test]
    async fn test_trigger_success_returns_records() {
        let mock = MockWorkflow::spawn(MockReply::Records).await.unwrap();
        let client = TriggerClient::new(&mock.base_url(), DEFAULT_WEBHOOK_PATH).unwrap();

        match client.trigger(7).await {
            Outcome::Success(value) => {
                let records = value["records"].as_array().expect("records array");
                assert_eq!(records.len(), 7);
                assert!(records.iter().all(|r| r.get("ai_severity_score").is_some()));
            }
            other => panic!("expected Success, got {:?}", other),
        }
        assert_eq!(client.check_health().await, HealthStatus::Online);
        mock.shutdown().await;
    }

    #[tokio::test]
    async fn test_trigger_slow_workflow_times_out() {
        let mock = MockWorkflow::spawn_with_delay(MockReply::Records, Duration::from_secs(2))
            .await
            .unwrap();
        let client = TriggerClient::new(&mock.base_url(), DEFAULT_WEBHOOK_PATH)
            .unwrap()
            .with_timeout(Duration::from_millis(200));

        let outcome = client.trigger(1).await;
        assert_eq!(outcome, Outcome::Timeout { secs: 0 });
        assert_eq!(
            outcome.into_result().unwrap_err(),
            TriggerError::Timeout { secs: 0 }
        );
        mock.shutdown().await;
    }

    #[tokio::test]
    async fn test_delayed_workflow_still_answers_inside_timeout() {
        let mock = MockWorkflow::spawn_with_delay(MockReply::Records, Duration::from_millis(20))
            .await
            .unwrap();
        let client = TriggerClient::new(&mock.base_url(), DEFAULT_WEBHOOK_PATH)
            .unwrap()
            .with_timeout(Duration::from_secs(10));

        assert_eq!(client.trigger(3).await.label(), "success");
        mock.shutdown().await;
    }

    #[tokio::test]
    async fn test_trigger_connection_refused() {
        // Grab a free port, then release it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = format!("http://{}", addr);
        let client = TriggerClient::new(&base, DEFAULT_WEBHOOK_PATH).unwrap();

        assert_eq!(
            client.trigger(3).await,
            Outcome::ConnectionError {
                url: client.webhook_url()
            }
        );
        assert_eq!(client.check_health().await, HealthStatus::Sleeping);
    }
}
