// Mock workflow: a local stand-in for the remote analysis pipeline
//
// Serves the same two endpoints the real deployment exposes:
// - POST /webhook/*  → synthetic multi-source records (or a canned reply)
// - GET  /healthz    → "ok"
//
// Used by demo mode (`--demo` / AEI_DEMO=1) and by the trigger tests.

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Simulated analysis time per record in demo mode
pub const DEMO_RECORD_DELAY: Duration = Duration::from_millis(40);

/// What the mock webhook answers with
#[derive(Debug, Clone)]
pub enum MockReply {
    /// `{"records": [...], "outputs": {...}}` sized to the requested count
    Records,
    /// Fixed status and raw body
    Status { status: u16, body: String },
}

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    per_record_delay: Duration,
}

#[derive(Debug, Deserialize)]
struct WebhookPayload {
    record_count: u32,
}

/// Running mock server; dropped servers keep running until `shutdown`
pub struct MockWorkflow {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl MockWorkflow {
    /// Start a mock on an ephemeral localhost port with no artificial delay
    pub async fn spawn(reply: MockReply) -> Result<Self> {
        Self::spawn_with_delay(reply, Duration::ZERO).await
    }

    /// Start a mock that sleeps `per_record_delay × record_count` before replying
    pub async fn spawn_with_delay(reply: MockReply, per_record_delay: Duration) -> Result<Self> {
        let state = MockState {
            reply,
            per_record_delay,
        };

        let app = Router::new()
            .route("/healthz", get(|| async { "ok" }))
            .route("/webhook/*path", post(webhook_handler))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to bind mock workflow")?;
        let addr = listener
            .local_addr()
            .context("Failed to read mock workflow address")?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_rx.await.ok();
                })
                .await;
            if let Err(e) = served {
                tracing::error!("Mock workflow error: {}", e);
            }
        });

        tracing::info!("Mock workflow listening on {}", addr);

        Ok(Self {
            addr,
            shutdown_tx,
            handle,
        })
    }

    /// Base URL to point a [`super::TriggerClient`] at
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop serving and wait for the server task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.handle.await;
    }
}

async fn webhook_handler(State(state): State<MockState>, body: String) -> Response {
    match state.reply {
        MockReply::Status { status, body } => {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (code, body).into_response()
        }
        MockReply::Records => {
            let count = serde_json::from_str::<WebhookPayload>(&body)
                .map(|p| p.record_count)
                .unwrap_or(10);

            if !state.per_record_delay.is_zero() {
                tokio::time::sleep(state.per_record_delay * count).await;
            }

            let records: Vec<Value> = (0..count as usize).map(synthetic_record).collect();
            let critical = records
                .iter()
                .filter(|r| r["ai_severity_score"].as_i64().unwrap_or(0) >= 4)
                .count();

            tracing::debug!("Mock workflow generated {} records", records.len());

            Json(json!({
                "records": records,
                "outputs": {
                    "discord_alerts": critical,
                    "email_sent": true,
                }
            }))
            .into_response()
        }
    }
}

/// Deterministic record `i` cycling through CADEC, FDA and PubMed templates
fn synthetic_record(i: usize) -> Value {
    const CATEGORIES: [&str; 5] = [
        "cardiovascular",
        "gastrointestinal",
        "neurological",
        "dermatological",
        "hepatic",
    ];
    const URGENCIES: [&str; 4] = ["routine", "urgent", "monitor", "immediate"];
    const SEVERITIES: [i64; 7] = [2, 4, 3, 5, 1, 3, 4];

    let severity = SEVERITIES[i % SEVERITIES.len()];
    let category = CATEGORIES[i % CATEGORIES.len()];
    let urgency = URGENCIES[(i / 2) % URGENCIES.len()];
    let action = match severity {
        5 => "Escalate to safety physician within 24h",
        4 => "Flag for pharmacovigilance review",
        3 => "Monitor and collect follow-up data",
        _ => "Log for periodic aggregate review",
    };

    match i % 3 {
        0 => json!({
            "record_id": format!("CADEC-{:04}", i + 1),
            "source": "cadec",
            "ai_severity_score": severity,
            "ai_category": category,
            "ai_urgency": urgency,
            "ai_action": action,
            "ai_confidence": 0.80 + (i % 5) as f64 * 0.03,
        }),
        1 => json!({
            "record_id": format!("FDA-{:04}", i + 1),
            "source": "fda_medwatch",
            "ai_severity_score": severity,
            "ai_category": category,
            "ai_urgency": urgency,
            "ai_action": action,
            "ai_confidence": "high",
        }),
        _ => {
            let pmid = 38_000_000 + i as u64 * 137;
            json!({
                "record_id": format!("PM-{}", pmid),
                "source": "pubmed",
                "ai_severity_score": severity,
                "ai_category": category,
                "ai_urgency": urgency,
                "ai_action": action,
                "ai_confidence": 0.9,
                "pubmed_title": format!("Post-marketing signals of {} adverse reactions: case series {}", category, i + 1),
                "pubmed_journal": "Drug Safety",
                "pubmed_authors": "Rao P, Lindqvist M, Okafor C",
                "pubmed_date": "2025-11",
                "pubmed_id": pmid.to_string(),
                "url": format!("https://pubmed.ncbi.nlm.nih.gov/{}/", pmid),
            })
        }
    }
}
