// Session state - the one analysis a dashboard session holds
//
// Phases:
//   Idle ──start──▶ Analyzing ──finish(ok)──▶ Done ──reset──▶ Idle
//                       │
//                       └──finish(err)──▶ Idle (error kept for display)
//
// The session is owned by the TUI App (or the headless runner) and passed
// by reference to renderers; nothing else holds analysis state.

use crate::normalize::{
    self, AnalysisRecord, NormalizeError, NormalizedTable, Row, ValidationError,
};
use crate::trigger::{AnalysisRequest, Outcome, TriggerError};
use serde_json::{Map, Value};
use std::time::{Duration, Instant};
use thiserror::Error;

/// A stored, validated analysis. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    /// Typed view every derivation reads
    pub records: Vec<AnalysisRecord>,
    /// Rows exactly as the workflow sent them, parallel to `records`.
    /// Exports write these so nothing is re-typed on the way out.
    pub rows: Vec<Row>,
    pub outputs: Map<String, Value>,
    pub request: AnalysisRequest,
    /// Decoded response body, before normalization
    pub response: Value,
    pub elapsed: Duration,
}

impl AnalysisResult {
    /// Validate a normalized table into a storable result
    pub fn from_table(
        table: NormalizedTable,
        request: AnalysisRequest,
        response: Value,
        elapsed: Duration,
    ) -> Result<Self, ValidationError> {
        let records = normalize::validate(&table)?;
        Ok(Self {
            records,
            rows: table.rows,
            outputs: table.outputs,
            request,
            response,
            elapsed,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Everything that can send a session back to Idle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Trigger(#[from] TriggerError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl AnalysisError {
    /// Short heading for the error modal
    pub fn title(&self) -> &'static str {
        match self {
            AnalysisError::Trigger(TriggerError::Connection { .. }) => "Connection failed",
            AnalysisError::Trigger(TriggerError::Timeout { .. }) => "Request timed out",
            AnalysisError::Trigger(TriggerError::Http { .. }) => "Workflow returned an error",
            AnalysisError::Trigger(TriggerError::EmptyResponse) => "Empty response",
            AnalysisError::Trigger(TriggerError::MalformedJson { .. }) => "Malformed response",
            AnalysisError::Normalize(_) => "Unreadable response",
            AnalysisError::Validation(_) => "Invalid analysis data",
        }
    }

    /// Troubleshooting steps for the user
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            AnalysisError::Trigger(e) => e.hints(),
            AnalysisError::Normalize(_) => &["Check the workflow's response format"],
            AnalysisError::Validation(_) => &[
                "Make sure the AI scoring node runs before the response node",
                "Every record needs an ai_severity_score",
            ],
        }
    }
}

/// How an in-flight analysis ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Finished<'a> {
    Done(&'a AnalysisResult),
    /// Back to Idle; the same error stays readable via `last_error`
    Failed(&'a AnalysisError),
}

/// Misuse of the session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("An analysis is already running")]
    AlreadyAnalyzing,

    #[error("No analysis is running")]
    NotAnalyzing,
}

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Phase {
    #[default]
    Idle,
    Analyzing {
        request: AnalysisRequest,
        started: Instant,
    },
    Done(AnalysisResult),
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Analyzing { .. } => "analyzing",
            Phase::Done(_) => "done",
        }
    }
}

/// Per-session analysis state
#[derive(Debug, Default)]
pub struct Session {
    phase: Phase,
    last_error: Option<AnalysisError>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.phase, Phase::Analyzing { .. })
    }

    /// The stored result, if the last analysis succeeded
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Done(result) => Some(result),
            _ => None,
        }
    }

    /// Error from the last failed analysis (cleared on the next start)
    pub fn last_error(&self) -> Option<&AnalysisError> {
        self.last_error.as_ref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Request in flight, if any
    pub fn pending_request(&self) -> Option<(&AnalysisRequest, Instant)> {
        match &self.phase {
            Phase::Analyzing { request, started } => Some((request, *started)),
            _ => None,
        }
    }

    /// Begin an analysis, discarding any previous result
    pub fn start(&mut self, record_count: u32) -> Result<AnalysisRequest, SessionError> {
        if self.is_analyzing() {
            return Err(SessionError::AlreadyAnalyzing);
        }

        let request = AnalysisRequest::new(record_count);
        self.last_error = None;
        self.phase = Phase::Analyzing {
            request,
            started: Instant::now(),
        };
        tracing::info!("Analysis started ({} records)", request.record_count);
        Ok(request)
    }

    /// Apply the outcome of the in-flight call, timing from `start`
    pub fn finish(&mut self, outcome: Outcome) -> Result<Finished<'_>, SessionError> {
        let started = match &self.phase {
            Phase::Analyzing { started, .. } => *started,
            _ => return Err(SessionError::NotAnalyzing),
        };
        self.finish_with_elapsed(outcome, started.elapsed())
    }

    /// Apply an outcome with an externally measured duration
    ///
    /// `Err` only for lifecycle misuse; a failed analysis is `Finished::Failed`.
    pub fn finish_with_elapsed(
        &mut self,
        outcome: Outcome,
        elapsed: Duration,
    ) -> Result<Finished<'_>, SessionError> {
        let request = match &self.phase {
            Phase::Analyzing { request, .. } => *request,
            _ => return Err(SessionError::NotAnalyzing),
        };

        match build_result(outcome, request, elapsed) {
            Ok(result) => {
                tracing::info!(
                    "Analyzed {} records in {:.1}s",
                    result.len(),
                    result.elapsed_secs()
                );
                self.phase = Phase::Done(result);
                self.result()
                    .map(Finished::Done)
                    .ok_or(SessionError::NotAnalyzing)
            }
            Err(e) => {
                tracing::error!("Analysis failed: {}", e);
                self.phase = Phase::Idle;
                Ok(Finished::Failed(self.last_error.insert(e)))
            }
        }
    }

    /// "New Analysis": drop the stored result and return to Idle
    pub fn reset(&mut self) {
        if self.is_analyzing() {
            tracing::debug!("Ignoring reset while analyzing");
            return;
        }
        self.phase = Phase::Idle;
        self.last_error = None;
    }
}

/// Outcome → normalized → validated result
fn build_result(
    outcome: Outcome,
    request: AnalysisRequest,
    elapsed: Duration,
) -> Result<AnalysisResult, AnalysisError> {
    let response = outcome.into_result()?;
    let table = normalize::normalize(response.clone())?;
    Ok(AnalysisResult::from_table(table, request, response, elapsed)?)
}
