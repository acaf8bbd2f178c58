// TUI application state
//
// App owns the dashboard session and all UI state. Key handling mutates
// state synchronously and returns a Command when work has to happen off the
// UI loop (trigger call, health probe); the loop runs it on a tokio task and
// feeds the result back as an AppEvent.

use super::clipboard::SystemClipboard;
use super::components::Toast;
use super::modal::{Modal, ModalAction};
use super::theme::Theme;
use crate::config::{clamp_record_count, Config};
use crate::logging::LogBuffer;
use crate::report::export::write_exports;
use crate::report::summary::SummaryReport;
use crate::report::Threshold;
use crate::session::{Finished, Session};
use crate::trigger::{HealthStatus, Outcome};
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Spinner frames for the title bar and processing view
const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Rows moved by PageUp / PageDown
const PAGE: usize = 10;

/// Tabs of the results view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsTab {
    #[default]
    Summary,
    Alerts,
    Pubmed,
    Records,
    Charts,
    Export,
}

impl ResultsTab {
    pub const ALL: [ResultsTab; 6] = [
        ResultsTab::Summary,
        ResultsTab::Alerts,
        ResultsTab::Pubmed,
        ResultsTab::Records,
        ResultsTab::Charts,
        ResultsTab::Export,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ResultsTab::Summary => "Summary",
            ResultsTab::Alerts => "Alerts",
            ResultsTab::Pubmed => "PubMed",
            ResultsTab::Records => "Records",
            ResultsTab::Charts => "Charts",
            ResultsTab::Export => "Export",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    /// Next tab (wraps around)
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous tab (wraps around)
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Results of background work, delivered to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    TriggerFinished { outcome: Outcome, elapsed: Duration },
    HealthChecked(HealthStatus),
}

/// Background work requested by the App
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Trigger {
        base_url: String,
        webhook_path: String,
        record_count: u32,
    },
    CheckHealth {
        base_url: String,
        webhook_path: String,
    },
}

/// Main application state for the TUI
pub struct App {
    /// Effective configuration (base URL edits are applied here)
    pub config: Config,

    /// The one analysis this dashboard holds
    pub session: Session,

    /// Records to request on the next analysis (1..=100)
    pub record_count: u32,

    /// Critical threshold; changing it re-derives every view
    pub threshold: Threshold,

    /// Last health probe result
    pub health: HealthStatus,

    /// Active results tab
    pub tab: ResultsTab,

    /// Scroll offset within the active tab
    pub scroll: usize,

    /// Active modal overlay (captures all input)
    pub modal: Option<Modal>,

    /// Active toast notification
    pub toast: Option<Toast>,

    /// Log buffer for system logs display
    pub log_buffer: LogBuffer,

    /// Base URL being edited (None = not editing)
    pub url_input: Option<String>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Animation frame counter for spinners
    pub animation_frame: usize,

    /// When the app started (for uptime display)
    pub start_time: Instant,

    /// Files written by the last export
    pub last_exports: Vec<PathBuf>,

    /// Current color theme
    pub theme: Theme,

    clipboard: SystemClipboard,
}

impl App {
    pub fn with_config(log_buffer: LogBuffer, config: Config) -> Self {
        Self {
            record_count: config.record_count,
            threshold: config.threshold,
            theme: Theme::by_name(&config.theme),
            config,
            session: Session::new(),
            health: HealthStatus::Unknown,
            tab: ResultsTab::default(),
            scroll: 0,
            modal: None,
            toast: None,
            log_buffer,
            url_input: None,
            should_quit: false,
            animation_frame: 0,
            start_time: Instant::now(),
            last_exports: Vec::new(),
            clipboard: SystemClipboard::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────

    /// Handle a key event
    /// Layered dispatch: Modal → URL editor → Global keys
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Option<Command> {
        // Terminals that report releases would otherwise fire every action twice
        if key_event.kind != KeyEventKind::Press {
            return None;
        }

        if self.handle_modal_input(key_event.code) {
            return None;
        }

        if self.url_input.is_some() {
            return self.handle_url_input(key_event.code);
        }

        self.handle_global_keys(key_event)
    }

    /// Modal captures all input when active - returns true if absorbed
    fn handle_modal_input(&mut self, key: KeyCode) -> bool {
        let Some(ref mut modal) = self.modal else {
            return false;
        };

        match modal.handle_input(key) {
            ModalAction::None => {}
            ModalAction::Close => {
                if *modal == Modal::Error {
                    self.session.dismiss_error();
                }
                self.modal = None;
            }
        }

        true
    }

    fn handle_url_input(&mut self, key: KeyCode) -> Option<Command> {
        let input = self.url_input.as_mut()?;
        match key {
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => self.url_input = None,
            KeyCode::Enter => return self.commit_url(),
            _ => {}
        }
        None
    }

    fn handle_global_keys(&mut self, key_event: KeyEvent) -> Option<Command> {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('?') => self.modal = Some(Modal::Help),

            // Analysis
            KeyCode::Enter | KeyCode::Char('a') => return self.start_analysis(),
            KeyCode::Char('n') => self.new_analysis(),
            KeyCode::Char('r') => return Some(self.health_check()),

            // Parameters
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_count(1),
            KeyCode::Char('-') => self.adjust_count(-1),
            KeyCode::Char(']') => self.adjust_count(10),
            KeyCode::Char('[') => self.adjust_count(-10),
            KeyCode::Char('t') => self.cycle_threshold(),
            KeyCode::Char('u') => self.begin_url_edit(),

            // Tabs
            KeyCode::Char(c @ '1'..='6') => {
                let idx = (c as usize) - ('1' as usize);
                if let Some(tab) = ResultsTab::from_index(idx) {
                    self.set_tab(tab);
                }
            }
            KeyCode::Tab => self.set_tab(self.tab.next()),
            KeyCode::BackTab => self.set_tab(self.tab.prev()),

            // Scrolling within the active tab
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE),
            KeyCode::Home => self.scroll = 0,

            // Outputs
            KeyCode::Char('x') => self.export_all(),
            KeyCode::Char('y') => self.copy_summary(),
            KeyCode::Char('d') => self.open_details(),
            _ => {}
        }
        None
    }

    // ─────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────

    /// Begin an analysis; refused while one is in flight
    pub fn start_analysis(&mut self) -> Option<Command> {
        match self.session.start(self.record_count) {
            Ok(request) => {
                self.tab = ResultsTab::Summary;
                self.scroll = 0;
                Some(Command::Trigger {
                    base_url: self.config.base_url.clone(),
                    webhook_path: self.config.webhook_path.clone(),
                    record_count: request.record_count,
                })
            }
            Err(e) => {
                self.show_toast(format!("✗ {}", e));
                None
            }
        }
    }

    /// Drop the stored result and go back to the welcome screen
    pub fn new_analysis(&mut self) {
        if self.session.is_analyzing() {
            self.show_toast("✗ Analysis in progress");
            return;
        }
        self.session.reset();
        self.tab = ResultsTab::Summary;
        self.scroll = 0;
        self.last_exports.clear();
    }

    /// Probe the configured deployment
    pub fn health_check(&mut self) -> Command {
        self.health = HealthStatus::Checking;
        Command::CheckHealth {
            base_url: self.config.base_url.clone(),
            webhook_path: self.config.webhook_path.clone(),
        }
    }

    pub fn adjust_count(&mut self, delta: i64) {
        self.record_count = clamp_record_count(self.record_count as i64 + delta);
    }

    pub fn cycle_threshold(&mut self) {
        self.threshold = self.threshold.next();
        self.scroll = 0;
    }

    pub fn set_tab(&mut self, tab: ResultsTab) {
        if self.tab != tab {
            self.tab = tab;
            self.scroll = 0;
        }
    }

    fn begin_url_edit(&mut self) {
        if self.session.is_analyzing() {
            self.show_toast("✗ Analysis in progress");
            return;
        }
        self.url_input = Some(self.config.base_url.clone());
    }

    fn commit_url(&mut self) -> Option<Command> {
        let input = self.url_input.take()?;
        let url = input.trim().trim_end_matches('/');
        if url.is_empty() {
            self.show_toast("✗ Base URL cannot be empty");
            return None;
        }
        if url != self.config.base_url {
            tracing::info!("Base URL set to {}", url);
            self.config.base_url = url.to_string();
        }
        Some(self.health_check())
    }

    /// Write CSV, JSON and summary files for the stored result
    /// Show the request and raw response behind the stored result
    pub fn open_details(&mut self) {
        if self.session.result().is_some() {
            self.modal = Some(Modal::Details { scroll: 0 });
        } else {
            self.show_toast("✗ No analysis to inspect");
        }
    }

    pub fn export_all(&mut self) {
        let Some(result) = self.session.result() else {
            self.show_toast("✗ No results to export");
            return;
        };

        let now = Local::now().naive_local();
        match write_exports(
            &self.config.export_dir,
            result,
            self.threshold,
            &self.config.report.contact,
            now,
        ) {
            Ok(paths) => {
                let message = format!(
                    "✓ Wrote {} files to {}",
                    paths.len(),
                    self.config.export_dir.display()
                );
                self.last_exports = paths;
                self.show_toast(message);
            }
            Err(e) => {
                tracing::error!("Export failed: {:#}", e);
                self.show_toast("✗ Export failed (see logs)");
            }
        }
    }

    /// Copy the text summary report to the clipboard
    pub fn copy_summary(&mut self) {
        let Some(result) = self.session.result() else {
            self.show_toast("✗ No results to copy");
            return;
        };

        let text = SummaryReport::new(
            result,
            self.threshold,
            &self.config.report.contact,
            Local::now().naive_local(),
        )
        .render();

        match self.clipboard.copy(&text) {
            Ok(()) => self.show_toast("✓ Copied summary report"),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {:#}", e);
                self.show_toast("✗ Failed to copy");
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Background results
    // ─────────────────────────────────────────────────────────────────────

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::TriggerFinished { outcome, elapsed } => {
                // Any reply at all means the deployment is awake
                let reached = !matches!(
                    outcome,
                    Outcome::ConnectionError { .. } | Outcome::Timeout { .. }
                );

                match self.session.finish_with_elapsed(outcome, elapsed) {
                    Ok(Finished::Done(result)) => {
                        let message = format!(
                            "✓ Analyzed {} records in {:.1}s",
                            result.len(),
                            result.elapsed_secs()
                        );
                        self.show_toast(message);
                    }
                    Ok(Finished::Failed(_)) => self.modal = Some(Modal::Error),
                    Err(e) => tracing::warn!("Ignoring trigger result: {}", e),
                }

                if reached {
                    self.health = HealthStatus::Online;
                }
            }
            AppEvent::HealthChecked(status) => self.health = status,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Display helpers
    // ─────────────────────────────────────────────────────────────────────

    /// Advance animation frame (called on tick)
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Show a toast notification
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    /// Clear toast if expired (call after render)
    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }

    /// Get uptime as a formatted string
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;

        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app() -> App {
        let mut config = Config::default();
        config.base_url = "http://localhost:9".to_string();
        App::with_config(LogBuffer::new(), config)
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Command> {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn rows(n: i64) -> Outcome {
        let records: Vec<_> = (1..=n)
            .map(|i| {
                json!({
                    "record_id": i,
                    "source": "FDA",
                    "ai_severity_score": (i % 5) + 1,
                    "ai_urgency": if i == 1 { "urgent" } else { "routine" },
                })
            })
            .collect();
        Outcome::Success(json!(records))
    }

    fn finish(app: &mut App, outcome: Outcome) {
        app.apply_event(AppEvent::TriggerFinished {
            outcome,
            elapsed: Duration::from_secs(4),
        });
    }

    #[test]
    fn enter_starts_analysis_once() {
        let mut app = app();
        let command = press(&mut app, KeyCode::Enter);
        assert_eq!(
            command,
            Some(Command::Trigger {
                base_url: "http://localhost:9".to_string(),
                webhook_path: app.config.webhook_path.clone(),
                record_count: 10,
            })
        );
        assert!(app.session.is_analyzing());

        // Second press while in flight is refused
        assert_eq!(press(&mut app, KeyCode::Char('a')), None);
        assert!(app.toast.is_some());
    }

    #[test]
    fn count_keys_clamp() {
        let mut app = app();
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.record_count, 11);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.record_count, 21);
        for _ in 0..20 {
            press(&mut app, KeyCode::Char(']'));
        }
        assert_eq!(app.record_count, 100);
        for _ in 0..20 {
            press(&mut app, KeyCode::Char('['));
        }
        assert_eq!(app.record_count, 1);
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.record_count, 1);
    }

    #[test]
    fn threshold_cycles() {
        let mut app = app();
        assert_eq!(app.threshold.value(), 4);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.threshold.value(), 5);
        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.threshold.value(), 3);
    }

    #[test]
    fn tabs_by_number_and_tab_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.tab, ResultsTab::Records);
        app.scroll = 7;
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, ResultsTab::Charts);
        assert_eq!(app.scroll, 0);
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.tab, ResultsTab::Export);
        // '7' is not a tab
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.tab, ResultsTab::Export);
    }

    #[test]
    fn successful_trigger_stores_result() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        finish(&mut app, rows(5));

        let result = app.session.result().unwrap();
        assert_eq!(result.len(), 5);
        assert_eq!(result.elapsed, Duration::from_secs(4));
        assert_eq!(app.health, HealthStatus::Online);
        assert!(app.modal.is_none());
        assert!(app.toast.as_ref().unwrap().message.contains("5 records"));
    }

    #[test]
    fn failed_trigger_opens_error_modal() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        finish(
            &mut app,
            Outcome::HttpError {
                status: 502,
                body: "bad gateway".into(),
            },
        );

        assert_eq!(app.modal, Some(Modal::Error));
        assert!(app.session.result().is_none());
        assert!(app.session.last_error().is_some());

        // Modal swallows keys until closed
        assert_eq!(press(&mut app, KeyCode::Char('a')), None);
        assert!(!app.session.is_analyzing());

        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        assert!(app.session.last_error().is_none());
    }

    #[test]
    fn timeout_does_not_mark_online() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        finish(&mut app, Outcome::Timeout { secs: 60 });
        assert_eq!(app.health, HealthStatus::Unknown);
        assert_eq!(app.modal, Some(Modal::Error));
    }

    #[test]
    fn new_analysis_clears_result() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        finish(&mut app, rows(3));
        assert!(app.session.result().is_some());

        press(&mut app, KeyCode::Char('n'));
        assert!(app.session.result().is_none());
        assert!(!app.session.is_analyzing());
    }

    #[test]
    fn url_edit_commit_and_cancel() {
        let mut app = app();
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.url_input.as_deref(), Some("http://localhost:9"));

        // Keys go to the editor, not to global bindings
        press(&mut app, KeyCode::Char('9'));
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.tab, ResultsTab::Summary);
        assert!(!app.should_quit);

        let command = press(&mut app, KeyCode::Enter);
        assert_eq!(app.config.base_url, "http://localhost:99");
        assert!(matches!(command, Some(Command::CheckHealth { .. })));
        assert_eq!(app.health, HealthStatus::Checking);

        press(&mut app, KeyCode::Char('u'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Esc);
        assert!(app.url_input.is_none());
        assert_eq!(app.config.base_url, "http://localhost:99");
    }

    #[test]
    fn empty_url_is_rejected() {
        let mut app = app();
        app.url_input = Some("  / ".to_string());
        assert_eq!(press(&mut app, KeyCode::Enter), None);
        assert_eq!(app.config.base_url, "http://localhost:9");
        assert!(app.toast.is_some());
    }

    #[test]
    fn export_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app();
        app.config.export_dir = dir.path().join("out");

        press(&mut app, KeyCode::Char('x'));
        assert!(app.last_exports.is_empty());

        press(&mut app, KeyCode::Enter);
        finish(&mut app, rows(4));
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.last_exports.len(), 3);
        assert!(app.last_exports.iter().all(|p| p.exists()));
    }

    #[test]
    fn details_modal_needs_a_result() {
        let mut app = app();
        press(&mut app, KeyCode::Char('d'));
        assert!(app.modal.is_none());
        assert!(app.toast.is_some());

        press(&mut app, KeyCode::Enter);
        finish(&mut app, rows(2));
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.modal, Some(Modal::Details { scroll: 0 }));

        // Scroll keys go to the modal, not the active tab
        press(&mut app, KeyCode::Down);
        assert_eq!(app.modal, Some(Modal::Details { scroll: 1 }));
        assert_eq!(app.scroll, 0);

        press(&mut app, KeyCode::Esc);
        assert!(app.modal.is_none());
        assert!(app.session.result().is_some());
    }

    #[test]
    fn health_event_updates_status() {
        let mut app = app();
        let command = press(&mut app, KeyCode::Char('r'));
        assert!(matches!(command, Some(Command::CheckHealth { .. })));
        app.apply_event(AppEvent::HealthChecked(HealthStatus::Sleeping));
        assert_eq!(app.health, HealthStatus::Sleeping);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        app.handle_key(release);
        assert!(!app.should_quit);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn theme_from_config() {
        let mut config = Config::default();
        config.theme = "nord".to_string();
        let app = App::with_config(LogBuffer::new(), config);
        assert_eq!(app.theme.name, "nord");
    }
}
