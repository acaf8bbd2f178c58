// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, background results)
// - Running workflow calls and health probes off the UI loop

pub mod app;
pub mod clipboard;
pub mod components;
pub mod layout;
pub mod modal;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::trigger::{HealthStatus, Outcome, TriggerClient};
use anyhow::{Context, Result};
use app::{App, AppEvent, Command};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done.
pub async fn run_tui(log_buffer: LogBuffer, config: Config) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::with_config(log_buffer, config);

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// This loop handles three types of events:
/// 1. Keyboard input (for navigation and commands)
/// 2. Timer ticks (for periodic redraws and spinners)
/// 3. Background results (workflow outcome, health probe)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    // Probe the deployment once at startup so the sidebar can warn early
    spawn_command(app.health_check(), &event_tx);

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        if let Some(command) = app.handle_key(key_event) {
                            spawn_command(command, &event_tx);
                        }
                    }
                }
            } => {}

            // Periodic tick for redrawing
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            // Background results
            Some(app_event) = event_rx.recv() => {
                app.apply_event(app_event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Run a command on a tokio task; its result comes back through `tx`
fn spawn_command(command: Command, tx: &mpsc::UnboundedSender<AppEvent>) {
    let tx = tx.clone();
    match command {
        Command::Trigger {
            base_url,
            webhook_path,
            record_count,
        } => {
            tokio::spawn(async move {
                let started = Instant::now();
                let outcome = match TriggerClient::new(&base_url, &webhook_path) {
                    Ok(client) => client.trigger(record_count).await,
                    Err(e) => {
                        tracing::error!("Cannot build workflow client: {:#}", e);
                        Outcome::ConnectionError {
                            url: format!("{}/{}", base_url, webhook_path),
                        }
                    }
                };
                let elapsed = started.elapsed();
                // Receiver only goes away when the UI is shutting down
                let _ = tx.send(AppEvent::TriggerFinished { outcome, elapsed });
            });
        }
        Command::CheckHealth {
            base_url,
            webhook_path,
        } => {
            tokio::spawn(async move {
                let status = match TriggerClient::new(&base_url, &webhook_path) {
                    Ok(client) => client.check_health().await,
                    Err(e) => {
                        tracing::error!("Cannot build workflow client: {:#}", e);
                        HealthStatus::Sleeping
                    }
                };
                let _ = tx.send(AppEvent::HealthChecked(status));
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger::mock::{MockReply, MockWorkflow};

    #[tokio::test]
    async fn trigger_command_reports_back() {
        let mock = MockWorkflow::spawn(MockReply::Records).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_command(
            Command::Trigger {
                base_url: mock.base_url(),
                webhook_path: "webhook/test".to_string(),
                record_count: 4,
            },
            &tx,
        );

        let event = rx.recv().await.unwrap();
        mock.shutdown().await;

        let mut config = Config::default();
        config.record_count = 4;
        let mut app = App::with_config(LogBuffer::new(), config);
        app.start_analysis();
        app.apply_event(event);
        assert_eq!(app.session.result().map(|r| r.len()), Some(4));
    }

    #[tokio::test]
    async fn health_command_reports_back() {
        let mock = MockWorkflow::spawn(MockReply::Records).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_command(
            Command::CheckHealth {
                base_url: mock.base_url(),
                webhook_path: "webhook/test".to_string(),
            },
            &tx,
        );

        let event = rx.recv().await.unwrap();
        mock.shutdown().await;
        assert!(matches!(event, AppEvent::HealthChecked(HealthStatus::Online)));
    }
}
