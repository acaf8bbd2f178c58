// FDA Adverse Event Intelligence - terminal dashboard
//
// Triggers a remote multi-source analysis workflow (FDA adverse events,
// PubMed literature, patient forums) and presents the AI-scored records.
//
// Architecture:
// - Trigger (reqwest): one webhook POST per analysis, plus a health probe
// - Normalize: folds the workflow's reply shapes into one record list
// - Session: idle / processing / completed state machine
// - Report: severity metrics, alerts, summary text, CSV/JSON exports
// - TUI (ratatui): dashboard with tabs, charts and a logs panel
// - Headless: `run` and `health` subcommands for scripts and CI

mod cli;
mod config;
mod headless;
mod logging;
mod normalize;
mod report;
mod session;
mod startup;
mod trigger;
mod tui;
mod util;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, Mode};
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use trigger::mock::{MockReply, MockWorkflow, DEMO_RECORD_DELAY};
use trigger::DEFAULT_WEBHOOK_PATH;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set up tracing for the chosen mode
///
/// TUI mode captures logs into the buffer (writing to the terminal would garble
/// the display); other modes write to stderr so stdout stays clean for reports.
/// The returned guard must live until exit so the file writer flushes.
fn init_logging(
    config: &Config,
    log_buffer: &LogBuffer,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("adverse_intel={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let tui_layer = config
        .enable_tui
        .then(|| TuiLogLayer::new(log_buffer.clone()));
    let stderr_layer = (!config.enable_tui)
        .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let dir = &config.logging.file_dir;
                let prefix = &config.logging.file_prefix;
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(dir, prefix),
                    LogRotation::Daily => tracing_appender::rolling::daily(dir, prefix),
                    LogRotation::Never => tracing_appender::rolling::never(dir, prefix),
                };

                // Writes happen on a background thread
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                // JSON for structured log parsing
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false);
                (Some(layer), Some(guard))
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                (None, None)
            }
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config subcommands never start logging or the dashboard
    if let Some(Commands::Config { show, path, reset }) = &cli.command {
        cli::handle_config(*show, *path, *reset);
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    cli.apply(&mut config);

    let log_buffer = LogBuffer::new();
    let file_guard = init_logging(&config, &log_buffer);

    // Demo mode: answer the webhook locally
    let mock = if config.demo_mode {
        let mock = MockWorkflow::spawn_with_delay(MockReply::Records, DEMO_RECORD_DELAY).await?;
        config.base_url = mock.base_url();
        config.webhook_path = DEFAULT_WEBHOOK_PATH.to_string();
        tracing::info!("Running in DEMO MODE against {}", config.base_url);
        Some(mock)
    } else {
        None
    };

    let mut failed = false;
    match cli.mode(&config) {
        Mode::Analyze { write_files } => {
            let mut stdout = std::io::stdout();
            if let Err(e) = headless::run_analysis(&config, write_files, &mut stdout).await {
                tracing::error!("Analysis failed: {:#}", e);
                failed = true;
            }
        }
        Mode::Health => {
            let mut stdout = std::io::stdout();
            match headless::check_health(&config, &mut stdout).await {
                Ok(status) => failed = status != trigger::HealthStatus::Online,
                Err(e) => {
                    tracing::error!("Health check failed: {:#}", e);
                    failed = true;
                }
            }
        }
        Mode::Dashboard => {
            startup::print_startup(&config);
            startup::log_startup(&config);

            tracing::info!("Starting TUI");
            if let Err(e) = tui::run_tui(log_buffer, config).await {
                tracing::error!("TUI error: {:?}", e);
                failed = true;
            }
        }
    }

    if let Some(mock) = mock {
        mock.shutdown().await;
    }

    tracing::debug!("Shutdown complete");
    if failed {
        // exit() skips destructors; flush the file writer first
        drop(file_guard);
        std::process::exit(1);
    }
    Ok(())
}
