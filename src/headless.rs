// Headless runner - one analysis from the command line
//
// Drives the same Session the TUI uses: start, trigger, finish, then print
// the text report and alert previews and write the exports.

use crate::config::Config;
use crate::report::export::write_exports;
use crate::report::summary::SummaryReport;
use crate::report::{
    critical_alert_card, critical_rows, email_notice, urgent_summary, CRITICAL_PREVIEW,
};
use crate::session::{Finished, Session};
use crate::trigger::{HealthStatus, TriggerClient};
use anyhow::Result;
use chrono::Local;
use std::io::Write;
use std::path::PathBuf;

/// Run one analysis, printing to `out`; returns the export paths written
pub async fn run_analysis(
    config: &Config,
    write_files: bool,
    out: &mut impl Write,
) -> Result<Vec<PathBuf>> {
    let client = TriggerClient::new(&config.base_url, &config.webhook_path)?;

    let health = client.check_health().await;
    writeln!(out, "Workflow {}: {}", client.base_url(), health.describe())?;

    let mut session = Session::new();
    let request = session.start(config.record_count)?;
    writeln!(
        out,
        "Analyzing {} records (timeout {}s)...",
        request.record_count,
        request.timeout_secs()
    )?;

    let outcome = client.trigger(request.record_count).await;
    let result = match session.finish(outcome)? {
        Finished::Done(result) => result,
        Finished::Failed(error) => {
            writeln!(out, "\n✗ {}: {}", error.title(), error)?;
            for hint in error.hints() {
                writeln!(out, "  • {}", hint)?;
            }
            return Err(anyhow::anyhow!(error.clone()));
        }
    };

    let now = Local::now().naive_local();
    let report = SummaryReport::new(result, config.threshold, &config.report.contact, now);
    writeln!(out, "{}", report.render())?;
    if let Some(notice) = email_notice(result, &config.report.contact) {
        writeln!(out, "{}\n", notice)?;
    }

    let critical = critical_rows(&result.records, config.threshold);
    if !critical.is_empty() {
        writeln!(out, "Critical alerts ({}):\n", critical.len())?;
        for record in critical.iter().take(CRITICAL_PREVIEW) {
            writeln!(out, "{}\n", critical_alert_card(record))?;
        }
        if critical.len() > CRITICAL_PREVIEW {
            writeln!(out, "+{} more\n", critical.len() - CRITICAL_PREVIEW)?;
        }
    }

    if let Some(summary) = urgent_summary(&result.records, now) {
        writeln!(out, "{}\n", summary)?;
    }

    if !write_files {
        return Ok(Vec::new());
    }

    let paths = write_exports(
        &config.export_dir,
        result,
        config.threshold,
        &config.report.contact,
        now,
    )?;
    for path in &paths {
        writeln!(out, "Wrote {}", path.display())?;
    }
    Ok(paths)
}

/// Probe the deployment and print its status
pub async fn check_health(config: &Config, out: &mut impl Write) -> Result<HealthStatus> {
    let client = TriggerClient::new(&config.base_url, &config.webhook_path)?;
    let status = client.check_health().await;
    writeln!(out, "{}: {}", client.health_url(), status.describe())?;
    Ok(status)
}
