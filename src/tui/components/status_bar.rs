// Status bar component
//
// Renders session state at the bottom: phase, records, threshold, health, uptime.

use super::formatters::format_duration;
use crate::session::Phase;
use crate::trigger::HealthStatus;
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the status bar with session state
///
/// Adapts to terminal width:
/// - Wide: Full format with labels
/// - Narrow: Compact icon-based format
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bp = Breakpoint::from_width(area.width);

    let (phase, records) = match app.session.phase() {
        Phase::Idle => ("idle".to_string(), None),
        Phase::Analyzing { started, .. } => (
            format!("analyzing {}", format_duration(started.elapsed().as_secs_f64())),
            None,
        ),
        Phase::Done(result) => ("done".to_string(), Some(result.len())),
    };

    let health_icon = match app.health {
        HealthStatus::Online => "●",
        HealthStatus::Sleeping => "◐",
        HealthStatus::Checking => "◌",
        HealthStatus::Unknown => "○",
    };

    let records_text = records.map(|n| n.to_string()).unwrap_or_else(|| "-".into());

    let status_text = if !bp.at_least(Breakpoint::Wide) {
        format!(
            " {} │ {} │ 📄 {} │ ⚠ ≥{} │ {}",
            app.uptime(),
            phase,
            records_text,
            app.threshold,
            health_icon,
        )
    } else {
        let error = if app.session.last_error().is_some() {
            " │ last run failed"
        } else {
            ""
        };
        format!(
            " {} │ {} │ 📄 {} records │ ⚠ critical ≥ {} │ {} {} │ next run: {} records{}",
            app.uptime(),
            phase,
            records_text,
            app.threshold,
            health_icon,
            app.health.describe(),
            app.record_count,
            error,
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
