// Processing view - shown while the workflow call is in flight
//
// The call is a single blocking request, so progress is elapsed time against
// the per-record estimate; the gauge holds at 99% until the reply arrives.

use crate::report::Estimate;
use crate::trigger::HealthStatus;
use crate::tui::app::App;
use crate::tui::components::format_duration;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some((request, started)) = app.session.pending_request() else {
        return;
    };
    let theme = &app.theme;
    let elapsed = started.elapsed().as_secs_f64();
    let estimate = Estimate::for_count(request.record_count);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let ratio = if estimate.secs == 0 {
        0.0
    } else {
        (elapsed / estimate.secs as f64).min(0.99)
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(" Progress "),
        )
        .gauge_style(Style::default().fg(theme.chart_primary))
        .ratio(ratio)
        .label(format!(
            "{} / ~{}",
            format_duration(elapsed),
            format_duration(estimate.secs as f64)
        ));
    f.render_widget(gauge, chunks[0]);

    let muted = Style::default().fg(theme.muted);
    let text = Style::default().fg(theme.foreground);

    let stage = if ratio < 0.1 {
        "Triggering workflow"
    } else if ratio < 0.6 {
        "Fetching CADEC, FDA and PubMed records"
    } else {
        "Running AI severity analysis"
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "{} Analyzing {} records…",
                app.spinner_char(),
                request.record_count
            ),
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Stage:    ", muted),
            Span::styled(stage, text),
        ]),
        Line::from(vec![
            Span::styled("  Elapsed:  ", muted),
            Span::styled(format_duration(elapsed), text),
        ]),
        Line::from(vec![
            Span::styled("  Timeout:  ", muted),
            Span::styled(format_duration(request.timeout_secs() as f64), text),
        ]),
        Line::from(vec![
            Span::styled("  Workflow: ", muted),
            Span::styled(app.config.webhook_url(), text),
        ]),
    ];

    if app.health == HealthStatus::Sleeping {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  The deployment looked asleep; waking it can take about a minute.",
            Style::default().fg(theme.urgent),
        )));
    }

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Analysis "),
    );
    f.render_widget(paragraph, chunks[1]);
}
