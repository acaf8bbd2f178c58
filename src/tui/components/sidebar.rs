// Sidebar component
//
// Analysis parameters and their cost/time estimate, deployment health, and
// the key hints for changing them. Mirrors what the next `Enter` will send.

use super::formatters::{format_cost, format_duration};
use crate::report::Estimate;
use crate::trigger::{timeout_secs_for, HealthStatus};
use crate::tui::app::App;
use crate::util::fit_width;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the parameters sidebar
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let muted = Style::default().fg(theme.muted);
    let value = Style::default()
        .fg(theme.foreground)
        .add_modifier(Modifier::BOLD);
    let header = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);
    // Inner width minus the 2-space indent
    let text_width = area.width.saturating_sub(4) as usize;

    let estimate = Estimate::for_count(app.record_count);

    let mut lines = vec![Line::from(Span::styled("Workflow", header))];

    match &app.url_input {
        Some(input) => {
            // Show the tail while typing so the cursor stays visible
            let shown: String = {
                let chars: Vec<char> = input.chars().collect();
                let keep = text_width.saturating_sub(1);
                chars[chars.len().saturating_sub(keep)..].iter().collect()
            };
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    format!("{}▏", shown),
                    Style::default().fg(theme.selection_fg).bg(theme.selection),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                "  Enter save · Esc cancel",
                muted,
            )));
        }
        None => {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(fit_width(&app.config.base_url, text_width), value),
            ]));
        }
    }

    let (health_color, health_text) = match app.health {
        HealthStatus::Online => (theme.ok, "● online".to_string()),
        HealthStatus::Sleeping => (theme.urgent, "◐ may be sleeping".to_string()),
        HealthStatus::Checking => (theme.muted, format!("{} checking", app.spinner_char())),
        HealthStatus::Unknown => (theme.muted, "○ not checked".to_string()),
    };
    lines.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(health_text, Style::default().fg(health_color)),
    ]));
    if app.health == HealthStatus::Sleeping {
        lines.push(Line::from(Span::styled(
            "  first run may take ~1 min",
            muted,
        )));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Analysis", header)));
    lines.push(Line::from(vec![
        Span::styled("  Records:    ", muted),
        Span::styled(app.record_count.to_string(), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Critical ≥  ", muted),
        Span::styled(
            app.threshold.to_string(),
            Style::default()
                .fg(theme.severity_color(app.threshold.value()))
                .add_modifier(Modifier::BOLD),
        ),
    ]));

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Estimate", header)));
    lines.push(Line::from(vec![
        Span::styled("  Time:       ", muted),
        Span::styled(
            format!(
                "~{} ({:.1} min)",
                format_duration(estimate.secs as f64),
                estimate.minutes()
            ),
            Style::default().fg(theme.foreground),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Cost:       ", muted),
        Span::styled(format_cost(estimate.cost), Style::default().fg(theme.foreground)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  AI calls:   ", muted),
        Span::styled(estimate.ai_calls.to_string(), Style::default().fg(theme.foreground)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Timeout:    ", muted),
        Span::styled(
            format_duration(timeout_secs_for(app.record_count) as f64),
            Style::default().fg(theme.foreground),
        ),
    ]));

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Keys", header)));
    let hint = |key: &str, desc: &str| -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("  {:<6}", key), Style::default().fg(theme.chart_primary)),
            Span::styled(desc.to_string(), muted),
        ])
    };
    let start_hint = if app.session.is_analyzing() {
        "running…"
    } else {
        "analyze"
    };
    lines.push(hint("Enter", start_hint));
    lines.push(hint("+ -", "records ±1"));
    lines.push(hint("] [", "records ±10"));
    lines.push(hint("t", "threshold"));
    lines.push(hint("u", "edit URL"));
    lines.push(hint("r", "check health"));
    lines.push(hint("n", "new analysis"));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Settings "),
    );

    f.render_widget(paragraph, area);
}
