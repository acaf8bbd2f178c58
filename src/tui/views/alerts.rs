// Alerts tab - previews of the notifications the workflow sends
//
// Left: critical alert cards (records at or above the threshold).
// Right: the urgent-case digest.

use super::clamp_scroll;
use crate::report::{critical_alert_card, critical_rows, urgent_summary, CRITICAL_PREVIEW};
use crate::session::AnalysisResult;
use crate::tui::app::App;
use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_critical(f, chunks[0], app, result);
    render_urgent(f, chunks[1], app, result);
}

fn render_critical(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;
    let critical = critical_rows(&result.records, app.threshold);

    let mut lines = Vec::new();
    if critical.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("✅ No records at severity {} or above", app.threshold),
            Style::default().fg(theme.ok),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            format!("{} critical alerts (severity ≥ {})", critical.len(), app.threshold),
            Style::default()
                .fg(theme.critical)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::raw(""));

        for record in critical.iter().take(CRITICAL_PREVIEW) {
            let card = critical_alert_card(record);
            for (i, text) in card.lines().enumerate() {
                let style = if i == 0 {
                    Style::default()
                        .fg(theme.critical)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.foreground)
                };
                lines.push(Line::from(Span::styled(format!("  {}", text), style)));
            }
            lines.push(Line::from(Span::styled(
                "  ────────────────────────────",
                Style::default().fg(theme.border),
            )));
        }

        if critical.len() > CRITICAL_PREVIEW {
            lines.push(Line::from(Span::styled(
                format!("  +{} more", critical.len() - CRITICAL_PREVIEW),
                Style::default().fg(theme.muted),
            )));
        }
    }

    render_scrolled(f, area, app, lines, " 🚨 Critical Alerts ");
}

fn render_urgent(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;
    let now = Local::now().naive_local();

    let lines = match urgent_summary(&result.records, now) {
        Some(summary) => summary
            .lines()
            .enumerate()
            .map(|(i, text)| {
                let style = if i == 0 || text.starts_with('⚡') {
                    Style::default()
                        .fg(theme.urgent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.foreground)
                };
                Line::from(Span::styled(text.to_string(), style))
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "✅ No urgent cases",
            Style::default().fg(theme.ok),
        ))],
    };

    render_scrolled(f, area, app, lines, " 📊 Urgent Summary ");
}

fn render_scrolled(f: &mut Frame, area: Rect, app: &App, lines: Vec<Line>, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
        .title(title.to_string());
    let viewport = block.inner(area).height;
    let scroll = clamp_scroll(app.scroll, lines.len(), viewport);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block);
    f.render_widget(paragraph, area);
}
