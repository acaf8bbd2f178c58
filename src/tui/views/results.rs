// Results view - tabbed dashboard over the stored analysis
//
// Tabs: Summary · Alerts · PubMed · Records · Charts · Export.
// Every figure is re-derived from the stored result and the current
// threshold on each frame; nothing here mutates the session.

use super::{alerts, charts, clamp_scroll, pubmed, records};
use crate::normalize::records::value_text;
use crate::report::export::ExportKind;
use crate::report::summary::SummaryReport;
use crate::report::{
    email_notice, has_sources, severity_distribution, severity_mode, SourceKind, SourceMix,
    Summary,
};
use crate::session::AnalysisResult;
use crate::tui::app::{App, ResultsTab};
use crate::tui::components::{format_cost, format_duration, format_percent};
use crate::util::percent;
use chrono::Local;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    // Split into tab bar (3 lines) and content area
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_tab_bar(f, chunks[0], app);

    match app.tab {
        ResultsTab::Summary => render_summary(f, chunks[1], app, result),
        ResultsTab::Alerts => alerts::render(f, chunks[1], app, result),
        ResultsTab::Pubmed => pubmed::render(f, chunks[1], app, result),
        ResultsTab::Records => records::render(f, chunks[1], app, result),
        ResultsTab::Charts => charts::render(f, chunks[1], app, result),
        ResultsTab::Export => render_export(f, chunks[1], app, result),
    }
}

/// Render the tab navigation bar
fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<String> = ResultsTab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| format!(" {}│{} ", i + 1, tab.title()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .select(app.tab.index())
        .style(Style::default().fg(app.theme.foreground))
        .highlight_style(
            Style::default()
                .fg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Summary tab
// ─────────────────────────────────────────────────────────────────────────────

fn render_summary(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let summary = Summary::compute(result, app.threshold);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    render_tiles(f, chunks[0], app, &summary);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_source_gauges(f, lower[0], app, result);
    render_run_details(f, lower[1], app, result, &summary);
}

/// Four headline figures side by side
fn render_tiles(f: &mut Frame, area: Rect, app: &App, summary: &Summary) {
    let theme = &app.theme;
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let critical_color = if summary.critical > 0 {
        theme.critical
    } else {
        theme.ok
    };

    let entries: [(&str, String, Color); 4] = [
        ("Records", summary.total.to_string(), theme.foreground),
        (
            "Critical",
            format!("{} ({})", summary.critical, format_percent(summary.critical_pct())),
            critical_color,
        ),
        (
            "Avg Severity",
            format!("{:.1}/5", summary.mean_severity),
            theme.severity_color(summary.mean_severity.round() as i64),
        ),
        (
            "Speed",
            format!("{:.1}s/record", summary.per_record_secs),
            theme.chart_primary,
        ),
    ];

    for ((label, value, color), tile) in entries.into_iter().zip(tiles.iter()) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(format!(" {} ", label)),
        );
        f.render_widget(paragraph, *tile);
    }
}

/// One gauge per known data source
fn render_source_gauges(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Multi-Source Intelligence ");

    if !has_sources(&result.records) {
        let placeholder = Paragraph::new("No source information in this batch")
            .style(Style::default().fg(theme.muted))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let mix = SourceMix::count(&result.records);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let kinds = [SourceKind::Cadec, SourceKind::Fda, SourceKind::Pubmed];
    for (kind, row) in kinds.into_iter().zip(rows.iter()) {
        let count = mix.get(kind);
        let pct = percent(count, result.len());
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border))
                    .title(format!(" {} · {} ", kind.label(), kind.noun())),
            )
            .gauge_style(Style::default().fg(theme.source_color(kind)))
            .ratio(pct / 100.0)
            .label(format!("{} ({})", count, format_percent(pct)));
        f.render_widget(gauge, *row);
    }

    let known = mix.cadec + mix.fda + mix.pubmed;
    if known < result.len() {
        let note = Paragraph::new(format!("  {} records from other sources", result.len() - known))
            .style(Style::default().fg(theme.muted));
        f.render_widget(note, rows[3]);
    }
}

fn render_run_details(
    f: &mut Frame,
    area: Rect,
    app: &App,
    result: &AnalysisResult,
    summary: &Summary,
) {
    let theme = &app.theme;
    let muted = Style::default().fg(theme.muted);
    let text = Style::default().fg(theme.foreground);

    let distribution = severity_distribution(&result.records);
    let mode = match severity_mode(&distribution) {
        Some((severity, count)) => format!("Severity {} ({} cases)", severity, count),
        None => "-".to_string(),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "✅ Analyzed {} records in {:.1}s",
                summary.total, summary.elapsed_secs
            ),
            Style::default().fg(theme.ok).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(notice) = email_notice(result, &app.config.report.contact) {
        lines.push(Line::from(Span::styled(notice, Style::default().fg(theme.ok))));
    }
    lines.extend([
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Processing time: ", muted),
            Span::styled(format_duration(summary.elapsed_secs), text),
        ]),
        Line::from(vec![
            Span::styled("  Estimated cost:  ", muted),
            Span::styled(format_cost(summary.cost), text),
        ]),
        Line::from(vec![
            Span::styled("  Critical (≥ ", muted),
            Span::styled(summary.threshold.to_string(), text),
            Span::styled("):  ", muted),
            Span::styled(
                summary.critical.to_string(),
                Style::default().fg(theme.critical),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Urgent:          ", muted),
            Span::styled(
                format!("{} ({})", summary.urgent, format_percent(summary.urgent_pct())),
                Style::default().fg(theme.urgent),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Most common:     ", muted),
            Span::styled(mode, text),
        ]),
        Line::from(vec![
            Span::styled("  Press ", muted),
            Span::styled("d", Style::default().fg(theme.chart_primary)),
            Span::styled(" for request / response details", muted),
        ]),
    ]);

    if !result.outputs.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  ── Workflow outputs ──",
            muted.add_modifier(Modifier::DIM),
        )));
        for (key, value) in &result.outputs {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}: ", key), muted),
                Span::styled(value_text(value), text),
            ]));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Run Details ");
    let viewport = block.inner(area).height;
    let scroll = clamp_scroll(app.scroll, lines.len(), viewport);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block);
    f.render_widget(paragraph, area);
}

// ─────────────────────────────────────────────────────────────────────────────
// Export tab
// ─────────────────────────────────────────────────────────────────────────────

fn render_export(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;
    let now = Local::now().naive_local();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(area);

    let muted = Style::default().fg(theme.muted);
    let text = Style::default().fg(theme.foreground);
    let key = Style::default().fg(theme.chart_primary);

    let mut lines: Vec<Line> = ExportKind::ALL
        .iter()
        .map(|kind| {
            Line::from(vec![
                Span::styled(format!("  {:<9}", kind.label()), muted),
                Span::styled(kind.file_name(now), text),
            ])
        })
        .collect();
    lines.push(Line::from(vec![
        Span::styled("  Folder:  ", muted),
        Span::styled(app.config.export_dir.display().to_string(), text),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  Press ", muted),
        Span::styled("x", key),
        Span::styled(" to write all three, ", muted),
        Span::styled("y", key),
        Span::styled(" to copy the summary report", muted),
    ]));
    if !app.last_exports.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  ✓ Last export: {} files", app.last_exports.len()),
            Style::default().fg(theme.ok),
        )));
    }

    let files = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Download Results "),
    );
    f.render_widget(files, chunks[0]);

    // Summary report preview (scrollable)
    let report = SummaryReport::new(result, app.threshold, &app.config.report.contact, now).render();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Summary Report Preview ");
    let viewport = block.inner(chunks[1]).height;
    let scroll = clamp_scroll(app.scroll, report.lines().count(), viewport);

    let preview = Paragraph::new(report)
        .style(text)
        .scroll((scroll, 0))
        .block(block);
    f.render_widget(preview, chunks[1]);
}
