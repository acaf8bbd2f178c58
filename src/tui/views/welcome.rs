// Welcome view - shown until the first analysis completes
//
// Quick start steps, what a run produces, and the measured throughput table.

use crate::report::{BENCHMARK, COST_PER_RECORD};
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Wall-clock times measured for the BENCHMARK record counts
const BENCHMARK_TIMES: [&str; 5] = ["4s", "24s", "91s", "2m 3s", "3m 13s"];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_intro(f, chunks[0], app);
    render_benchmark(f, chunks[1], app);
}

fn render_intro(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let header = Style::default()
        .fg(theme.highlight)
        .add_modifier(Modifier::BOLD);
    let text = Style::default().fg(theme.foreground);
    let muted = Style::default().fg(theme.muted);
    let key = Style::default().fg(theme.chart_primary);

    let bullet = |s: &str| Line::from(Span::styled(format!("  • {}", s), text));

    let (best_count, best_secs) = BENCHMARK
        .iter()
        .copied()
        .fold((0, f64::MAX), |best, b| if b.1 < best.1 { b } else { best });

    let lines = vec![
        Line::from(Span::styled("🚀 Quick Start", header)),
        Line::from(vec![
            Span::styled("  1. Pick a record count with ", text),
            Span::styled("+ - [ ]", key),
        ]),
        Line::from(vec![
            Span::styled("  2. Press ", text),
            Span::styled("Enter", key),
            Span::styled(" to run the analysis", text),
        ]),
        Line::from(vec![
            Span::styled("  3. Browse tabs with ", text),
            Span::styled("1-6", key),
            Span::styled(", export with ", text),
            Span::styled("x", key),
        ]),
        Line::raw(""),
        Line::from(Span::styled("📊 What You Get", header)),
        bullet("Multi-source data (CADEC + FDA + PubMed)"),
        bullet("AI severity assessment (1-5 scale)"),
        bullet("Medical categorization and urgency"),
        bullet("Critical alert and urgent summary previews"),
        bullet("Charts, record table and PubMed article cards"),
        bullet("Exports: CSV, JSON and a text summary report"),
        Line::raw(""),
        Line::from(Span::styled("⚡ Performance", header)),
        bullet(&format!(
            "Speed: {:.2}s per record at scale ({} records)",
            best_secs, best_count
        )),
        bullet(&format!("Cost: ${} per record", COST_PER_RECORD)),
        bullet("Tested: 100 records in one run"),
        Line::raw(""),
        Line::from(Span::styled(
            "  Hosted deployments sleep when idle; the first run may take an extra minute.",
            muted,
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Welcome "),
    );

    f.render_widget(paragraph, area);
}

fn render_benchmark(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let rows: Vec<Row> = BENCHMARK
        .iter()
        .zip(BENCHMARK_TIMES)
        .map(|((count, per_record), time)| {
            Row::new(vec![
                Cell::from(count.to_string()),
                Cell::from(time),
                Cell::from(format!("{:.2}s", per_record)),
                Cell::from("✅").style(Style::default().fg(theme.ok)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["Records", "Time", "Per Record", "Status"]).style(
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
    )
    .style(Style::default().fg(theme.foreground))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Benchmarks "),
    );

    f.render_widget(table, area);
}
