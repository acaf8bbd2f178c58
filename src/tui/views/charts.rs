// Charts tab - distributions and throughput
//
// 2x2 grid:
// - Severity distribution (ascending severity)
// - Medical categories (most frequent first)
// - Urgency levels (first-seen order)
// - Seconds per record: benchmark curve plus this run

use crate::report::{
    by_count_desc, category_distribution, severity_distribution, severity_mode,
    urgency_distribution, Summary, BENCHMARK,
};
use crate::session::AnalysisResult;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::truncate_chars;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols,
    text::Line,
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

/// Longest category label shown on the horizontal chart
const LABEL_CHARS: usize = 14;

pub fn render(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_severity(f, top[0], app, result);
    render_categories(f, top[1], app, result);
    render_urgency(f, bottom[0], app, result);
    render_speed(f, bottom[1], app, result);
}

fn block(title: String, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(title)
}

fn render_placeholder(f: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let placeholder = Paragraph::new("No data in this batch")
        .style(Style::default().fg(theme.muted))
        .block(block(title.to_string(), theme));
    f.render_widget(placeholder, area);
}

fn render_severity(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;
    let distribution = severity_distribution(&result.records);

    let title = match severity_mode(&distribution) {
        Some((severity, count)) => format!(
            " Severity Distribution · most common: {} ({} cases) ",
            severity, count
        ),
        None => " Severity Distribution ".to_string(),
    };

    let bars: Vec<Bar> = distribution
        .iter()
        .map(|(severity, count)| {
            Bar::default()
                .label(Line::from(severity.to_string()))
                .value(*count as u64)
                .style(Style::default().fg(theme.severity_color(*severity)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block(title, theme))
        .data(BarGroup::default().bars(&bars))
        .bar_width(5)
        .bar_gap(2)
        .style(Style::default().fg(theme.foreground));

    f.render_widget(chart, area);
}

fn render_categories(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;
    let categories = by_count_desc(&category_distribution(&result.records));
    if categories.is_empty() {
        render_placeholder(f, area, " Medical Categories ", theme);
        return;
    }

    let bars: Vec<Bar> = categories
        .iter()
        .enumerate()
        .map(|(idx, (name, count))| {
            Bar::default()
                .label(Line::from(truncate_chars(name, LABEL_CHARS).to_string()))
                .value(*count as u64)
                .style(Style::default().fg(palette(idx, theme)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block(" Medical Categories ".to_string(), theme))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .style(Style::default().fg(theme.foreground));

    f.render_widget(chart, area);
}

fn render_urgency(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;
    let urgency = urgency_distribution(&result.records);
    if urgency.is_empty() {
        render_placeholder(f, area, " Urgency Levels ", theme);
        return;
    }

    let bars: Vec<Bar> = urgency
        .iter()
        .map(|(level, count)| {
            let color = if matches!(level.as_str(), "urgent" | "immediate") {
                theme.urgent
            } else {
                theme.chart_primary
            };
            Bar::default()
                .label(Line::from(level.clone()))
                .value(*count as u64)
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block(" Urgency Levels ".to_string(), theme))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .style(Style::default().fg(theme.foreground));

    f.render_widget(chart, area);
}

fn render_speed(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;
    let summary = Summary::compute(result, app.threshold);

    let benchmark: Vec<(f64, f64)> = BENCHMARK
        .iter()
        .map(|(count, secs)| (*count as f64, *secs))
        .collect();
    let this_run = [(summary.total as f64, summary.per_record_secs)];

    let x_max = (summary.total as f64).max(100.0);
    let y_max = benchmark
        .iter()
        .map(|(_, secs)| *secs)
        .chain(std::iter::once(summary.per_record_secs))
        .fold(0.0_f64, f64::max)
        .ceil()
        + 1.0;

    let datasets = vec![
        Dataset::default()
            .name("Validated tests")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.chart_primary))
            .data(&benchmark),
        Dataset::default()
            .name(format!("This run {:.2}s", summary.per_record_secs))
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(theme.critical))
            .data(&this_run),
    ];

    let chart = Chart::new(datasets)
        .block(block(" Speed Improves with More Records ".to_string(), theme))
        .x_axis(
            Axis::default()
                .title("records")
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, x_max])
                .labels(vec![
                    Line::from("0"),
                    Line::from(format!("{}", x_max as u64)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("s/record")
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, y_max])
                .labels(vec![Line::from("0"), Line::from(format!("{:.0}", y_max))]),
        );

    f.render_widget(chart, area);
}

/// Category colors cycle through the theme's accent palette
fn palette(idx: usize, theme: &Theme) -> Color {
    let colors = [
        theme.chart_primary,
        theme.chart_secondary,
        theme.highlight,
        theme.ok,
        theme.source_fda,
        theme.urgent,
    ];
    colors[idx % colors.len()]
}
