// Records tab - the complete result table
//
// Severity cells are tinted by risk band; long actions are cut to the
// column width. Up/Down scroll the rows.

use crate::report::RiskBand;
use crate::session::AnalysisResult;
use crate::tui::app::App;
use crate::util::fit_width;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

const ID_WIDTH: u16 = 8;
const SOURCE_WIDTH: u16 = 10;
const SEVERITY_WIDTH: u16 = 8;
const CATEGORY_WIDTH: u16 = 16;
const URGENCY_WIDTH: u16 = 10;
const CONFIDENCE_WIDTH: u16 = 10;

pub fn render(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;

    // Everything left over after the fixed columns, borders and spacing
    let action_width = area
        .width
        .saturating_sub(
            ID_WIDTH + SOURCE_WIDTH + SEVERITY_WIDTH + CATEGORY_WIDTH + URGENCY_WIDTH + CONFIDENCE_WIDTH,
        )
        .saturating_sub(2 + 6)
        .max(10);

    // Keep the last page reachable but never scroll past it
    let viewport = area.height.saturating_sub(3) as usize;
    let offset = app.scroll.min(result.len().saturating_sub(viewport));

    let rows: Vec<Row> = result
        .records
        .iter()
        .skip(offset)
        .map(|record| {
            let band = RiskBand::from_severity(record.ai_severity_score);
            Row::new(vec![
                Cell::from(fit_width(&record.id_text(), ID_WIDTH as usize)),
                Cell::from(fit_width(record.source_text(), SOURCE_WIDTH as usize)),
                Cell::from(format!("{}/5", record.ai_severity_score)).style(
                    Style::default()
                        .fg(theme.risk_color(band))
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(fit_width(record.category_text(), CATEGORY_WIDTH as usize)),
                Cell::from(record.urgency_text().to_string()).style(if record.is_urgent() {
                    Style::default().fg(theme.urgent)
                } else {
                    Style::default().fg(theme.foreground)
                }),
                Cell::from(fit_width(record.action_text(), action_width as usize)),
                Cell::from(record.confidence_text()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(ID_WIDTH),
            Constraint::Length(SOURCE_WIDTH),
            Constraint::Length(SEVERITY_WIDTH),
            Constraint::Length(CATEGORY_WIDTH),
            Constraint::Length(URGENCY_WIDTH),
            Constraint::Min(action_width),
            Constraint::Length(CONFIDENCE_WIDTH),
        ],
    )
    .header(
        Row::new(vec!["ID", "Source", "Severity", "Category", "Urgency", "Action", "Confidence"]).style(
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
            .title(format!(
                " 📋 Complete Results ({}-{} of {}) ",
                (offset + 1).min(result.len()),
                (offset + viewport).min(result.len()),
                result.len()
            )),
    );

    f.render_widget(table, area);
}
