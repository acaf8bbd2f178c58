// Title bar component
//
// Renders the product name with an activity indicator while analyzing.

use crate::report::summary::PRODUCT_NAME;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
///
/// Shows:
/// - Product name
/// - Spinner + record count while an analysis is in flight
/// - Threshold in effect once a result is stored
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let indicator = if let Some((request, _)) = app.session.pending_request() {
        format!(
            " {} analyzing {} records",
            app.spinner_char(),
            request.record_count
        )
    } else if let Some(result) = app.session.result() {
        format!(" ── {} records · critical ≥ {}", result.len(), app.threshold)
    } else {
        String::new()
    };

    let title = Paragraph::new(format!(" 🔬 {}{}", PRODUCT_NAME, indicator))
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(" ? ").right_aligned()),
        );

    f.render_widget(title, area);
}
