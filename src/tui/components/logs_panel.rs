//! Logs panel component
//!
//! Displays the most recent system log entries captured by the TUI log layer,
//! color-coded by level. Always follows the tail.

use crate::logging::LogEntry;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the logs panel
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    // Borders take two rows
    let visible = area.height.saturating_sub(2) as usize;
    let entries = app.log_buffer.recent(visible);

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry))
                .style(Style::default().fg(app.theme.log_color(entry.level)))
        })
        .collect();

    let list = List::new(items).block(block(&app.theme));
    f.render_widget(list, area);
}

fn block(theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.panel_logs))
        .title(" System Logs ")
}

/// One log line: "HH:MM:SS LEVEL message"
pub fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "{} {:<5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}
