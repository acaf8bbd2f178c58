// Views module - screen-level rendering logic
//
// The content area shows one of three screens, picked from session state:
// - Welcome: nothing analyzed yet (quick start, benchmark table)
// - Processing: an analysis is in flight
// - Results: tabbed dashboard over the stored result
//
// This module builds the shell around the content and dispatches to it.

mod alerts;
mod charts;
mod modal;
mod processing;
mod pubmed;
mod records;
mod results;
mod welcome;

use super::app::App;
use super::layout::Shell;
use crate::tui::components::{logs_panel, sidebar, status_bar, title_bar};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let shell = Shell::split(f.area());

    title_bar::render(f, shell.title, app);
    if let Some(area) = shell.sidebar {
        sidebar::render(f, area, app);
    }
    render_content(f, shell.content, app);
    logs_panel::render(f, shell.logs, app);
    status_bar::render(f, shell.status, app);

    // Modal overlay (on top of everything)
    if let Some(modal_state) = app.modal {
        modal::render(f, modal_state, app);
    }

    // Toast notification (on top of modal too)
    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }

    // Clear expired toast after render
    app.clear_expired_toast();
}

fn render_content(f: &mut Frame, area: Rect, app: &App) {
    if app.session.is_analyzing() {
        processing::render(f, area, app);
    } else if let Some(result) = app.session.result() {
        results::render(f, area, app, result);
    } else {
        welcome::render(f, area, app);
    }
}

/// Calculate centered rect for overlays
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Clamp a scroll offset so the last line stays reachable but not past it
pub(crate) fn clamp_scroll(scroll: usize, content_lines: usize, viewport: u16) -> u16 {
    let max = content_lines.saturating_sub(viewport as usize);
    scroll.min(max).min(u16::MAX as usize) as u16
}
