// Modal overlay rendering
//
// Modals are rendered on top of the main content:
// - Help modal: keyboard shortcuts and current config
// - Error modal: failed analysis with troubleshooting hints
// - Details modal: request and raw response of the stored run

use super::{centered_rect, clamp_scroll};
use crate::report::run_details;
use crate::tui::app::App;
use crate::tui::modal::Modal;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: Modal, app: &App) {
    match modal {
        Modal::Help => render_help(f, app),
        Modal::Error => render_error(f, app),
        Modal::Details { scroll } => render_details(f, app, scroll),
    }
}

/// Render the help modal overlay
fn render_help(f: &mut Frame, app: &App) {
    let key_style = Style::default().fg(app.theme.chart_primary);
    let desc_style = Style::default().fg(app.theme.foreground);
    let header_style = Style::default()
        .fg(app.theme.highlight)
        .add_modifier(Modifier::BOLD);
    let divider_style = Style::default().fg(app.theme.border);

    // Helper to create a keybind line: "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Analysis", header_style)),
        kb("Enter, a", "Run analysis"),
        kb("n", "New analysis (clear results)"),
        kb("+ / -", "Records ±1"),
        kb("] / [", "Records ±10"),
        kb("t", "Cycle critical threshold"),
        Line::raw(""),
        Line::from(Span::styled("  Workflow", header_style)),
        kb("u", "Edit base URL"),
        kb("r", "Re-check health"),
        Line::raw(""),
        Line::from(Span::styled("  Results", header_style)),
        kb("1-6", "Jump to tab"),
        kb("Tab", "Next tab"),
        kb("Shift+Tab", "Previous tab"),
        kb("↑/↓, j/k", "Scroll"),
        kb("PgUp/PgDn", "Scroll a page"),
        Line::raw(""),
        Line::from(Span::styled("  Export", header_style)),
        kb("x", "Write CSV, JSON and summary"),
        kb("y", "Copy summary report"),
        kb("d", "Request / response details"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("?", "Toggle this help"),
        kb("q", "Quit"),
        Line::raw(""),
        Line::from(Span::styled(
            "  ──────────────────────────────────",
            divider_style,
        )),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(app.theme.name, key_style),
            Span::styled("  |  Export: ", desc_style),
            Span::styled(app.config.export_dir.display().to_string(), key_style),
        ]),
    ]);

    let width = 50;
    let height = 35;
    let area = centered_rect(width, height, f.area());

    // Clear the area behind the modal
    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(app.theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.highlight))
                .border_type(app.theme.border_type)
                .title(" Help ")
                .title_bottom(Line::from(" Press ? or Esc to close ").centered()),
        );

    f.render_widget(paragraph, area);
}

/// Render the failed-analysis modal
fn render_error(f: &mut Frame, app: &App) {
    let Some(error) = app.session.last_error() else {
        return;
    };
    let theme = &app.theme;

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("  ❌ {}", error.title()),
            Style::default()
                .fg(theme.critical)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(theme.foreground),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "  Troubleshooting:",
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    for (i, hint) in error.hints().iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("  {}. {}", i + 1, hint),
            Style::default().fg(theme.foreground),
        )));
    }

    let width = 70;
    let height = (lines.len() as u16 + 6).min(24);
    let area = centered_rect(width, height, f.area());

    f.render_widget(Clear, area);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .style(Style::default().bg(theme.background))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.critical))
                .border_type(theme.border_type)
                .title(" Analysis Failed ")
                .title_bottom(Line::from(" Press Enter or Esc to dismiss ").centered()),
        );

    f.render_widget(paragraph, area);
}

/// Render the request / raw response modal
fn render_details(f: &mut Frame, app: &App, scroll: usize) {
    let Some(result) = app.session.result() else {
        return;
    };
    let theme = &app.theme;

    let text = run_details(result, &app.config.webhook_url());
    let area = centered_rect(90, 30, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .border_type(theme.border_type)
        .title(" Run Details ")
        .title_bottom(Line::from(" ↑/↓ scroll · d or Esc to close ").centered());
    let viewport = block.inner(area).height;
    let scroll = clamp_scroll(scroll, text.lines().count(), viewport);

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(theme.foreground).bg(theme.background))
        .scroll((scroll, 0))
        .block(block);

    f.render_widget(paragraph, area);
}
