// PubMed tab - research articles with risk badges
//
// Header figures cover every PubMed row; cards are shown only for rows
// that carry a title.

use super::clamp_scroll;
use crate::report::{pubmed_articles, PubmedStats};
use crate::session::AnalysisResult;
use crate::tui::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, result: &AnalysisResult) {
    let theme = &app.theme;
    let articles = pubmed_articles(&result.records);

    if articles.is_empty() {
        let placeholder = Paragraph::new("ℹ️ No PubMed articles in this batch")
            .style(Style::default().fg(theme.muted))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.border_type)
                    .border_style(Style::default().fg(theme.border))
                    .title(" 📚 PubMed Research Articles "),
            );
        f.render_widget(placeholder, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let stats = PubmedStats::compute(&result.records);
    let muted = Style::default().fg(theme.muted);
    let bold = Style::default()
        .fg(theme.foreground)
        .add_modifier(Modifier::BOLD);
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" Articles: ", muted),
        Span::styled(stats.articles.to_string(), bold),
        Span::styled("   Avg Severity: ", muted),
        Span::styled(format!("{:.1}/5", stats.mean_severity), bold),
        Span::styled("   High Risk: ", muted),
        Span::styled(
            stats.high_risk.to_string(),
            Style::default()
                .fg(theme.critical)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" ✅ {} research articles with metadata ", articles.len())),
    );
    f.render_widget(header, chunks[0]);

    let mut lines = Vec::new();
    for (record, band) in &articles {
        let color = theme.risk_color(*band);
        let field = |label: &str, value: Option<&str>, fallback: &str| -> Line<'static> {
            Line::from(vec![
                Span::styled(format!("   {:<10}", label), muted),
                Span::styled(
                    value.unwrap_or(fallback).to_string(),
                    Style::default().fg(theme.foreground),
                ),
            ])
        };

        lines.push(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(color)),
            Span::styled(
                format!("[{}] ", band.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "{}/5 · {}",
                    record.ai_severity_score,
                    title_case(record.category_text())
                ),
                Style::default().fg(color),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("▌ ", Style::default().fg(color)),
            Span::styled(format!("📄 {}", record.title().unwrap_or_default()), bold),
        ]));
        lines.push(field("Journal:", record.pubmed_journal.as_deref(), "Unknown"));
        lines.push(field("Authors:", record.pubmed_authors.as_deref(), "Not specified"));
        lines.push(field("Published:", record.pubmed_date.as_deref(), "Unknown"));
        lines.push(Line::from(vec![
            Span::styled("   🔗 ", muted),
            Span::styled(
                record.url.clone().unwrap_or_else(|| "#".to_string()),
                Style::default().fg(theme.chart_primary),
            ),
            Span::styled(
                format!(" (ID: {})", record.pubmed_id.as_deref().unwrap_or("N/A")),
                muted,
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("   🎯 AI Recommendation: ", muted),
            Span::styled(
                record.action_text().to_string(),
                Style::default().fg(theme.foreground),
            ),
        ]));
        lines.push(Line::raw(""));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" 📚 PubMed Research Articles ");
    let viewport = block.inner(chunks[1]).height;
    let scroll = clamp_scroll(app.scroll, lines.len(), viewport);

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(block);
    f.render_widget(paragraph, chunks[1]);
}

/// "drug interaction" -> "Drug Interaction"
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("drug interaction"), "Drug Interaction");
        assert_eq!(title_case("CARDIAC"), "Cardiac");
        assert_eq!(title_case(""), "");
    }
}
