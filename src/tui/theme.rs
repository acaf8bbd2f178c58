// Theme support for the TUI
//
// Color palettes selected by name from the config file. "auto" uses the
// terminal's ANSI palette, named themes use true color (RGB).

use crate::report::{RiskBand, SourceKind};
use crate::logging::LogLevel;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Names accepted by `theme = "..."`
pub const THEME_NAMES: [&str; 3] = ["auto", "dracula", "nord"];

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,

    // Severity scale, index 0 = severity 1
    pub severity: [Color; 5],

    // Risk and alert colors
    pub critical: Color,
    pub urgent: Color,
    pub ok: Color,

    // Data sources
    pub source_cadec: Color,
    pub source_fda: Color,
    pub source_pubmed: Color,

    // UI element colors
    pub title: Color,
    pub status_bar: Color,
    pub border: Color,
    pub highlight: Color,
    pub panel_logs: Color,
    pub chart_primary: Color,
    pub chart_secondary: Color,

    // Terminal colors
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub selection: Color,
    pub selection_fg: Color,

    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

impl Theme {
    /// Load theme by name; unknown names fall back to "auto"
    pub fn by_name(name: &str) -> Self {
        let name = name.to_lowercase();
        if !THEME_NAMES.contains(&name.as_str()) {
            tracing::warn!(
                "Unknown theme '{}', using auto (available: {})",
                name,
                THEME_NAMES.join(", ")
            );
        }
        match name.as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            _ => Self::auto(),
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto",
            severity: [
                Color::Green,
                Color::LightGreen,
                Color::Yellow,
                Color::LightRed,
                Color::Red,
            ],
            critical: Color::Red,
            urgent: Color::Yellow,
            ok: Color::Green,
            source_cadec: Color::Cyan,
            source_fda: Color::Blue,
            source_pubmed: Color::Magenta,
            title: Color::Cyan,
            status_bar: Color::Green,
            border: Color::Gray,
            highlight: Color::Yellow,
            panel_logs: Color::DarkGray,
            chart_primary: Color::Cyan,
            chart_secondary: Color::Magenta,
            background: Color::Reset,
            foreground: Color::White,
            muted: Color::DarkGray,
            selection: Color::DarkGray,
            selection_fg: Color::Yellow,
            border_type: BorderType::Rounded,
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula",
            severity: [
                Color::Rgb(0x50, 0xfa, 0x7b), // green
                Color::Rgb(0x8b, 0xe9, 0xfd), // cyan
                Color::Rgb(0xf1, 0xfa, 0x8c), // yellow
                Color::Rgb(0xff, 0xb8, 0x6c), // orange
                Color::Rgb(0xff, 0x55, 0x55), // red
            ],
            critical: Color::Rgb(0xff, 0x55, 0x55),
            urgent: Color::Rgb(0xff, 0xb8, 0x6c),
            ok: Color::Rgb(0x50, 0xfa, 0x7b),
            source_cadec: Color::Rgb(0x8b, 0xe9, 0xfd),
            source_fda: Color::Rgb(0xbd, 0x93, 0xf9),
            source_pubmed: Color::Rgb(0xff, 0x79, 0xc6),
            title: Color::Rgb(0x8b, 0xe9, 0xfd),
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b),
            border: Color::Rgb(0x62, 0x72, 0xa4),
            highlight: Color::Rgb(0xf1, 0xfa, 0x8c),
            panel_logs: Color::Rgb(0x62, 0x72, 0xa4),
            chart_primary: Color::Rgb(0xbd, 0x93, 0xf9),
            chart_secondary: Color::Rgb(0xff, 0x79, 0xc6),
            background: Color::Rgb(0x28, 0x2a, 0x36),
            foreground: Color::Rgb(0xf8, 0xf8, 0xf2),
            muted: Color::Rgb(0x62, 0x72, 0xa4),
            selection: Color::Rgb(0x44, 0x47, 0x5a),
            selection_fg: Color::Rgb(0xf8, 0xf8, 0xf2),
            border_type: BorderType::Rounded,
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord",
            severity: [
                Color::Rgb(0xa3, 0xbe, 0x8c), // green
                Color::Rgb(0x8f, 0xbc, 0xbb), // frost
                Color::Rgb(0xeb, 0xcb, 0x8b), // yellow
                Color::Rgb(0xd0, 0x87, 0x70), // orange
                Color::Rgb(0xbf, 0x61, 0x6a), // red
            ],
            critical: Color::Rgb(0xbf, 0x61, 0x6a),
            urgent: Color::Rgb(0xd0, 0x87, 0x70),
            ok: Color::Rgb(0xa3, 0xbe, 0x8c),
            source_cadec: Color::Rgb(0x88, 0xc0, 0xd0),
            source_fda: Color::Rgb(0x81, 0xa1, 0xc1),
            source_pubmed: Color::Rgb(0xb4, 0x8e, 0xad),
            title: Color::Rgb(0x88, 0xc0, 0xd0),
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),
            border: Color::Rgb(0x4c, 0x56, 0x6a),
            highlight: Color::Rgb(0xeb, 0xcb, 0x8b),
            panel_logs: Color::Rgb(0x4c, 0x56, 0x6a),
            chart_primary: Color::Rgb(0x88, 0xc0, 0xd0),
            chart_secondary: Color::Rgb(0xb4, 0x8e, 0xad),
            background: Color::Rgb(0x2e, 0x34, 0x40),
            foreground: Color::Rgb(0xec, 0xef, 0xf4),
            muted: Color::Rgb(0x61, 0x6e, 0x88),
            selection: Color::Rgb(0x43, 0x4c, 0x5e),
            selection_fg: Color::Rgb(0xec, 0xef, 0xf4),
            border_type: BorderType::Plain,
        }
    }

    /// Color for a severity score; out-of-scale values clamp to the ends
    pub fn severity_color(&self, severity: i64) -> Color {
        let idx = (severity.clamp(1, 5) - 1) as usize;
        self.severity[idx]
    }

    pub fn risk_color(&self, band: RiskBand) -> Color {
        match band {
            RiskBand::High => self.critical,
            RiskBand::Moderate => self.urgent,
            RiskBand::Low => self.ok,
        }
    }

    pub fn source_color(&self, kind: SourceKind) -> Color {
        match kind {
            SourceKind::Cadec => self.source_cadec,
            SourceKind::Fda => self.source_fda,
            SourceKind::Pubmed => self.source_pubmed,
            SourceKind::Other => self.muted,
        }
    }

    pub fn log_color(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Error => self.critical,
            LogLevel::Warn => self.urgent,
            LogLevel::Info => self.foreground,
            LogLevel::Debug | LogLevel::Trace => self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_falls_back_to_auto() {
        assert_eq!(Theme::by_name("Dracula").name, "dracula");
        assert_eq!(Theme::by_name("nord").name, "nord");
        assert_eq!(Theme::by_name("solarized").name, "auto");
        for name in THEME_NAMES {
            assert_eq!(Theme::by_name(name).name, name);
        }
    }

    #[test]
    fn test_severity_color_clamps() {
        let theme = Theme::auto();
        assert_eq!(theme.severity_color(0), theme.severity[0]);
        assert_eq!(theme.severity_color(5), theme.severity[4]);
        assert_eq!(theme.severity_color(9), theme.severity[4]);
    }
}
