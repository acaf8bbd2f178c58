//! Screen layout for the dashboard shell.
//!
//! Single source of truth for width thresholds and panel sizes - no magic
//! numbers scattered in render code.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

const TITLE_HEIGHT: u16 = 3;
const LOGS_HEIGHT: u16 = 7;
const STATUS_HEIGHT: u16 = 2;
const SIDEBAR_WIDTH: u16 = 32;

/// Responsive breakpoint system for layout decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    /// < 60 cols: Split pane, minimal terminal (no sidebar)
    Compact,
    /// 60-99 cols: Half-screen
    Normal,
    /// 100-139 cols: Full terminal
    Wide,
    /// 140+ cols: Ultrawide monitor
    UltraWide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=59 => Breakpoint::Compact,
            60..=99 => Breakpoint::Normal,
            100..=139 => Breakpoint::Wide,
            _ => Breakpoint::UltraWide,
        }
    }

    /// Check if at least this breakpoint (inclusive)
    pub fn at_least(&self, min: Breakpoint) -> bool {
        self.ordinal() >= min.ordinal()
    }

    fn ordinal(&self) -> u8 {
        match self {
            Breakpoint::Compact => 0,
            Breakpoint::Normal => 1,
            Breakpoint::Wide => 2,
            Breakpoint::UltraWide => 3,
        }
    }
}

/// Areas of the shell around the content view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shell {
    pub title: Rect,
    /// None on compact terminals
    pub sidebar: Option<Rect>,
    pub content: Rect,
    pub logs: Rect,
    pub status: Rect,
}

impl Shell {
    /// Title on top, [sidebar | content] in the middle, logs and status below
    pub fn split(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(TITLE_HEIGHT),
                Constraint::Min(10),
                Constraint::Length(LOGS_HEIGHT),
                Constraint::Length(STATUS_HEIGHT),
            ])
            .split(area);

        let (sidebar, content) = if Breakpoint::from_width(rows[1].width).at_least(Breakpoint::Normal) {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
                .split(rows[1]);
            (Some(body[0]), body[1])
        } else {
            (None, rows[1])
        };

        Self {
            title: rows[0],
            sidebar,
            content,
            logs: rows[2],
            status: rows[3],
        }
    }
}
