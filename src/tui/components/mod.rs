// Components module - reusable UI building blocks
//
// Shell components are rendered around every content view:
// - Title bar: product name, analysis indicator
// - Sidebar: parameters, estimate, health, key hints
// - Logs panel: system log entries
// - Status bar: phase, records, threshold, health, uptime
//
// Each component is a focused, single-responsibility module.

pub mod formatters;
pub mod logs_panel;
pub mod sidebar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;

// Re-export formatters for shared use
pub use formatters::{format_cost, format_duration, format_percent};
