//! Configuration for the dashboard
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/adverse-intel/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! CLI flags are applied on top by `main` after loading.

use serde::Deserialize;
use std::path::PathBuf;

use crate::report::Threshold;
use crate::trigger::{DEFAULT_BASE_URL, DEFAULT_WEBHOOK_PATH, MAX_RECORD_COUNT};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Records requested when nothing else is configured
pub const DEFAULT_RECORD_COUNT: u32 = 10;

/// Placeholder printed in reports until a real address is configured
pub const DEFAULT_CONTACT: &str = "safety-team@example.org";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Workflow deployment base URL (no trailing slash)
    pub base_url: String,

    /// Webhook path appended to the base URL
    pub webhook_path: String,

    /// Records requested per analysis (1..=100)
    pub record_count: u32,

    /// Critical severity threshold
    pub threshold: Threshold,

    /// Where `x` in the TUI and `run` write their exports
    pub export_dir: PathBuf,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Demo mode: serve a local mock workflow instead of the remote one
    pub demo_mode: bool,

    /// TUI color theme: "auto", "dracula", "nord"
    pub theme: String,

    /// Text report settings
    pub report: ReportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
            record_count: DEFAULT_RECORD_COUNT,
            threshold: Threshold::default(),
            export_dir: PathBuf::from("./exports"),
            enable_tui: true,
            demo_mode: false,
            theme: "auto".to_string(),
            report: ReportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Text report settings
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Contact address printed in the report
    pub contact: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            contact: DEFAULT_CONTACT.to_string(),
        }
    }
}

/// Report settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileReport {
    pub contact: Option<String>,
}

impl ReportConfig {
    pub fn from_file(file: Option<FileReport>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            contact: file.contact.unwrap_or_else(|| DEFAULT_CONTACT.to_string()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub base_url: Option<String>,
    pub webhook_path: Option<String>,
    pub record_count: Option<i64>,
    pub threshold: Option<i64>,
    pub export_dir: Option<String>,
    pub theme: Option<String>,

    /// Optional [report] section
    pub report: Option<FileReport>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Value normalization
// ─────────────────────────────────────────────────────────────────────────────

/// Clamp a requested record count into 1..=100
pub fn clamp_record_count(value: i64) -> u32 {
    value.clamp(1, MAX_RECORD_COUNT as i64) as u32
}

/// Threshold from a raw number; anything outside {3,4,5} falls back to 4
pub fn threshold_or_default(value: i64) -> Threshold {
    u8::try_from(value)
        .ok()
        .and_then(Threshold::new)
        .unwrap_or_else(|| {
            tracing::warn!("Threshold {} is not one of 3, 4, 5; using 4", value);
            Threshold::default()
        })
}

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/adverse-intel/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("adverse-intel").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Overwrite the config file with defaults
    pub fn reset_config_file() -> anyhow::Result<PathBuf> {
        use anyhow::Context;

        let path = Self::config_path().context("Cannot determine home directory")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, Self::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Load file config if it exists
    ///
    /// A config file that exists but cannot be parsed ends the process with
    /// an actionable message rather than silently falling back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Numbers written as strings (record_count = 10, not \"10\")");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `adverse-intel config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        // Base URL: env > file > default
        let base_url = env("AEI_BASE_URL")
            .or(file.base_url)
            .map(|u| u.trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Webhook path: file > default
        let webhook_path = file
            .webhook_path
            .map(|p| p.trim_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_WEBHOOK_PATH.to_string());

        // Record count: env > file > default, clamped
        let record_count = env("AEI_RECORD_COUNT")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .or(file.record_count)
            .map(clamp_record_count)
            .unwrap_or(DEFAULT_RECORD_COUNT);

        // Threshold: env > file > default
        let threshold = env("AEI_THRESHOLD")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .or(file.threshold)
            .map(threshold_or_default)
            .unwrap_or_default();

        // Export directory: env > file > default
        let export_dir = env("AEI_EXPORT_DIR")
            .or(file.export_dir)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./exports"));

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("AEI_NO_TUI").map(|v| !is_truthy(&v)).unwrap_or(true);

        // Demo mode: env only (runtime flag)
        let demo_mode = env("AEI_DEMO").map(|v| is_truthy(&v)).unwrap_or(false);

        // Theme: env > file > default
        let theme = env("AEI_THEME")
            .or(file.theme)
            .unwrap_or_else(|| "auto".to_string());

        let report = ReportConfig::from_file(file.report);
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            base_url,
            webhook_path,
            record_count,
            threshold,
            export_dir,
            enable_tui,
            demo_mode,
            theme,
            report,
            logging,
        }
    }

    /// Full webhook URL for the configured deployment
    pub fn webhook_url(&self) -> String {
        format!("{}/{}", self.base_url, self.webhook_path)
    }
}
