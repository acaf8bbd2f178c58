//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the full config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# adverse-intel configuration

# Workflow deployment (AEI_BASE_URL overrides)
base_url = "{base_url}"
webhook_path = "{webhook_path}"

# Records requested per analysis, 1-100 (AEI_RECORD_COUNT overrides)
record_count = {record_count}

# Critical severity threshold: 3, 4 or 5 (AEI_THRESHOLD overrides)
threshold = {threshold}

# Where CSV / JSON / summary exports are written (AEI_EXPORT_DIR overrides)
export_dir = "{export_dir}"

# TUI theme: auto, dracula, nord (AEI_THEME overrides)
theme = "{theme}"

# Text summary report
[report]
contact = "{contact}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            base_url = self.base_url,
            webhook_path = self.webhook_path,
            record_count = self.record_count,
            threshold = self.threshold,
            export_dir = toml_path(&self.export_dir),
            theme = self.theme,
            contact = self.report.contact,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = toml_path(&self.logging.file_dir),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }

    /// Short human-readable listing for `config --show`
    pub fn describe(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("  Webhook:       {}\n", self.webhook_url()));
        out.push_str(&format!("  Records:       {}\n", self.record_count));
        out.push_str(&format!("  Threshold:     {}\n", self.threshold));
        out.push_str(&format!("  Export dir:    {}\n", self.export_dir.display()));
        out.push_str(&format!("  Contact:       {}\n", self.report.contact));
        out.push_str(&format!("  Log level:     {}\n", self.logging.level));
        if self.logging.file_enabled {
            out.push_str(&format!(
                "  Log files:     {}/{}.* ({})\n",
                self.logging.file_dir.display(),
                self.logging.file_prefix,
                self.logging.file_rotation.as_str()
            ));
        } else {
            out.push_str("  Log files:     off\n");
        }
        out
    }
}

/// Paths go into basic TOML strings; backslashes need forward slashes
fn toml_path(path: &std::path::Path) -> String {
    path.display().to_string().replace('\\', "/")
}
