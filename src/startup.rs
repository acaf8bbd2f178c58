// Startup module - banner and module status
//
// Printed to stdout before the TUI takes over the screen (or before a
// headless run), and mirrored into the logs panel once logging is up.

use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Module loading result for display
#[derive(Debug)]
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: &'static str,
}

/// Print the startup banner and module status
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}FDA Adverse Event Intelligence{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}AI-powered patient safety analysis{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    println!("  {DIM}Loading modules...{RESET}");
    for module in &module_status(config) {
        print_module_status(module);
    }
    println!();

    if config.demo_mode {
        println!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(local mock workflow){RESET}");
    } else {
        println!("  {MAGENTA}▸{RESET} Workflow {BOLD}{}{RESET}", config.webhook_url());
    }
    println!();
}

/// Status of all modules based on config
fn module_status(config: &Config) -> Vec<ModuleStatus> {
    vec![
        ModuleStatus {
            name: "trigger",
            enabled: true,
            description: "Webhook client",
        },
        ModuleStatus {
            name: "normalize",
            enabled: true,
            description: "Response shapes",
        },
        ModuleStatus {
            name: "report",
            enabled: true,
            description: "Metrics & exports",
        },
        ModuleStatus {
            name: "tui",
            enabled: config.enable_tui,
            description: "Terminal dashboard",
        },
        ModuleStatus {
            name: "file-log",
            enabled: config.logging.file_enabled,
            description: "Rotating log files",
        },
        ModuleStatus {
            name: "demo",
            enabled: config.demo_mode,
            description: "Mock workflow",
        },
    ]
}

fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<12}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}

/// Boot sequence for the logs panel
pub fn log_startup(config: &Config) {
    tracing::info!("═══════════════════════════════════");
    tracing::info!("  FDA ADVERSE EVENT INTELLIGENCE v{}", VERSION);
    tracing::info!("═══════════════════════════════════");

    for module in &module_status(config) {
        let icon = if module.enabled { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, module.name, module.description);
    }

    if config.demo_mode {
        tracing::info!("▸ Demo mode active (local mock workflow)");
    }
    tracing::info!("▸ Webhook {}", config.webhook_url());
    tracing::info!("Ready. Press Enter to start an analysis.");
}
