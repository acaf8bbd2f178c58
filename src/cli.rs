// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - (none):          interactive dashboard (TUI), or one headless run when
//                    the TUI is disabled (AEI_NO_TUI=1)
// - run:             one-shot headless analysis, prints the report, writes exports
// - health:          probe the workflow deployment
// - config --show:   display effective configuration
// - config --path:   print config file path
// - config --reset:  regenerate config file with defaults

use crate::config::{clamp_record_count, threshold_or_default, Config, VERSION};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

/// FDA Adverse Event Intelligence - terminal dashboard for AI-scored adverse events
#[derive(Parser, Debug)]
#[command(name = "adverse-intel")]
#[command(version = VERSION)]
#[command(
    about = "Trigger the adverse event workflow and explore its AI analysis",
    long_about = None
)]
pub struct Cli {
    /// Use a built-in mock workflow instead of the remote deployment
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one analysis without the TUI
    Run(RunArgs),

    /// Check whether the workflow deployment is reachable
    Health {
        /// Workflow base URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Records to analyze (1-100)
    #[arg(short = 'n', long)]
    pub count: Option<i64>,

    /// Critical severity threshold (3, 4 or 5)
    #[arg(short, long)]
    pub threshold: Option<i64>,

    /// Workflow base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory for the CSV / JSON / summary exports
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Print the report only, write no files
    #[arg(long)]
    pub no_export: bool,
}

/// What the process does once config and logging are set up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dashboard,
    Analyze { write_files: bool },
    Health,
}

impl Cli {
    /// Pick the run mode; must agree with the logging set up from `config.enable_tui`
    pub fn mode(&self, config: &Config) -> Mode {
        match &self.command {
            Some(Commands::Run(args)) => Mode::Analyze {
                write_files: !args.no_export,
            },
            Some(Commands::Health { .. }) => Mode::Health,
            _ if !config.enable_tui => Mode::Analyze { write_files: true },
            _ => Mode::Dashboard,
        }
    }

    /// Layer command-line overrides on top of the loaded config
    pub fn apply(&self, config: &mut Config) {
        if self.demo {
            config.demo_mode = true;
        }

        match &self.command {
            Some(Commands::Run(args)) => {
                config.enable_tui = false;
                if let Some(count) = args.count {
                    config.record_count = clamp_record_count(count);
                }
                if let Some(threshold) = args.threshold {
                    config.threshold = threshold_or_default(threshold);
                }
                if let Some(url) = &args.base_url {
                    config.base_url = url.trim_end_matches('/').to_string();
                }
                if let Some(dir) = &args.export_dir {
                    config.export_dir = dir.clone();
                }
            }
            Some(Commands::Health { base_url }) => {
                config.enable_tui = false;
                if let Some(url) = base_url {
                    config.base_url = url.trim_end_matches('/').to_string();
                }
            }
            Some(Commands::Config { .. }) | None => {}
        }
    }
}

/// Handle `config` subcommands
pub fn handle_config(show: bool, path: bool, reset: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else {
        println!("Usage: adverse-intel config [--show|--path|--reset]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    if let Some(path) = Config::config_path().filter(|p| p.exists()) {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    match Config::reset_config_file() {
        Ok(path) => println!("Config reset to defaults: {}", path.display()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("adverse-intel").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_subcommand_keeps_tui() {
        let cli = parse(&[]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert!(config.enable_tui);
        assert!(!config.demo_mode);
    }

    #[test]
    fn test_mode_follows_subcommand() {
        let config = Config::default();
        assert_eq!(parse(&[]).mode(&config), Mode::Dashboard);
        assert_eq!(parse(&["health"]).mode(&config), Mode::Health);
        assert_eq!(
            parse(&["run", "--no-export"]).mode(&config),
            Mode::Analyze { write_files: false }
        );
    }

    #[test]
    fn test_disabled_tui_runs_headless() {
        let cli = parse(&[]);
        let mut config = Config::default();
        config.enable_tui = false;
        cli.apply(&mut config);
        assert!(!config.enable_tui);
        assert_eq!(cli.mode(&config), Mode::Analyze { write_files: true });
    }

    #[test]
    fn test_run_overrides_are_clamped() {
        let cli = parse(&["run", "-n", "250", "--threshold", "9", "--base-url", "http://x/"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert!(!config.enable_tui);
        assert_eq!(config.record_count, 100);
        assert_eq!(config.threshold.value(), 4);
        assert_eq!(config.base_url, "http://x");
    }

    #[test]
    fn test_demo_flag_is_global() {
        let cli = parse(&["health", "--demo"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert!(config.demo_mode);
        assert!(!config.enable_tui);
    }

    #[test]
    fn test_run_export_dir() {
        let cli = parse(&["run", "--export-dir", "/tmp/out", "--no-export"]);
        match &cli.command {
            Some(Commands::Run(args)) => assert!(args.no_export),
            other => panic!("expected run, got {:?}", other),
        }
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
    }
}
