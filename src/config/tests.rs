//! Configuration tests
//!
//! Round-trip guards make sure every field written by `to_toml()` is read
//! back by `FileConfig`; layering tests pin env > file > default.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );
}

#[test]
fn test_config_roundtrip_preserves_values() {
    let mut config = Config::default();
    config.base_url = "http://localhost:5678".to_string();
    config.record_count = 42;
    config.threshold = Threshold::new(5).unwrap();
    config.export_dir = PathBuf::from("/tmp/aei");
    config.report.contact = "pv@example.org".to_string();
    config.theme = "nord".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let reloaded = Config::from_sources(parse(&config.to_toml()), no_env);
    assert_eq!(reloaded.base_url, "http://localhost:5678");
    assert_eq!(reloaded.webhook_path, DEFAULT_WEBHOOK_PATH);
    assert_eq!(reloaded.record_count, 42);
    assert_eq!(reloaded.threshold.value(), 5);
    assert_eq!(reloaded.export_dir, PathBuf::from("/tmp/aei"));
    assert_eq!(reloaded.report.contact, "pv@example.org");
    assert_eq!(reloaded.theme, "nord");
    assert!(reloaded.logging.file_enabled);
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
}

// ─────────────────────────────────────────────────────────────────────────────
// Layering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_sources_give_defaults() {
    let config = Config::from_sources(FileConfig::default(), no_env);
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.record_count, DEFAULT_RECORD_COUNT);
    assert_eq!(config.threshold, Threshold::default());
    assert_eq!(config.report.contact, DEFAULT_CONTACT);
    assert!(config.enable_tui);
    assert!(!config.demo_mode);
    assert_eq!(
        config.webhook_url(),
        format!("{}/{}", DEFAULT_BASE_URL, DEFAULT_WEBHOOK_PATH)
    );
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
base_url = "https://file.example"
record_count = 20
threshold = 3
"#,
    );
    let env = env_from(&[
        ("AEI_BASE_URL", "https://env.example/"),
        ("AEI_RECORD_COUNT", "50"),
        ("AEI_NO_TUI", "true"),
        ("AEI_DEMO", "1"),
    ]);

    let config = Config::from_sources(file, env);
    // Trailing slash is stripped
    assert_eq!(config.base_url, "https://env.example");
    assert_eq!(config.record_count, 50);
    // Not overridden by env
    assert_eq!(config.threshold.value(), 3);
    assert!(!config.enable_tui);
    assert!(config.demo_mode);
}

#[test]
fn test_record_count_is_clamped() {
    let high = Config::from_sources(parse("record_count = 500"), no_env);
    assert_eq!(high.record_count, 100);

    let low = Config::from_sources(FileConfig::default(), env_from(&[("AEI_RECORD_COUNT", "0")]));
    assert_eq!(low.record_count, 1);

    let negative = Config::from_sources(parse("record_count = -3"), no_env);
    assert_eq!(negative.record_count, 1);
}

#[test]
fn test_invalid_threshold_falls_back_to_four() {
    let config = Config::from_sources(parse("threshold = 7"), no_env);
    assert_eq!(config.threshold.value(), 4);

    let config = Config::from_sources(FileConfig::default(), env_from(&[("AEI_THRESHOLD", "2")]));
    assert_eq!(config.threshold.value(), 4);
}

#[test]
fn test_unparseable_env_number_uses_file_value() {
    let config = Config::from_sources(
        parse("record_count = 25"),
        env_from(&[("AEI_RECORD_COUNT", "lots")]),
    );
    assert_eq!(config.record_count, 25);
}

#[test]
fn test_logging_section() {
    let config = Config::from_sources(
        parse(
            r#"
[logging]
level = "debug"
file_rotation = "weekly"
"#,
        ),
        no_env,
    );
    assert_eq!(config.logging.level, "debug");
    // Unknown rotation means daily
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    assert_eq!(config.logging.file_prefix, "adverse-intel");
}

#[test]
fn test_describe_mentions_webhook() {
    let config = Config::default();
    let text = config.describe();
    assert!(text.contains(DEFAULT_WEBHOOK_PATH));
    assert!(text.contains("Log files:     off"));
}
