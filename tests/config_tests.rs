//! Integration tests for configuration loading and validation.

use std::io::Write;

use fanpulse::error::{ConfigError, Error};
use fanpulse::infrastructure::config::{Config, TOKEN_ENV};
use tempfile::NamedTempFile;
use tokio_test::assert_ok;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

fn invalid_field(contents: &str) -> &'static str {
    let file = write_config(contents);
    match Config::load(file.path()) {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) => field,
        Err(Error::Config(ConfigError::MissingField { field })) => field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn full_file_overrides_defaults() {
    let file = write_config(
        r#"
[api]
base_url = "https://api.fanpulse.example"
timeout_secs = 30

[feed]
ws_url = "wss://api.fanpulse.example/ws/opportunities"
heartbeat_interval_secs = 15

[feed.reconnection]
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 1.5
jitter_ratio = 0.1
offline_after_failures = 8

[portfolio]
top_n = 10
superfan_limit = 25

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = assert_ok!(Config::load(file.path()));

    assert_eq!(config.api.base_url, "https://api.fanpulse.example");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.feed.heartbeat_interval_secs, 15);
    assert_eq!(config.feed.reconnection.initial_delay_ms, 1000);
    assert_eq!(config.feed.reconnection.offline_after_failures, 8);
    assert_eq!(config.portfolio.top_n, 10);
    assert_eq!(config.portfolio.superfan_limit, 25);
    assert_eq!(config.logging.format, "json");

    let channel = config.feed.channel();
    assert_eq!(channel.heartbeat_interval_secs, 15);
    assert_eq!(channel.max_items, 500);
    assert!((channel.reconnection.backoff_multiplier - 1.5).abs() < f64::EPSILON);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let file = write_config("[portfolio]\ntop_n = 3\n");

    let config = assert_ok!(Config::load(file.path()));

    assert_eq!(config.portfolio.top_n, 3);
    assert_eq!(config.portfolio.superfan_limit, 50);
    assert_eq!(config.feed.reconnection.initial_delay_ms, 5000);
    assert_eq!(config.feed.reconnection.max_delay_ms, 60000);
    assert_eq!(config.feed.heartbeat_interval_secs, 30);
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let config = Config::load_or_default(&path).unwrap();

    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let file = write_config("[api\nbase_url = ");
    assert!(matches!(
        Config::load(file.path()),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn rejects_empty_urls() {
    assert_eq!(invalid_field("[api]\nbase_url = \"\"\n"), "api.base_url");
    assert_eq!(invalid_field("[feed]\nws_url = \"  \"\n"), "feed.ws_url");
}

#[test]
fn rejects_zero_heartbeat() {
    assert_eq!(
        invalid_field("[feed]\nheartbeat_interval_secs = 0\n"),
        "feed.heartbeat_interval_secs"
    );
}

#[test]
fn rejects_zero_item_cap() {
    assert_eq!(invalid_field("[feed]\nmax_items = 0\n"), "feed.max_items");
}

#[test]
fn rejects_multiplier_below_one() {
    assert_eq!(
        invalid_field("[feed.reconnection]\nbackoff_multiplier = 0.5\n"),
        "feed.reconnection.backoff_multiplier"
    );
    assert_eq!(
        invalid_field(
            "[feed.reconnection]\ninitial_delay_ms = 10\nmax_delay_ms = 100\n\
             backoff_multiplier = 0.1\njitter_ratio = 0.0\n"
        ),
        "feed.reconnection.backoff_multiplier"
    );
}

#[test]
fn accepts_constant_backoff() {
    let config = assert_ok!(Config::parse_toml(
        "[feed.reconnection]\nbackoff_multiplier = 1.0\n"
    ));
    assert_eq!(config.feed.reconnection.backoff_multiplier, 1.0);
}

#[test]
fn rejects_non_positive_multiplier() {
    assert_eq!(
        invalid_field("[feed.reconnection]\nbackoff_multiplier = 0.0\n"),
        "feed.reconnection.backoff_multiplier"
    );
    assert_eq!(
        invalid_field("[feed.reconnection]\nbackoff_multiplier = -2.0\n"),
        "feed.reconnection.backoff_multiplier"
    );
}

#[test]
fn rejects_jitter_outside_unit_range() {
    assert_eq!(
        invalid_field("[feed.reconnection]\njitter_ratio = 1.5\n"),
        "feed.reconnection.jitter_ratio"
    );
    assert_eq!(
        invalid_field("[feed.reconnection]\njitter_ratio = -0.1\n"),
        "feed.reconnection.jitter_ratio"
    );
}

#[test]
fn rejects_initial_delay_above_max() {
    assert_eq!(
        invalid_field("[feed.reconnection]\ninitial_delay_ms = 9000\nmax_delay_ms = 1000\n"),
        "feed.reconnection.max_delay_ms"
    );
}

#[test]
fn rejects_zero_top_n() {
    assert_eq!(invalid_field("[portfolio]\ntop_n = 0\n"), "portfolio.top_n");
}

#[test]
fn rejects_unknown_log_format() {
    assert_eq!(invalid_field("[logging]\nformat = \"xml\"\n"), "logging.format");
}

#[test]
fn token_comes_from_environment_only() {
    let file = write_config("token = \"from-file\"\n");
    std::env::set_var(TOKEN_ENV, "  secret-token  ");

    let config = Config::load(file.path()).unwrap();
    std::env::remove_var(TOKEN_ENV);

    assert_eq!(config.token.as_deref(), Some("secret-token"));
    assert!(config.has_token());
}
