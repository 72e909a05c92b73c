//! Handler for the `config` command group.

use std::path::Path;

use serde_json::json;

use super::command::ConfigCommand;
use super::output;
use crate::error::Result;
use crate::infrastructure::config::{Config, TOKEN_ENV};

/// Execute `fanpulse config show|check`.
pub fn execute(command: &ConfigCommand, path: &Path) -> Result<()> {
    match command {
        ConfigCommand::Show => execute_show(path),
        ConfigCommand::Check => execute_check(path),
    }
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.display().to_string(),
            "exists": path.exists(),
            "token_set": config.has_token(),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("File", path.display());
    if !path.exists() {
        output::note("(file not found, showing defaults)");
    }

    output::section("API");
    output::field("Base URL", &config.api.base_url);
    output::field("Timeout", format!("{}s", config.api.timeout_secs));
    output::field(
        "Token",
        if config.has_token() {
            "set".to_string()
        } else {
            format!("not set ({TOKEN_ENV})")
        },
    );

    let reconnection = &config.feed.reconnection;
    output::section("Feed");
    output::field("WebSocket", &config.feed.ws_url);
    output::field("Heartbeat", format!("{}s", config.feed.heartbeat_interval_secs));
    output::field("Max items", config.feed.max_items);
    output::field(
        "Reconnect",
        format!(
            "{}ms -> {}ms (x{}, jitter {:.0}%)",
            reconnection.initial_delay_ms,
            reconnection.max_delay_ms,
            reconnection.backoff_multiplier,
            reconnection.jitter_ratio * 100.0
        ),
    );
    output::field(
        "Offline after",
        format!("{} failures", reconnection.offline_after_failures),
    );

    output::section("Portfolio");
    output::field("Top N", config.portfolio.top_n);
    output::field("Superfans", format!("{} per artist", config.portfolio.superfan_limit));

    output::section("Logging");
    output::field("Level", &config.logging.level);
    output::field("Format", &config.logging.format);
    Ok(())
}

/// Execute `config check`.
pub fn execute_check(path: &Path) -> Result<()> {
    if !path.exists() {
        if output::is_json() {
            output::json_output(json!({
                "command": "config.check",
                "path": path.display().to_string(),
                "status": "missing",
            }));
        } else {
            output::warning(&format!("Config file not found ({})", path.display()));
            output::hint("defaults are used when no file exists");
        }
        return Ok(());
    }

    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.check",
            "path": path.display().to_string(),
            "status": "ok",
            "token_set": config.has_token(),
        }));
        return Ok(());
    }

    output::success(&format!("Configuration is valid ({})", path.display()));
    if !config.has_token() {
        output::hint(&format!("set {TOKEN_ENV} to authenticate API requests"));
    }
    Ok(())
}
