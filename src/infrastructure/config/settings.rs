//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file; the API token is taken from the
//! `FANPULSE_TOKEN` environment variable and never from the file.
//!
//! # Example
//!
//! ```no_run
//! use fanpulse::infrastructure::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::portfolio::PortfolioConfig;
use crate::adapter::outbound::api::ApiConfig;
use crate::adapter::outbound::websocket::FeedConfig;
use crate::error::{ConfigError, Result};

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "FANPULSE_TOKEN";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub portfolio: PortfolioConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Bearer token, from the environment only.
    #[serde(skip)]
    pub token: Option<String>,
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

impl Config {
    /// Parse and validate a TOML document, then read the token from the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::MissingField`] / [`ConfigError::InvalidValue`] for
    /// values that fail validation.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;

        config.token = std::env::var(TOKEN_ENV)
            .ok()
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        config.validate()?;

        Ok(config)
    }

    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadFile`] when the file cannot be read, or any
    /// error from [`Config::parse_toml`].
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] for an existing file.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::parse_toml("")
        }
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "api.base_url",
            }
            .into());
        }
        if self.api.timeout_secs == 0 {
            return Err(invalid("api.timeout_secs", "must be greater than 0").into());
        }
        if self.feed.ws_url.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "feed.ws_url" }.into());
        }
        if self.feed.heartbeat_interval_secs == 0 {
            return Err(invalid("feed.heartbeat_interval_secs", "must be greater than 0").into());
        }
        if self.feed.max_items == 0 {
            return Err(invalid("feed.max_items", "must be greater than 0").into());
        }

        let reconnection = &self.feed.reconnection;
        if reconnection.initial_delay_ms == 0 {
            return Err(
                invalid("feed.reconnection.initial_delay_ms", "must be greater than 0").into(),
            );
        }
        if reconnection.max_delay_ms < reconnection.initial_delay_ms {
            return Err(
                invalid("feed.reconnection.max_delay_ms", "must be >= initial_delay_ms").into(),
            );
        }
        if !reconnection.backoff_multiplier.is_finite() || reconnection.backoff_multiplier < 1.0 {
            return Err(
                invalid("feed.reconnection.backoff_multiplier", "must be >= 1.0").into(),
            );
        }
        if !(0.0..=1.0).contains(&reconnection.jitter_ratio) {
            return Err(
                invalid("feed.reconnection.jitter_ratio", "must be between 0 and 1").into(),
            );
        }

        if self.portfolio.top_n == 0 {
            return Err(invalid("portfolio.top_n", "must be greater than 0").into());
        }
        if self.portfolio.superfan_limit == 0 {
            return Err(invalid("portfolio.superfan_limit", "must be greater than 0").into());
        }

        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("logging.format", "must be 'pretty' or 'json'").into());
        }

        Ok(())
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Whether an API token is available.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        assert_eq!(config.feed.heartbeat_interval_secs, 30);
        assert_eq!(config.feed.reconnection.initial_delay_ms, 5000);
        assert_eq!(config.feed.reconnection.max_delay_ms, 60000);
        assert_eq!(config.feed.reconnection.offline_after_failures, 5);
        assert_eq!(config.portfolio.top_n, 5);
        assert_eq!(config.portfolio.superfan_limit, 50);
    }

    #[test]
    fn nested_reconnection_table_is_read() {
        let config = Config::parse_toml(
            r#"
            [feed]
            ws_url = "wss://example.com/ws"

            [feed.reconnection]
            initial_delay_ms = 1000
            max_delay_ms = 8000
            jitter_ratio = 0.0
            "#,
        )
        .unwrap();

        let channel = config.feed.channel();
        assert_eq!(channel.reconnection.initial_delay_ms, 1000);
        assert_eq!(channel.reconnection.max_delay_ms, 8000);
        assert_eq!(channel.reconnection.backoff_multiplier, 2.0);
    }

    #[test]
    fn rejects_empty_api_url() {
        let result = Config::parse_toml("[api]\nbase_url = \"\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "api.base_url" }))
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            }))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let result = Config::parse_toml("[api\nbase_url = 1");
        assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
    }

    #[test]
    fn token_is_never_serialized() {
        let mut config = Config::parse_toml("").unwrap();
        config.token = Some("secret".into());
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
