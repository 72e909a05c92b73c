//! Realtime channel configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Reconnection and escalation settings for the realtime channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconnectionConfig {
    /// Delay before the first reconnection attempt (milliseconds).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Maximum delay between reconnection attempts (milliseconds).
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    /// Multiplier applied to the delay after each failed attempt.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Upper bound of random jitter as a fraction of the delay (0.0 to 1.0).
    #[serde(default = "default_jitter_ratio")]
    pub jitter_ratio: f64,
    /// Consecutive failures before the feed is flagged offline.
    #[serde(default = "default_offline_after_failures")]
    pub offline_after_failures: u32,
}

const fn default_initial_delay_ms() -> u64 {
    5000
}

const fn default_max_delay_ms() -> u64 {
    60000
}

const fn default_backoff_multiplier() -> f64 {
    2.0
}

const fn default_jitter_ratio() -> f64 {
    0.2
}

const fn default_offline_after_failures() -> u32 {
    5
}

impl Default for ReconnectionConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter_ratio: default_jitter_ratio(),
            offline_after_failures: default_offline_after_failures(),
        }
    }
}

/// Settings for one realtime channel instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Interval between keep-alive pings while open (seconds).
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,
    #[serde(default)]
    pub reconnection: ReconnectionConfig,
    /// Most opportunities kept in the feed state, newest first. Zero keeps all.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

const fn default_heartbeat_interval_secs() -> u64 {
    30
}

const fn default_max_items() -> usize {
    500
}

impl ChannelConfig {
    /// Heartbeat period, never shorter than one second.
    #[must_use]
    pub const fn heartbeat_interval(&self) -> Duration {
        if self.heartbeat_interval_secs == 0 {
            Duration::from_secs(1)
        } else {
            Duration::from_secs(self.heartbeat_interval_secs)
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
            reconnection: ReconnectionConfig::default(),
            max_items: default_max_items(),
        }
    }
}
