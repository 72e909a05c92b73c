//! Realtime feed settings.

use serde::{Deserialize, Serialize};

use crate::application::feed::{ChannelConfig, ReconnectionConfig};

/// `[feed]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// WebSocket endpoint, e.g. `wss://api.fanpulse.io/ws/opportunities`.
    #[serde(default = "default_ws_url")]
    pub ws_url: String,
    /// Keep-alive ping interval while connected (seconds).
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,
    #[serde(default)]
    pub reconnection: ReconnectionConfig,
    /// Cap on opportunities held by `watch`, newest first.
    #[serde(default = "default_max_items")]
    pub max_items: usize,
}

fn default_ws_url() -> String {
    "ws://localhost:8000/ws/opportunities".into()
}

const fn default_heartbeat_interval_secs() -> u64 {
    30
}

const fn default_max_items() -> usize {
    500
}

impl FeedConfig {
    /// Channel settings derived from this section.
    #[must_use]
    pub fn channel(&self) -> ChannelConfig {
        ChannelConfig {
            heartbeat_interval_secs: self.heartbeat_interval_secs,
            reconnection: self.reconnection.clone(),
            max_items: self.max_items,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
            reconnection: ReconnectionConfig::default(),
            max_items: default_max_items(),
        }
    }
}
