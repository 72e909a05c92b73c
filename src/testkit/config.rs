//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::application::feed::{ChannelConfig, ReconnectionConfig};

/// Reconnection config with the production schedule and no jitter, so
/// paused-time tests can assert exact instants.
pub fn reconnection() -> ReconnectionConfig {
    ReconnectionConfig {
        jitter_ratio: 0.0,
        ..ReconnectionConfig::default()
    }
}

/// Short delays for tests that only care about the failure count.
pub fn fast_reconnection(offline_after_failures: u32) -> ReconnectionConfig {
    ReconnectionConfig {
        initial_delay_ms: 10,
        max_delay_ms: 40,
        backoff_multiplier: 2.0,
        jitter_ratio: 0.0,
        offline_after_failures,
    }
}

/// Channel config with a 30s heartbeat and the given reconnection settings.
pub fn channel(reconnection: ReconnectionConfig) -> ChannelConfig {
    ChannelConfig {
        heartbeat_interval_secs: 30,
        reconnection,
        ..ChannelConfig::default()
    }
}
