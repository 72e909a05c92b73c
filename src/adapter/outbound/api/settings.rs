//! REST API settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// `[api]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the FanPulse backend, e.g. `https://api.fanpulse.io`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

const fn default_timeout_secs() -> u64 {
    15
}

impl ApiConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
