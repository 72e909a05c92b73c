//! Portfolio view settings.

use serde::{Deserialize, Serialize};

/// `[portfolio]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Length of top-N rankings (momentum, superfans).
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// `limit` passed to the superfans endpoint per artist.
    #[serde(default = "default_superfan_limit")]
    pub superfan_limit: usize,
}

const fn default_top_n() -> usize {
    5
}

const fn default_superfan_limit() -> usize {
    50
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            superfan_limit: default_superfan_limit(),
        }
    }
}
