//! Momentum snapshots computed by the backend per artist.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::time::Timestamp;

/// Trend classification attached to a momentum snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumStatus {
    Fire,
    Growing,
    #[default]
    Stable,
    Declining,
}

impl MomentumStatus {
    /// Whether the artist counts toward the portfolio growth factor.
    #[must_use]
    pub const fn is_growing(self) -> bool {
        matches!(self, Self::Fire | Self::Growing)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Growing => "growing",
            Self::Stable => "stable",
            Self::Declining => "declining",
        }
    }
}

impl fmt::Display for MomentumStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Momentum index for one artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumSnapshot {
    /// Growth velocity on a 0-10 scale.
    pub momentum_score: f64,
    #[serde(default)]
    pub status: MomentumStatus,
    /// Engagement per 100 fans.
    #[serde(default)]
    pub engagement: f64,
    #[serde(default)]
    pub growth_rate: f64,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}
