//! Superfans ranked by fan value score.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::id::SuperfanId;
use super::time::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuperfanTier {
    Platinum,
    Gold,
    Silver,
    #[default]
    Bronze,
}

impl SuperfanTier {
    pub const ALL: [Self; 4] = [Self::Platinum, Self::Gold, Self::Silver, Self::Bronze];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Platinum => "platinum",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::Bronze => "bronze",
        }
    }
}

impl fmt::Display for SuperfanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Superfan {
    pub id: SuperfanId,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub fan_value_score: f64,
    #[serde(default)]
    pub tier: SuperfanTier,
    #[serde(default)]
    pub lifetime_value: f64,
    #[serde(default)]
    pub last_active: Option<Timestamp>,
}
