//! Recommended actions and their urgency/status classifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::id::ActionId;
use super::time::Timestamp;

/// Priority classification shared by actions and opportunities.
///
/// Ordered by ordinal: `Critical` sorts before `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Urgency {
    Critical,
    High,
    Medium,
    #[default]
    Low,
}

impl Urgency {
    /// All urgencies in sort order.
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Sort ordinal: `critical=0 < high=1 < medium=2 < low=3`.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Critical => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(format!("unknown urgency '{other}'")),
        }
    }
}

impl Serialize for Urgency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Lenient on the wire: anything unrecognized ranks lowest.
impl<'de> Deserialize<'de> for Urgency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// Lifecycle status of a recommended action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Dismissed,
}

impl ActionStatus {
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Dismissed,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Dismissed => "dismissed",
        }
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "dismissed" => Ok(Self::Dismissed),
            other => Err(format!("unknown action status '{other}'")),
        }
    }
}

/// A recommended action for one artist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub status: ActionStatus,
    #[serde(default)]
    pub category: String,
    pub created_at: Timestamp,
    #[serde(default)]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub expected_impact: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_ordinals_are_ascending() {
        let ordinals: Vec<u8> = Urgency::ALL.iter().map(|u| u.ordinal()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
    }

    #[test]
    fn urgency_deserializes_case_insensitively() {
        let urgency: Urgency = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(urgency, Urgency::Critical);
    }

    #[test]
    fn unknown_urgency_ranks_lowest() {
        let urgency: Urgency = serde_json::from_str("\"whenever\"").unwrap();
        assert_eq!(urgency, Urgency::Low);
    }

    #[test]
    fn action_parses_minimal_payload() {
        let json = r#"{"id":"x1","title":"Post teaser","urgency":"high","created_at":"2024-01-02"}"#;
        let action: Action = serde_json::from_str(json).unwrap();

        assert_eq!(action.urgency, Urgency::High);
        assert_eq!(action.status, ActionStatus::Pending);
        assert!(action.due_date.is_none());
    }

    #[test]
    fn status_parses_cli_spellings() {
        assert_eq!(
            "in-progress".parse::<ActionStatus>().unwrap(),
            ActionStatus::InProgress
        );
        assert!("done".parse::<ActionStatus>().is_err());
    }
}
