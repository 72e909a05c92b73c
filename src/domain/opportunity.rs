//! Opportunities pushed by the realtime alert feed.

use serde::{Deserialize, Serialize};

use super::action::Urgency;
use super::id::{ArtistId, OpportunityId};
use super::time::Timestamp;

/// A server-pushed alert or recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Urgency,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub artist_id: Option<ArtistId>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}
