//! Builders for domain primitives used across tests.
//!
//! Concise factories so tests focus on assertions rather than
//! construction boilerplate.

use crate::domain::{
    Action, ActionId, ActionStatus, ArtistRef, MomentumSnapshot, MomentumStatus, Opportunity,
    OpportunityId, Superfan, SuperfanId, SuperfanTier, Timestamp, Urgency,
};
use crate::port::outbound::{FeedEvent, FeedMessage, FeedPayload};

/// Create an [`ArtistRef`] whose name is the id upper-cased.
pub fn artist(id: &str) -> ArtistRef {
    ArtistRef::new(id, id.to_uppercase())
}

/// Generate `n` artists named `a0`, `a1`, ..., `a{n-1}`.
pub fn make_artists(n: usize) -> Vec<ArtistRef> {
    (0..n).map(|i| artist(&format!("a{i}"))).collect()
}

/// Parse a timestamp, panicking on bad input.
pub fn ts(raw: &str) -> Timestamp {
    raw.parse().expect("valid test timestamp")
}

/// A pending action created at the given instant.
pub fn action(id: &str, urgency: Urgency, created_at: &str) -> Action {
    Action {
        id: ActionId::new(id),
        title: format!("Action {id}"),
        description: String::new(),
        urgency,
        status: ActionStatus::Pending,
        category: "marketing".into(),
        created_at: ts(created_at),
        due_date: None,
        expected_impact: None,
    }
}

pub fn momentum(score: f64, status: MomentumStatus, engagement: f64) -> MomentumSnapshot {
    MomentumSnapshot {
        momentum_score: score,
        status,
        engagement,
        growth_rate: 0.0,
        updated_at: None,
    }
}

pub fn superfan(id: &str, fan_value_score: f64, tier: SuperfanTier) -> Superfan {
    Superfan {
        id: SuperfanId::new(id),
        name: format!("Fan {id}"),
        location: None,
        fan_value_score,
        tier,
        lifetime_value: fan_value_score * 10.0,
        last_active: None,
    }
}

pub fn opportunity(id: &str) -> Opportunity {
    Opportunity {
        id: OpportunityId::new(id),
        title: format!("Opportunity {id}"),
        description: String::new(),
        priority: Urgency::Medium,
        kind: "playlist".into(),
        artist_id: None,
        created_at: None,
    }
}

/// A full-snapshot event listing the given opportunity ids in order.
pub fn snapshot_event(ids: &[&str]) -> FeedEvent {
    FeedEvent::Message(FeedMessage::new(FeedPayload::Snapshot(
        ids.iter().map(|id| opportunity(id)).collect(),
    )))
}

/// A single-item push event.
pub fn push_event(id: &str) -> FeedEvent {
    FeedEvent::Message(FeedMessage::new(FeedPayload::Push(opportunity(id))))
}

/// Create a [`Disconnected`](FeedEvent::Disconnected) event.
pub fn disconnect_event(reason: &str) -> FeedEvent {
    FeedEvent::Disconnected {
        reason: reason.to_string(),
    }
}
