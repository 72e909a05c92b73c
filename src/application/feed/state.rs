//! Opportunity feed state and its pure transition functions.
//!
//! The realtime channel owns the only writable copy. Every transition takes
//! the previous state by value and returns the next one, so the merge and
//! replace rules can be exercised without a connection.

use std::fmt;

use serde::Serialize;

use crate::domain::{Opportunity, Timestamp};
use crate::port::outbound::{FeedMessage, FeedPayload};

/// Connection lifecycle as seen by readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Open,
    Closed,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// Snapshot of the realtime feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpportunityFeedState {
    pub status: ConnectionStatus,
    /// Newest first.
    pub items: Vec<Opportunity>,
    /// Most recent pushed item.
    pub latest: Option<Opportunity>,
    pub consecutive_failures: u32,
    /// Set after too many consecutive failed reconnects; cleared on open.
    pub offline: bool,
    pub last_message_at: Option<Timestamp>,
    /// Snapshots applied since the channel started.
    pub snapshots: u64,
    /// Pushes applied since the last snapshot. Together with `snapshots`
    /// this lets a reader that skipped intermediate states tell which
    /// leading `items` arrived as pushes.
    pub pushes_since_snapshot: u64,
}

impl OpportunityFeedState {
    /// Apply one inbound message.
    #[must_use]
    pub fn apply(mut self, message: FeedMessage) -> Self {
        let FeedMessage { timestamp, payload } = message;
        match payload {
            FeedPayload::Snapshot(items) => {
                self.items = items;
                self.snapshots += 1;
                self.pushes_since_snapshot = 0;
            }
            FeedPayload::Push(opportunity) => {
                self.items.insert(0, opportunity.clone());
                self.latest = Some(opportunity);
                self.pushes_since_snapshot += 1;
            }
            FeedPayload::Heartbeat => {}
            FeedPayload::Unknown(_) => return self,
        }
        if timestamp.is_some() {
            self.last_message_at = timestamp;
        }
        self
    }

    /// Drop the oldest items beyond `max_items`. Zero means no cap.
    #[must_use]
    pub fn trimmed(mut self, max_items: usize) -> Self {
        if max_items > 0 {
            self.items.truncate(max_items);
        }
        self
    }

    #[must_use]
    pub fn connecting(mut self) -> Self {
        self.status = ConnectionStatus::Connecting;
        self
    }

    #[must_use]
    pub fn opened(mut self) -> Self {
        self.status = ConnectionStatus::Open;
        self.consecutive_failures = 0;
        self.offline = false;
        self
    }

    #[must_use]
    pub fn closed(mut self, consecutive_failures: u32, offline: bool) -> Self {
        self.status = ConnectionStatus::Closed;
        self.consecutive_failures = consecutive_failures;
        self.offline = offline;
        self
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == ConnectionStatus::Open
    }
}

/// Reducer form of [`OpportunityFeedState::apply`].
#[must_use]
pub fn apply(state: OpportunityFeedState, message: FeedMessage) -> OpportunityFeedState {
    state.apply(message)
}
