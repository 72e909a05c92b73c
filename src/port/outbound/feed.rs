//! Realtime feed port.
//!
//! [`FeedStream`] mirrors the lifecycle of a single WebSocket connection:
//! connect, send control frames, read classified messages until the
//! connection drops. Reconnection lives above this port.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Opportunity, Timestamp};
use crate::error::Error;

/// Outbound control frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlFrame {
    /// Keep-alive probe.
    Ping,
    /// Ask the server for a fresh full snapshot.
    RefreshOpportunities,
}

/// Classified body of an inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedPayload {
    /// Authoritative full list; replaces local items.
    Snapshot(Vec<Opportunity>),
    /// Single new item; prepended to local items.
    Push(Opportunity),
    /// Keep-alive acknowledgement.
    Heartbeat,
    /// Any message kind the client does not understand.
    Unknown(String),
}

/// An inbound message with its envelope timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedMessage {
    pub timestamp: Option<Timestamp>,
    pub payload: FeedPayload,
}

impl FeedMessage {
    #[must_use]
    pub const fn new(payload: FeedPayload) -> Self {
        Self {
            timestamp: None,
            payload,
        }
    }

    #[must_use]
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// Events produced by a feed stream.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A decoded inbound message.
    Message(FeedMessage),
    /// The transport closed or failed.
    Disconnected {
        /// Human-readable reason.
        reason: String,
    },
}

/// A single realtime feed connection.
#[async_trait]
pub trait FeedStream: Send {
    /// Open the connection.
    async fn connect(&mut self) -> Result<(), Error>;

    /// Send a control frame over the open connection.
    async fn send(&mut self, frame: ControlFrame) -> Result<(), Error>;

    /// Read the next event. `None` means the stream ended.
    async fn next_event(&mut self) -> Option<FeedEvent>;

    /// Close the connection without expecting a reconnect.
    async fn close(&mut self);

    /// Transport name for logging.
    fn transport_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_frames_serialize_as_type_envelopes() {
        assert_eq!(
            serde_json::to_string(&ControlFrame::Ping).unwrap(),
            r#"{"type":"ping"}"#
        );
        assert_eq!(
            serde_json::to_string(&ControlFrame::RefreshOpportunities).unwrap(),
            r#"{"type":"refresh_opportunities"}"#
        );
    }
}
