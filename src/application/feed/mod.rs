//! Realtime opportunity feed.
//!
//! The channel task owns an [`OpportunityFeedState`] and keeps it current
//! from a [`FeedStream`](crate::port::outbound::FeedStream), reconnecting
//! with exponential backoff. State transitions are pure functions in
//! [`state`]; the task only sequences them.

pub mod backoff;
pub mod channel;
pub mod config;
pub mod state;

pub use backoff::Backoff;
pub use channel::{FeedHandle, RealtimeChannel};
pub use config::{ChannelConfig, ReconnectionConfig};
pub use state::{apply, ConnectionStatus, OpportunityFeedState};
