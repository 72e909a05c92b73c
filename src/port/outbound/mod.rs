//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! - [`portfolio`] - artist directory, per-artist resources, status updates
//! - [`feed`] - realtime opportunity stream

pub mod feed;
pub mod portfolio;

pub use feed::{ControlFrame, FeedEvent, FeedMessage, FeedPayload, FeedStream};
pub use portfolio::{ArtistDirectory, ArtistResource, StatusUpdater};
