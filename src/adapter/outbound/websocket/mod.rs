//! Realtime opportunity feed over WebSocket.

pub mod message;
pub mod settings;
pub mod stream;

pub use settings::FeedConfig;
pub use stream::WebSocketFeedStream;
