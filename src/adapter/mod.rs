//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - driving side: the command-line interface
//! - [`outbound`] - driven side: REST client, WebSocket feed, CSV export

pub mod inbound;
pub mod outbound;
