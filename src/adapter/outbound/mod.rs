//! Outbound adapters: REST client, WebSocket feed, CSV export.

pub mod api;
pub mod csv;
pub mod websocket;
