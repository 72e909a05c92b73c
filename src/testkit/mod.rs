//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`stream`] - Mock [`FeedStream`](crate::port::outbound::FeedStream)
//!   implementations: `ScriptedFeedStream`, `ChannelFeedStream`.
//! - [`portfolio`] - In-memory portfolio backend with per-artist scripting.
//! - [`domain`] - Builders for artists, actions, momentum, superfans and feed messages.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod portfolio;
pub mod stream;
