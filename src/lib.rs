//! FanPulse - portfolio aggregation and realtime opportunity feed client.
//!
//! This crate talks to the FanPulse artist analytics backend on behalf of an
//! artist manager: it fans per-artist requests out across a whole portfolio,
//! merges the results into artist-attributed collections, derives rollup
//! statistics and a portfolio health score, and keeps a live WebSocket feed
//! of opportunities connected with bounded reconnection.
//!
//! # Architecture
//!
//! - **`domain`** - Pure value types: artists, actions, momentum, superfans,
//!   opportunities and the health score model
//! - **`port`** - Traits for the backend collaborators
//!   - `ArtistDirectory`, `ArtistResource<T>`, `StatusUpdater`
//!   - `FeedStream` - one WebSocket connection lifecycle
//! - **`application`** - Aggregation, sorting, filtering, statistics, the
//!   portfolio service and the realtime channel
//! - **`adapter`** - REST client, WebSocket stream, CSV export and the CLI
//! - **`infrastructure`** - Configuration and logging
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use fanpulse::adapter::outbound::api::{ApiClient, ApiConfig};
//! use fanpulse::application::{ActionFilter, PortfolioService};
//! use fanpulse::domain::Urgency;
//!
//! # async fn demo() -> fanpulse::error::Result<()> {
//! let client = ApiClient::new(&ApiConfig::default(), None, 50)?;
//! let service = PortfolioService::new(Arc::new(client), 5);
//!
//! let report = service.actions(&ActionFilter::default().urgency(Urgency::Critical)).await?;
//! println!("{} critical actions", report.visible.len());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
