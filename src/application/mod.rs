//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod aggregate;
pub mod feed;
pub mod portfolio;
pub mod stats;

pub use aggregate::{
    aggregate, aggregate_directory, aggregate_resource, ActionFilter, AggregatedCollection,
    Attributed, Facet, SourceFailure,
};
pub use feed::{FeedHandle, OpportunityFeedState, RealtimeChannel};
pub use portfolio::{
    ActionsReport, MomentumReport, PortfolioBackend, PortfolioService, SuperfanReport,
};
pub use stats::{health_score, ActionStats, MomentumStats, SuperfanStats};
