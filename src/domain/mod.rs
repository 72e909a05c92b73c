//! Exchange-agnostic domain types for the FanPulse portfolio.
//!
//! Pure value types with no I/O: identifiers, artist references, the
//! per-artist resources the aggregator collects, feed opportunities and the
//! health score model.

pub mod action;
pub mod artist;
pub mod health;
pub mod id;
pub mod momentum;
pub mod opportunity;
pub mod superfan;
pub mod time;

pub use action::{Action, ActionStatus, Urgency};
pub use artist::ArtistRef;
pub use health::{HealthFactors, HealthScore, HealthStatus};
pub use id::{ActionId, ArtistId, OpportunityId, SuperfanId};
pub use momentum::{MomentumSnapshot, MomentumStatus};
pub use opportunity::Opportunity;
pub use superfan::{Superfan, SuperfanTier};
pub use time::Timestamp;
