//! Portfolio views over the FanPulse backend.
//!
//! [`PortfolioService`] wires the directory and per-artist resources into
//! the aggregation pipeline for each dashboard view: actions, momentum with
//! health score, and superfans. Each call is one aggregation pass and
//! returns an immutable report.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use super::aggregate::{
    aggregate_directory, sort_by_urgency, ActionFilter, AggregatedCollection, Attributed,
};
use super::stats::{ActionStats, MomentumStats, SuperfanStats};
use crate::domain::{
    Action, ActionId, ActionStatus, ArtistRef, HealthScore, MomentumSnapshot, Superfan,
};
use crate::error::{Result, StatusUpdateError};
use crate::port::outbound::{ArtistDirectory, ArtistResource, StatusUpdater};

/// Everything the portfolio views need from the backend.
pub trait PortfolioBackend:
    ArtistDirectory
    + ArtistResource<Action>
    + ArtistResource<MomentumSnapshot>
    + ArtistResource<Superfan>
    + StatusUpdater
{
}

impl<T> PortfolioBackend for T where
    T: ArtistDirectory
        + ArtistResource<Action>
        + ArtistResource<MomentumSnapshot>
        + ArtistResource<Superfan>
        + StatusUpdater
{
}

/// Actions view: all actions sorted by urgency, plus the filtered subset.
#[derive(Debug, Clone, Serialize)]
pub struct ActionsReport {
    /// Every aggregated action, most urgent and newest first.
    pub all: AggregatedCollection<Action>,
    /// The subset passing the filter, in the same order.
    pub visible: Vec<Attributed<Action>>,
    pub stats: ActionStats,
    /// Stats over `visible` only.
    pub visible_stats: ActionStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct MomentumReport {
    pub snapshots: AggregatedCollection<MomentumSnapshot>,
    pub stats: MomentumStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuperfanReport {
    pub superfans: AggregatedCollection<Superfan>,
    pub stats: SuperfanStats,
}

/// Aggregation entry point for the portfolio views.
pub struct PortfolioService<B: ?Sized> {
    backend: Arc<B>,
    top_n: usize,
}

impl<B: PortfolioBackend + ?Sized> PortfolioService<B> {
    pub fn new(backend: Arc<B>, top_n: usize) -> Self {
        Self { backend, top_n }
    }

    /// List the artists of the portfolio.
    ///
    /// # Errors
    ///
    /// Returns a directory error when the artist list cannot be fetched.
    pub async fn artists(&self) -> Result<Vec<ArtistRef>> {
        Ok(self.backend.list_artists().await?)
    }

    /// Aggregate actions across all artists.
    ///
    /// # Errors
    ///
    /// Fails only when the artist directory is unavailable.
    #[instrument(skip_all)]
    pub async fn actions(&self, filter: &ActionFilter) -> Result<ActionsReport> {
        let collection: AggregatedCollection<Action> =
            aggregate_directory(&*self.backend, &*self.backend).await?;

        let mut sorted = collection.items().to_vec();
        sort_by_urgency(&mut sorted);
        let all = collection.with_items(sorted);

        let visible = filter.apply(all.items());
        let stats = ActionStats::from_collection(&all);
        let visible_stats = ActionStats::from_items(&visible, all.failed_sources());

        info!(
            total = stats.total,
            visible = visible.len(),
            failed_sources = stats.failed_sources,
            "Actions aggregated"
        );

        Ok(ActionsReport {
            all,
            visible,
            stats,
            visible_stats,
        })
    }

    /// Aggregate momentum snapshots and derive the health score.
    ///
    /// # Errors
    ///
    /// Fails only when the artist directory is unavailable.
    #[instrument(skip_all)]
    pub async fn momentum(&self) -> Result<MomentumReport> {
        let snapshots: AggregatedCollection<MomentumSnapshot> =
            aggregate_directory(&*self.backend, &*self.backend).await?;
        let stats = MomentumStats::from_collection(&snapshots, self.top_n);

        info!(
            artists = stats.total,
            health = stats.health.score(),
            failed_sources = stats.failed_sources,
            "Momentum aggregated"
        );

        Ok(MomentumReport { snapshots, stats })
    }

    /// Portfolio health score.
    ///
    /// # Errors
    ///
    /// Fails only when the artist directory is unavailable.
    pub async fn health(&self) -> Result<HealthScore> {
        Ok(self.momentum().await?.stats.health)
    }

    /// Aggregate superfans across all artists.
    ///
    /// # Errors
    ///
    /// Fails only when the artist directory is unavailable.
    #[instrument(skip_all)]
    pub async fn superfans(&self) -> Result<SuperfanReport> {
        let superfans: AggregatedCollection<Superfan> =
            aggregate_directory(&*self.backend, &*self.backend).await?;
        let stats = SuperfanStats::from_collection(&superfans, self.top_n);

        info!(
            total = stats.total,
            failed_sources = stats.failed_sources,
            "Superfans aggregated"
        );

        Ok(SuperfanReport { superfans, stats })
    }

    /// Change one action's status server-side.
    ///
    /// Returns a new collection with the change applied. The input is left
    /// untouched whether or not the update succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StatusUpdateError::NotFound`] when the action is not in the
    /// collection, or the backend's rejection.
    pub async fn update_action_status(
        &self,
        collection: &AggregatedCollection<Action>,
        action_id: &ActionId,
        status: ActionStatus,
    ) -> Result<AggregatedCollection<Action>> {
        if !collection.items().iter().any(|e| &e.item.id == action_id) {
            return Err(StatusUpdateError::NotFound(action_id.clone()).into());
        }

        if let Err(err) = self.backend.update_status(action_id, status).await {
            warn!(action_id = %action_id, error = %err, "Status update failed");
            return Err(err.into());
        }

        let items = collection
            .items()
            .iter()
            .cloned()
            .map(|mut entry| {
                if &entry.item.id == action_id {
                    entry.item.status = status;
                }
                entry
            })
            .collect();

        info!(action_id = %action_id, status = %status, "Action status updated");
        Ok(collection.with_items(items))
    }
}
