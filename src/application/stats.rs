//! Derived statistics over aggregated collections.
//!
//! Every builder is a single pass over the items (plus a sort for top-N)
//! and carries the collection's failed-source count so callers can flag
//! partial data.

use std::collections::HashSet;

use serde::Serialize;

use super::aggregate::{AggregatedCollection, Attributed};
use crate::domain::{
    Action, ActionStatus, ArtistId, ArtistRef, HealthFactors, HealthScore, MomentumSnapshot,
    Superfan, SuperfanTier, Urgency,
};

/// Action counts per urgency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UrgencyCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl UrgencyCounts {
    fn record(&mut self, urgency: Urgency) {
        match urgency {
            Urgency::Critical => self.critical += 1,
            Urgency::High => self.high += 1,
            Urgency::Medium => self.medium += 1,
            Urgency::Low => self.low += 1,
        }
    }

    #[must_use]
    pub const fn get(&self, urgency: Urgency) -> usize {
        match urgency {
            Urgency::Critical => self.critical,
            Urgency::High => self.high,
            Urgency::Medium => self.medium,
            Urgency::Low => self.low,
        }
    }
}

/// Action counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub dismissed: usize,
}

impl StatusCounts {
    fn record(&mut self, status: ActionStatus) {
        match status {
            ActionStatus::Pending => self.pending += 1,
            ActionStatus::InProgress => self.in_progress += 1,
            ActionStatus::Completed => self.completed += 1,
            ActionStatus::Dismissed => self.dismissed += 1,
        }
    }

    #[must_use]
    pub const fn get(&self, status: ActionStatus) -> usize {
        match status {
            ActionStatus::Pending => self.pending,
            ActionStatus::InProgress => self.in_progress,
            ActionStatus::Completed => self.completed,
            ActionStatus::Dismissed => self.dismissed,
        }
    }

    /// Actions still needing attention.
    #[must_use]
    pub const fn open(&self) -> usize {
        self.pending + self.in_progress
    }
}

/// Rollup of the actions view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionStats {
    pub total: usize,
    pub by_urgency: UrgencyCounts,
    pub by_status: StatusCounts,
    /// Distinct artists with at least one action.
    pub artists: usize,
    pub failed_sources: usize,
}

impl ActionStats {
    #[must_use]
    pub fn from_collection(collection: &AggregatedCollection<Action>) -> Self {
        Self::from_items(collection.items(), collection.failed_sources())
    }

    /// Compute over a filtered or sorted view.
    #[must_use]
    pub fn from_items(items: &[Attributed<Action>], failed_sources: usize) -> Self {
        let mut stats = Self {
            failed_sources,
            ..Self::default()
        };
        let mut seen: HashSet<&ArtistId> = HashSet::new();

        for entry in items {
            stats.total += 1;
            stats.by_urgency.record(entry.item.urgency);
            stats.by_status.record(entry.item.status);
            seen.insert(&entry.artist.id);
        }

        stats.artists = seen.len();
        stats
    }
}

/// An artist with the score that put them on a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistScore {
    pub artist: ArtistRef,
    pub score: f64,
}

/// Rollup of the momentum view, including the portfolio health score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MomentumStats {
    pub total: usize,
    pub average_momentum: f64,
    pub average_engagement: f64,
    /// Artists trending `growing` or `fire`.
    pub growing: usize,
    pub strongest: Option<ArtistScore>,
    pub weakest: Option<ArtistScore>,
    /// Highest momentum first; ties keep aggregation order.
    pub top: Vec<Attributed<MomentumSnapshot>>,
    pub health: HealthScore,
    pub failed_sources: usize,
}

impl MomentumStats {
    #[must_use]
    pub fn from_collection(
        collection: &AggregatedCollection<MomentumSnapshot>,
        top_n: usize,
    ) -> Self {
        let items = collection.items();
        let total = items.len();

        let mut momentum_sum = 0.0;
        let mut engagement_sum = 0.0;
        let mut growing = 0;
        let mut strongest: Option<&Attributed<MomentumSnapshot>> = None;
        let mut weakest: Option<&Attributed<MomentumSnapshot>> = None;

        for entry in items {
            let score = entry.item.momentum_score;
            momentum_sum += score;
            engagement_sum += entry.item.engagement;
            if entry.item.status.is_growing() {
                growing += 1;
            }
            if strongest.map_or(true, |best| score > best.item.momentum_score) {
                strongest = Some(entry);
            }
            if weakest.map_or(true, |worst| score < worst.item.momentum_score) {
                weakest = Some(entry);
            }
        }

        let to_score = |entry: &Attributed<MomentumSnapshot>| ArtistScore {
            artist: entry.artist.clone(),
            score: entry.item.momentum_score,
        };

        Self {
            total,
            average_momentum: average(momentum_sum, total),
            average_engagement: average(engagement_sum, total),
            growing,
            strongest: strongest.map(to_score),
            weakest: weakest.map(to_score),
            top: top_n_by(items, top_n, |entry| entry.item.momentum_score),
            health: health_score(items),
            failed_sources: collection.failed_sources(),
        }
    }
}

/// Superfan counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub platinum: usize,
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

impl TierCounts {
    fn record(&mut self, tier: SuperfanTier) {
        match tier {
            SuperfanTier::Platinum => self.platinum += 1,
            SuperfanTier::Gold => self.gold += 1,
            SuperfanTier::Silver => self.silver += 1,
            SuperfanTier::Bronze => self.bronze += 1,
        }
    }
}

/// Rollup of the superfans view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuperfanStats {
    pub total: usize,
    pub average_fan_value: f64,
    pub total_lifetime_value: f64,
    pub by_tier: TierCounts,
    pub top: Vec<Attributed<Superfan>>,
    pub failed_sources: usize,
}

impl SuperfanStats {
    #[must_use]
    pub fn from_collection(collection: &AggregatedCollection<Superfan>, top_n: usize) -> Self {
        let items = collection.items();
        let mut fan_value_sum = 0.0;
        let mut lifetime_sum = 0.0;
        let mut by_tier = TierCounts::default();

        for entry in items {
            fan_value_sum += entry.item.fan_value_score;
            lifetime_sum += entry.item.lifetime_value;
            by_tier.record(entry.item.tier);
        }

        Self {
            total: items.len(),
            average_fan_value: average(fan_value_sum, items.len()),
            total_lifetime_value: lifetime_sum,
            by_tier,
            top: top_n_by(items, top_n, |entry| entry.item.fan_value_score),
            failed_sources: collection.failed_sources(),
        }
    }
}

/// Portfolio health from momentum snapshots.
///
/// - momentum = `avg(momentum_score) / 10 * 100`
/// - growth = share of `growing`/`fire` artists, in percent
/// - engagement = `min(avg(engagement) / 100 * 100, 100)`
///
/// An empty portfolio scores zero on every factor.
#[must_use]
pub fn health_score(items: &[Attributed<MomentumSnapshot>]) -> HealthScore {
    let total = items.len();
    let momentum_sum: f64 = items.iter().map(|e| e.item.momentum_score).sum();
    let engagement_sum: f64 = items.iter().map(|e| e.item.engagement).sum();
    let growing = items.iter().filter(|e| e.item.status.is_growing()).count();

    let momentum = average(momentum_sum, total) / 10.0 * 100.0;
    let growth = if total == 0 {
        0.0
    } else {
        growing as f64 / total as f64 * 100.0
    };
    let engagement = (average(engagement_sum, total) / 100.0 * 100.0).min(100.0);

    HealthScore::from_factors(HealthFactors::new(momentum, growth, engagement))
}

fn average(sum: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// The `n` highest-scoring entries, stable for ties.
fn top_n_by<T: Clone>(
    items: &[Attributed<T>],
    n: usize,
    score: impl Fn(&Attributed<T>) -> f64,
) -> Vec<Attributed<T>> {
    let mut ranked: Vec<&Attributed<T>> = items.iter().collect();
    ranked.sort_by(|a, b| score(b).total_cmp(&score(a)));
    ranked.into_iter().take(n).cloned().collect()
}
