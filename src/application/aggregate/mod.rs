//! Multi-artist fan-out aggregation.
//!
//! [`aggregate`] issues one fetch per artist, drives them all concurrently,
//! and merges the results into a single [`AggregatedCollection`] in input
//! artist order. A failing artist contributes nothing and is recorded as a
//! [`SourceFailure`]; it never fails the aggregate as a whole. Only the
//! directory lookup in [`aggregate_directory`] is fatal.
//!
//! Sorting and filtering are a separate stage, see [`sort`] and [`filter`].

pub mod filter;
pub mod sort;

use std::future::Future;

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{ArtistId, ArtistRef};
use crate::error::{ResourceFetchError, Result};
use crate::port::outbound::{ArtistDirectory, ArtistResource};

pub use filter::{ActionFilter, Facet};
pub use sort::{sort_by_priority, sort_by_urgency};

/// One merged element tagged with the artist it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attributed<T> {
    pub artist: ArtistRef,
    pub item: T,
}

impl<T> Attributed<T> {
    pub const fn new(artist: ArtistRef, item: T) -> Self {
        Self { artist, item }
    }
}

/// An artist whose fetch failed during one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceFailure {
    pub artist: ArtistRef,
    pub reason: String,
}

/// Ordered result of one aggregation pass.
///
/// Elements appear in input artist order, and within one artist in the
/// order the fetch returned them. Snapshots are immutable: recomputation
/// produces a new collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedCollection<T> {
    items: Vec<Attributed<T>>,
    failures: Vec<SourceFailure>,
    requested: usize,
}

impl<T> AggregatedCollection<T> {
    /// An empty collection for which no artist was requested.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
            requested: 0,
        }
    }

    /// Build a collection directly from already-attributed items.
    #[must_use]
    pub fn from_parts(
        items: Vec<Attributed<T>>,
        failures: Vec<SourceFailure>,
        requested: usize,
    ) -> Self {
        Self {
            items,
            failures,
            requested,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[Attributed<T>] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Attributed<T>> {
        self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn failures(&self) -> &[SourceFailure] {
        &self.failures
    }

    /// Number of artists whose fetch failed.
    #[must_use]
    pub fn failed_sources(&self) -> usize {
        self.failures.len()
    }

    /// Number of artists the pass was asked to fetch.
    #[must_use]
    pub const fn requested(&self) -> usize {
        self.requested
    }

    /// Whether at least one artist is missing from the result.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Iterate over the items of one artist.
    pub fn for_artist<'a>(&'a self, id: &'a ArtistId) -> impl Iterator<Item = &'a Attributed<T>> {
        self.items.iter().filter(move |entry| &entry.artist.id == id)
    }

    /// Return a new collection with the same failures and a different item list.
    #[must_use]
    pub fn with_items<U>(&self, items: Vec<Attributed<U>>) -> AggregatedCollection<U> {
        AggregatedCollection {
            items,
            failures: self.failures.clone(),
            requested: self.requested,
        }
    }
}

impl<T: Clone> AggregatedCollection<T> {
    /// Return a new collection holding only the items matching `predicate`.
    #[must_use]
    pub fn filtered(&self, predicate: impl Fn(&Attributed<T>) -> bool) -> Self {
        let items = self
            .items
            .iter()
            .filter(|entry| predicate(entry))
            .cloned()
            .collect();
        self.with_items(items)
    }
}

impl<T> Default for AggregatedCollection<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Fan out `fetch_one` over `artists` and merge the results.
///
/// All fetches are started before any is awaited; total latency is that of
/// the slowest fetch. Output order follows `artists`, independent of which
/// response arrives first. Failures are logged and recorded per artist; no
/// fetch is retried.
pub async fn aggregate<T, F, Fut>(artists: &[ArtistRef], fetch_one: F) -> AggregatedCollection<T>
where
    F: Fn(ArtistRef) -> Fut,
    Fut: Future<Output = std::result::Result<Vec<T>, ResourceFetchError>>,
{
    if artists.is_empty() {
        debug!("No artists to aggregate");
        return AggregatedCollection::empty();
    }

    let pending = artists.iter().map(|artist| {
        let fetch = fetch_one(artist.clone());
        async move { (artist, fetch.await) }
    });
    let results = join_all(pending).await;

    let mut items = Vec::new();
    let mut failures = Vec::new();

    for (artist, result) in results {
        match result {
            Ok(batch) => {
                debug!(artist_id = %artist.id, count = batch.len(), "Fetched artist resource");
                items.extend(
                    batch
                        .into_iter()
                        .map(|item| Attributed::new(artist.clone(), item)),
                );
            }
            Err(err) => {
                warn!(artist_id = %artist.id, error = %err, "Artist fetch failed, skipping");
                failures.push(SourceFailure {
                    artist: artist.clone(),
                    reason: err.reason,
                });
            }
        }
    }

    info!(
        artists = artists.len(),
        items = items.len(),
        failed = failures.len(),
        "Aggregation complete"
    );

    AggregatedCollection {
        items,
        failures,
        requested: artists.len(),
    }
}

/// Aggregate one [`ArtistResource`] over the given artists.
pub async fn aggregate_resource<T, R>(
    artists: &[ArtistRef],
    resource: &R,
) -> AggregatedCollection<T>
where
    R: ArtistResource<T> + ?Sized,
{
    debug!(resource = resource.resource_name(), "Aggregating resource");
    aggregate(artists, |artist| async move { resource.fetch(&artist).await }).await
}

/// List artists through the directory, then aggregate the resource.
///
/// # Errors
///
/// Returns [`Error::Directory`](crate::error::Error::Directory) when the
/// directory cannot be enumerated. Per-artist failures never surface here.
pub async fn aggregate_directory<T, D, R>(
    directory: &D,
    resource: &R,
) -> Result<AggregatedCollection<T>>
where
    D: ArtistDirectory + ?Sized,
    R: ArtistResource<T> + ?Sized,
{
    let artists = directory.list_artists().await.map_err(|err| {
        warn!(error = %err, "Artist directory unavailable");
        err
    })?;
    Ok(aggregate_resource(&artists, resource).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn artists() -> Vec<ArtistRef> {
        vec![
            ArtistRef::new("a1", "A"),
            ArtistRef::new("a2", "B"),
            ArtistRef::new("a3", "C"),
        ]
    }

    #[tokio::test]
    async fn empty_input_issues_no_requests() {
        let calls = AtomicUsize::new(0);
        let result: AggregatedCollection<u32> = aggregate(&[], |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, ResourceFetchError>(vec![1]) }
        })
        .await;

        assert!(result.is_empty());
        assert_eq!(result.requested(), 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn preserves_input_order_regardless_of_latency() {
        // First artist answers last.
        let result = aggregate(&artists(), |artist| async move {
            let delay = match artist.id.as_str() {
                "a1" => 300,
                "a2" => 100,
                _ => 200,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            Ok::<_, ResourceFetchError>(vec![
                format!("{}-0", artist.id),
                format!("{}-1", artist.id),
            ])
        })
        .await;

        let items: Vec<&str> = result.items().iter().map(|e| e.item.as_str()).collect();
        assert_eq!(items, vec!["a1-0", "a1-1", "a2-0", "a2-1", "a3-0", "a3-1"]);
    }

    #[tokio::test(start_paused = true)]
    async fn fetches_run_concurrently() {
        let start = tokio::time::Instant::now();
        let _ = aggregate(&artists(), |_| async {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok::<_, ResourceFetchError>(vec![()])
        })
        .await;

        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn isolates_single_failure() {
        let result = aggregate(&artists(), |artist| async move {
            if artist.id.as_str() == "a2" {
                Err(ResourceFetchError::new(artist.id, "boom"))
            } else {
                Ok(vec![artist.name.clone()])
            }
        })
        .await;

        let names: Vec<&str> = result.items().iter().map(|e| e.item.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(result.failed_sources(), 1);
        assert_eq!(result.failures()[0].artist.id.as_str(), "a2");
        assert_eq!(result.failures()[0].reason, "boom");
        assert!(result.is_partial());
    }

    #[tokio::test]
    async fn every_item_carries_its_artist() {
        let result = aggregate(&artists(), |artist| async move {
            Ok::<_, ResourceFetchError>(vec![artist.id.to_string(); 2])
        })
        .await;

        assert_eq!(result.len(), 6);
        for entry in result.items() {
            assert_eq!(entry.artist.id.as_str(), entry.item);
        }
        assert_eq!(result.for_artist(&ArtistId::new("a3")).count(), 2);
    }

    #[tokio::test]
    async fn filtered_keeps_failures() {
        let result = aggregate(&artists(), |artist| async move {
            if artist.id.as_str() == "a1" {
                Err(ResourceFetchError::new(artist.id, "down"))
            } else {
                Ok(vec![1u32, 2, 3])
            }
        })
        .await;

        let odd = result.filtered(|entry| entry.item % 2 == 1);
        assert_eq!(odd.len(), 4);
        assert_eq!(odd.failed_sources(), 1);
        assert_eq!(odd.requested(), 3);
    }
}
