//! In-memory portfolio backend.
//!
//! [`FakeBackend`] implements every portfolio port from scripted per-artist
//! data. Artists without scripted data return an empty list; artists marked
//! failing return an error for every resource.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{
    Action, ActionId, ActionStatus, ArtistId, ArtistRef, MomentumSnapshot, Superfan,
};
use crate::error::{DirectoryError, ResourceFetchError, StatusUpdateError};
use crate::port::outbound::{ArtistDirectory, ArtistResource, StatusUpdater};

#[derive(Default)]
pub struct FakeBackend {
    artists: Vec<ArtistRef>,
    directory_down: bool,
    actions: HashMap<ArtistId, Vec<Action>>,
    momentum: HashMap<ArtistId, MomentumSnapshot>,
    superfans: HashMap<ArtistId, Vec<Superfan>>,
    failing: HashMap<ArtistId, String>,
    latency: HashMap<ArtistId, Duration>,
    reject_updates: bool,
    updates: Mutex<Vec<(ActionId, ActionStatus)>>,
    fetch_count: AtomicU32,
}

impl FakeBackend {
    pub fn new(artists: Vec<ArtistRef>) -> Self {
        Self {
            artists,
            ..Self::default()
        }
    }

    /// Make `list_artists` fail.
    pub fn directory_down(mut self) -> Self {
        self.directory_down = true;
        self
    }

    pub fn with_actions(mut self, artist: &str, actions: Vec<Action>) -> Self {
        self.actions.insert(ArtistId::new(artist), actions);
        self
    }

    pub fn with_momentum(mut self, artist: &str, snapshot: MomentumSnapshot) -> Self {
        self.momentum.insert(ArtistId::new(artist), snapshot);
        self
    }

    pub fn with_superfans(mut self, artist: &str, superfans: Vec<Superfan>) -> Self {
        self.superfans.insert(ArtistId::new(artist), superfans);
        self
    }

    /// Fail every resource fetch for one artist.
    pub fn failing(mut self, artist: &str, reason: &str) -> Self {
        self.failing.insert(ArtistId::new(artist), reason.to_string());
        self
    }

    /// Delay every resource fetch for one artist.
    pub fn with_latency(mut self, artist: &str, latency: Duration) -> Self {
        self.latency.insert(ArtistId::new(artist), latency);
        self
    }

    /// Reject every status update.
    pub fn rejecting_updates(mut self) -> Self {
        self.reject_updates = true;
        self
    }

    /// Status updates accepted so far.
    pub fn updates(&self) -> Vec<(ActionId, ActionStatus)> {
        self.updates.lock().clone()
    }

    /// Total per-artist fetches issued across all resources.
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count.load(Ordering::SeqCst)
    }

    async fn simulate(&self, artist: &ArtistRef) -> Result<(), ResourceFetchError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency.get(&artist.id) {
            tokio::time::sleep(*latency).await;
        }
        match self.failing.get(&artist.id) {
            Some(reason) => Err(ResourceFetchError::new(artist.id.clone(), reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ArtistDirectory for FakeBackend {
    async fn list_artists(&self) -> Result<Vec<ArtistRef>, DirectoryError> {
        if self.directory_down {
            return Err(DirectoryError::Status { status: 503 });
        }
        Ok(self.artists.clone())
    }
}

#[async_trait]
impl ArtistResource<Action> for FakeBackend {
    async fn fetch(&self, artist: &ArtistRef) -> Result<Vec<Action>, ResourceFetchError> {
        self.simulate(artist).await?;
        Ok(self.actions.get(&artist.id).cloned().unwrap_or_default())
    }

    fn resource_name(&self) -> &'static str {
        "actions"
    }
}

#[async_trait]
impl ArtistResource<MomentumSnapshot> for FakeBackend {
    async fn fetch(&self, artist: &ArtistRef) -> Result<Vec<MomentumSnapshot>, ResourceFetchError> {
        self.simulate(artist).await?;
        Ok(self.momentum.get(&artist.id).cloned().into_iter().collect())
    }

    fn resource_name(&self) -> &'static str {
        "momentum"
    }
}

#[async_trait]
impl ArtistResource<Superfan> for FakeBackend {
    async fn fetch(&self, artist: &ArtistRef) -> Result<Vec<Superfan>, ResourceFetchError> {
        self.simulate(artist).await?;
        Ok(self.superfans.get(&artist.id).cloned().unwrap_or_default())
    }

    fn resource_name(&self) -> &'static str {
        "superfans"
    }
}

#[async_trait]
impl StatusUpdater for FakeBackend {
    async fn update_status(
        &self,
        action_id: &ActionId,
        status: ActionStatus,
    ) -> Result<(), StatusUpdateError> {
        if self.reject_updates {
            return Err(StatusUpdateError::Rejected {
                action_id: action_id.clone(),
                reason: "server returned 500".into(),
            });
        }
        self.updates.lock().push((action_id.clone(), status));
        Ok(())
    }
}
