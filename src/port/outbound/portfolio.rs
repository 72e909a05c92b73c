//! Portfolio collaborator ports.
//!
//! These are the request/response contracts the aggregator consumes. The
//! directory enumerates artists, a resource returns one list per artist, and
//! the status updater mutates a single action server-side.

use async_trait::async_trait;

use crate::domain::{ActionId, ActionStatus, ArtistRef};
use crate::error::{DirectoryError, ResourceFetchError, StatusUpdateError};

/// Enumerates the artists of the current account.
#[async_trait]
pub trait ArtistDirectory: Send + Sync {
    /// List every artist. No pagination contract is assumed.
    async fn list_artists(&self) -> Result<Vec<ArtistRef>, DirectoryError>;
}

/// Fetches one per-artist resource.
///
/// A single client typically implements this for several `T`
/// (actions, momentum, superfans), one endpoint each.
#[async_trait]
pub trait ArtistResource<T>: Send + Sync {
    /// Fetch the resource for one artist, in server order.
    async fn fetch(&self, artist: &ArtistRef) -> Result<Vec<T>, ResourceFetchError>;

    /// Resource name for logging.
    fn resource_name(&self) -> &'static str;
}

/// Persists status changes of recommended actions.
#[async_trait]
pub trait StatusUpdater: Send + Sync {
    async fn update_status(
        &self,
        action_id: &ActionId,
        status: ActionStatus,
    ) -> Result<(), StatusUpdateError>;
}
