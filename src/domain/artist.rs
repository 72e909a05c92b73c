//! Artist references as handed out by the artist directory.

use serde::{Deserialize, Serialize};

use super::id::ArtistId;

/// Opaque artist identifier plus display name.
///
/// Owned by the directory; the aggregator only clones and attaches it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: ArtistId,
    pub name: String,
}

impl ArtistRef {
    pub fn new(id: impl Into<ArtistId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
