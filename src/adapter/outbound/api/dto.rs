//! REST response shapes.
//!
//! List endpoints answer either with a bare JSON array or with the array
//! wrapped in an object under a resource-named key. Both are accepted.

use serde::{Deserialize, Serialize};

use crate::domain::{ActionStatus, MomentumSnapshot};

/// A list body, bare or wrapped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(
            alias = "artists",
            alias = "actions",
            alias = "superfans",
            alias = "items"
        )]
        data: Vec<T>,
    },
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

/// Momentum body: one snapshot, optionally wrapped.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MomentumResponse {
    Wrapped { momentum: MomentumSnapshot },
    Single(MomentumSnapshot),
}

impl MomentumResponse {
    pub fn into_snapshot(self) -> MomentumSnapshot {
        match self {
            Self::Wrapped { momentum } | Self::Single(momentum) => momentum,
        }
    }
}

/// `PATCH /api/actions/{id}` body.
#[derive(Debug, Serialize)]
pub struct StatusUpdateRequest {
    pub status: ActionStatus,
}
