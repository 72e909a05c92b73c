use thiserror::Error;

use crate::domain::id::{ActionId, ArtistId};

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// The artist directory could not be enumerated.
///
/// Fatal for any aggregation that depends on the artist list.
#[derive(Error, Debug, Clone)]
pub enum DirectoryError {
    #[error("artist directory request failed: {0}")]
    Request(String),

    #[error("artist directory returned status {status}")]
    Status { status: u16 },

    #[error("artist directory response could not be decoded: {0}")]
    Decode(String),
}

/// A per-artist resource fetch failed.
///
/// Never escapes the aggregator; recorded as a source failure instead.
#[derive(Error, Debug, Clone)]
#[error("fetch for artist {artist_id} failed: {reason}")]
pub struct ResourceFetchError {
    pub artist_id: ArtistId,
    pub reason: String,
}

impl ResourceFetchError {
    pub fn new(artist_id: ArtistId, reason: impl Into<String>) -> Self {
        Self {
            artist_id,
            reason: reason.into(),
        }
    }
}

/// Updating the status of a single item failed.
#[derive(Error, Debug, Clone)]
pub enum StatusUpdateError {
    #[error("action {0} not found in collection")]
    NotFound(ActionId),

    #[error("status update for action {action_id} rejected: {reason}")]
    Rejected { action_id: ActionId, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    ResourceFetch(#[from] ResourceFetchError),

    #[error(transparent)]
    StatusUpdate(#[from] StatusUpdateError),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(err))
    }
}
