//! FanPulse REST API client.
//!
//! One client implements every portfolio port: the artist directory, the
//! three per-artist resources, and action status updates. All requests carry
//! the bearer token when one is configured.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use super::dto::{ListResponse, MomentumResponse, StatusUpdateRequest};
use super::settings::ApiConfig;
use crate::domain::{Action, ActionId, ActionStatus, ArtistRef, MomentumSnapshot, Superfan};
use crate::error::{ConfigError, DirectoryError, ResourceFetchError, Result, StatusUpdateError};
use crate::port::outbound::{ArtistDirectory, ArtistResource, StatusUpdater};

/// Failure of a single HTTP exchange, before it is mapped to a port error.
#[derive(Error, Debug)]
enum RequestFailure {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("server returned status {0}")]
    Status(StatusCode),

    #[error("invalid response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// HTTP client for the FanPulse backend.
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    token: Option<String>,
    superfan_limit: usize,
}

impl ApiClient {
    /// Build a client from the `[api]` settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not a valid absolute HTTP URL or
    /// the HTTP client cannot be built.
    pub fn new(config: &ApiConfig, token: Option<String>, superfan_limit: usize) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url",
                reason: format!("'{}' is not a base URL", config.base_url),
            }
            .into());
        }

        let http = HttpClient::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            base_url,
            token,
            superfan_limit,
        })
    }

    /// Build the URL for `segments` below the base path.
    ///
    /// Segments are percent-encoded, so opaque ids are safe to pass through.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> std::result::Result<T, RequestFailure> {
        debug!(url = %url, "GET");
        let response = self
            .request(Method::GET, url)
            .send()
            .await
            .map_err(RequestFailure::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RequestFailure::Status(status));
        }
        response.json::<T>().await.map_err(RequestFailure::Decode)
    }

    async fn get_list<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> std::result::Result<Vec<T>, RequestFailure> {
        Ok(self.get_json::<ListResponse<T>>(url).await?.into_vec())
    }
}

#[async_trait]
impl ArtistDirectory for ApiClient {
    async fn list_artists(&self) -> std::result::Result<Vec<ArtistRef>, DirectoryError> {
        let url = self.endpoint(&["api", "artists"]);
        let artists = self.get_list(url).await.map_err(|err| match err {
            RequestFailure::Transport(e) => DirectoryError::Request(e.to_string()),
            RequestFailure::Status(status) => DirectoryError::Status {
                status: status.as_u16(),
            },
            RequestFailure::Decode(e) => DirectoryError::Decode(e.to_string()),
        })?;
        info!(count = artists.len(), "Fetched artist directory");
        Ok(artists)
    }
}

#[async_trait]
impl ArtistResource<Action> for ApiClient {
    async fn fetch(
        &self,
        artist: &ArtistRef,
    ) -> std::result::Result<Vec<Action>, ResourceFetchError> {
        let url = self.endpoint(&["api", "artists", artist.id.as_str(), "actions"]);
        self.get_list(url)
            .await
            .map_err(|err| ResourceFetchError::new(artist.id.clone(), err.to_string()))
    }

    fn resource_name(&self) -> &'static str {
        "actions"
    }
}

#[async_trait]
impl ArtistResource<MomentumSnapshot> for ApiClient {
    async fn fetch(
        &self,
        artist: &ArtistRef,
    ) -> std::result::Result<Vec<MomentumSnapshot>, ResourceFetchError> {
        let url = self.endpoint(&["api", "artists", artist.id.as_str(), "momentum"]);
        let response: MomentumResponse = self
            .get_json(url)
            .await
            .map_err(|err| ResourceFetchError::new(artist.id.clone(), err.to_string()))?;
        Ok(vec![response.into_snapshot()])
    }

    fn resource_name(&self) -> &'static str {
        "momentum"
    }
}

#[async_trait]
impl ArtistResource<Superfan> for ApiClient {
    async fn fetch(
        &self,
        artist: &ArtistRef,
    ) -> std::result::Result<Vec<Superfan>, ResourceFetchError> {
        let mut url = self.endpoint(&["api", "artists", artist.id.as_str(), "superfans"]);
        url.query_pairs_mut()
            .append_pair("limit", &self.superfan_limit.to_string());
        self.get_list(url)
            .await
            .map_err(|err| ResourceFetchError::new(artist.id.clone(), err.to_string()))
    }

    fn resource_name(&self) -> &'static str {
        "superfans"
    }
}

#[async_trait]
impl StatusUpdater for ApiClient {
    async fn update_status(
        &self,
        action_id: &ActionId,
        status: ActionStatus,
    ) -> std::result::Result<(), StatusUpdateError> {
        let url = self.endpoint(&["api", "actions", action_id.as_str()]);
        let rejected = |reason: String| StatusUpdateError::Rejected {
            action_id: action_id.clone(),
            reason,
        };

        let response = self
            .request(Method::PATCH, url)
            .json(&StatusUpdateRequest { status })
            .send()
            .await
            .map_err(|err| rejected(err.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StatusUpdateError::NotFound(action_id.clone())),
            s if s.is_success() => {
                info!(action_id = %action_id, status = %status, "Action status saved");
                Ok(())
            }
            s => Err(rejected(format!("server returned status {s}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response; the task yields the raw request head.
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let task = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let body_len = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + body_len {
                        break;
                    }
                }
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}"), task)
    }

    fn client(base_url: &str, token: Option<&str>) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
        };
        ApiClient::new(&config, token.map(str::to_string), 25).unwrap()
    }

    #[test]
    fn endpoint_encodes_segments() {
        let client = client("https://api.example.com/v2/", None);
        let url = client.endpoint(&["api", "artists", "a b/c", "actions"]);
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v2/api/artists/a%20b%2Fc/actions"
        );
    }

    #[test]
    fn rejects_non_base_url() {
        let config = ApiConfig {
            base_url: "mailto:ops@example.com".into(),
            timeout_secs: 5,
        };
        assert!(ApiClient::new(&config, None, 10).is_err());
    }

    #[tokio::test]
    async fn list_artists_sends_bearer_token() {
        let (base, server) =
            serve_once("200 OK", r#"{"artists":[{"id":"a1","name":"Nova"}]}"#).await;

        let artists = client(&base, Some("secret")).list_artists().await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(artists, vec![ArtistRef::new("a1", "Nova")]);
        assert!(request.starts_with("GET /api/artists "));
        assert!(request.to_lowercase().contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn directory_status_maps_to_error() {
        let (base, _server) = serve_once("503 Service Unavailable", "{}").await;

        let err = client(&base, None).list_artists().await.unwrap_err();

        assert!(matches!(err, DirectoryError::Status { status: 503 }));
    }

    #[tokio::test]
    async fn superfans_request_carries_limit() {
        let (base, server) = serve_once("200 OK", "[]").await;
        let artist = ArtistRef::new("a1", "Nova");

        let fans = ArtistResource::<Superfan>::fetch(&client(&base, None), &artist)
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(fans.is_empty());
        assert!(request.starts_with("GET /api/artists/a1/superfans?limit=25 "));
    }

    #[tokio::test]
    async fn resource_failure_names_artist() {
        let (base, _server) = serve_once("500 Internal Server Error", "{}").await;
        let artist = ArtistRef::new("a9", "Nine");

        let err = ArtistResource::<Action>::fetch(&client(&base, None), &artist)
            .await
            .unwrap_err();

        assert_eq!(err.artist_id.as_str(), "a9");
        assert!(err.reason.contains("500"));
    }

    #[tokio::test]
    async fn missing_action_maps_to_not_found() {
        let (base, server) = serve_once("404 Not Found", "{}").await;

        let err = client(&base, None)
            .update_status(&ActionId::new("x1"), ActionStatus::Completed)
            .await
            .unwrap_err();
        let request = server.await.unwrap();

        assert!(matches!(err, StatusUpdateError::NotFound(_)));
        assert!(request.starts_with("PATCH /api/actions/x1 "));
    }
}
