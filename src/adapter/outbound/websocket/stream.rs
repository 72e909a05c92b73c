//! WebSocket implementation of the feed port.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace, warn};
use url::Url;

use super::message::decode;
use crate::error::{Error, Result};
use crate::port::outbound::{ControlFrame, FeedEvent, FeedStream};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Opportunity feed over a WebSocket connection.
///
/// Holds at most one socket; `connect` replaces any previous one.
pub struct WebSocketFeedStream {
    url: Url,
    ws: Option<Socket>,
}

impl WebSocketFeedStream {
    /// Create a stream for `ws_url`, appending the auth token as the
    /// `token` query parameter when present.
    ///
    /// # Errors
    ///
    /// Returns an error if `ws_url` is not a valid URL.
    pub fn new(ws_url: &str, token: Option<&str>) -> Result<Self> {
        let mut url = Url::parse(ws_url)?;
        if let Some(token) = token {
            url.query_pairs_mut().append_pair("token", token);
        }
        Ok(Self { url, ws: None })
    }

    /// Connection URL with the token redacted, for logs.
    pub fn redacted_url(&self) -> String {
        if self.url.query().is_none() {
            return self.url.to_string();
        }
        let mut url = self.url.clone();
        let pairs: Vec<(String, String)> = self
            .url
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "token" { "***".into() } else { v.into_owned() };
                (k.into_owned(), v)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }
}

#[async_trait]
impl FeedStream for WebSocketFeedStream {
    async fn connect(&mut self) -> Result<()> {
        info!(url = %self.redacted_url(), "Connecting to WebSocket");
        let (ws_stream, response) = connect_async(self.url.as_str()).await?;
        info!(status = %response.status(), "WebSocket connected");
        self.ws = Some(ws_stream);
        Ok(())
    }

    async fn send(&mut self, frame: ControlFrame) -> Result<()> {
        let ws = self
            .ws
            .as_mut()
            .ok_or_else(|| Error::Transport("not connected".into()))?;
        let json = serde_json::to_string(&frame)?;
        trace!(frame = %json, "Sending control frame");
        ws.send(Message::Text(json)).await?;
        Ok(())
    }

    async fn next_event(&mut self) -> Option<FeedEvent> {
        let ws = self.ws.as_mut()?;

        loop {
            let Some(frame) = ws.next().await else {
                self.ws = None;
                return Some(FeedEvent::Disconnected {
                    reason: "stream ended".into(),
                });
            };

            match frame {
                Ok(Message::Text(text)) => {
                    trace!(bytes = text.len(), "Received WebSocket text frame");
                    match decode(&text) {
                        Ok(message) => return Some(FeedEvent::Message(message)),
                        Err(e) => {
                            warn!(error = %e, bytes = text.len(), "Failed to parse message");
                        }
                    }
                }
                Ok(Message::Ping(data)) => {
                    trace!("Received WebSocket ping");
                    if ws.send(Message::Pong(data)).await.is_err() {
                        self.ws = None;
                        return Some(FeedEvent::Disconnected {
                            reason: "failed to send pong".into(),
                        });
                    }
                }
                Ok(Message::Close(frame)) => {
                    info!(frame = ?frame, "WebSocket closed by server");
                    self.ws = None;
                    return Some(FeedEvent::Disconnected {
                        reason: frame.map(|f| f.reason.to_string()).unwrap_or_default(),
                    });
                }
                Ok(_) => {}
                Err(e) => {
                    error!(error = %e, "WebSocket error");
                    self.ws = None;
                    return Some(FeedEvent::Disconnected {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    async fn close(&mut self) {
        if let Some(mut ws) = self.ws.take() {
            if let Err(e) = ws.close(None).await {
                debug!(error = %e, "WebSocket close failed");
            }
        }
    }

    fn transport_name(&self) -> &'static str {
        "websocket"
    }
}
