//! Feed wire messages.
//!
//! Every text frame is a JSON envelope:
//!
//! ```json
//! {"type":"new_opportunity","timestamp":"2024-05-01T10:00:00Z","data":{...}}
//! {"type":"opportunities_refreshed","opportunities":[...],"count":3}
//! ```
//!
//! Snapshots carry their list under `opportunities`, or under `data`
//! (directly or as `data.opportunities`). Pushes carry one item under `data`.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{Opportunity, Timestamp};
use crate::port::outbound::{FeedMessage, FeedPayload};

/// Raw inbound envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub opportunities: Option<Vec<Opportunity>>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl Envelope {
    /// Classify the envelope into a feed message.
    ///
    /// An unparseable `timestamp` is dropped rather than failing the message.
    ///
    /// # Errors
    ///
    /// Returns an error when a snapshot or push carries no decodable body.
    pub fn into_message(self) -> Result<FeedMessage, serde_json::Error> {
        let timestamp = self
            .timestamp
            .as_deref()
            .and_then(|raw| raw.parse::<Timestamp>().ok());

        let payload = match self.kind.as_str() {
            "initial_opportunities" | "opportunities_refreshed" | "opportunities" => {
                FeedPayload::Snapshot(snapshot_items(self.opportunities, self.data)?)
            }
            "new_opportunity" | "opportunity_alert" => {
                let data = self.data.unwrap_or(Value::Null);
                FeedPayload::Push(serde_json::from_value(data)?)
            }
            "pong" | "heartbeat" | "connection_established" => FeedPayload::Heartbeat,
            _ => FeedPayload::Unknown(self.kind),
        };

        Ok(FeedMessage { timestamp, payload })
    }
}

fn snapshot_items(
    opportunities: Option<Vec<Opportunity>>,
    data: Option<Value>,
) -> Result<Vec<Opportunity>, serde_json::Error> {
    if let Some(items) = opportunities {
        return Ok(items);
    }
    match data {
        Some(Value::Object(mut map)) => match map.remove("opportunities") {
            Some(items) => serde_json::from_value(items),
            None => Ok(Vec::new()),
        },
        Some(items @ Value::Array(_)) => serde_json::from_value(items),
        _ => Ok(Vec::new()),
    }
}

/// Decode one text frame.
///
/// # Errors
///
/// Returns an error for malformed JSON or an undecodable body.
pub fn decode(text: &str) -> Result<FeedMessage, serde_json::Error> {
    serde_json::from_str::<Envelope>(text)?.into_message()
}
