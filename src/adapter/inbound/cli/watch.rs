//! Handler for the `watch` command.
//!
//! Streams the realtime opportunity feed until Ctrl-C. Every state change
//! published by the channel is diffed against the previous one and printed
//! as feed lines.

use std::time::Duration;

use tokio::time::{interval_at, Instant, Interval};
use tracing::debug;

use super::command::WatchArgs;
use super::output;
use crate::adapter::outbound::websocket::WebSocketFeedStream;
use crate::application::feed::{ConnectionStatus, OpportunityFeedState, RealtimeChannel};
use crate::domain::Opportunity;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// What changed between two published feed states.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedChange {
    Status(ConnectionStatus),
    Offline { failures: u32 },
    Snapshot { count: usize },
    Pushed(Opportunity),
}

/// Changes worth printing between `prev` and `next`.
///
/// `next` may be several transitions ahead of `prev`, so pushes are counted
/// rather than read from `latest`. They are reported oldest first, after the
/// snapshot they landed on.
#[must_use]
pub fn diff(prev: &OpportunityFeedState, next: &OpportunityFeedState) -> Vec<FeedChange> {
    let mut changes = Vec::new();

    if prev.status != next.status {
        changes.push(FeedChange::Status(next.status));
    }
    if next.offline && !prev.offline {
        changes.push(FeedChange::Offline {
            failures: next.consecutive_failures,
        });
    }

    let resnapshotted = next.snapshots != prev.snapshots;
    let new_pushes = if resnapshotted {
        next.pushes_since_snapshot
    } else {
        next.pushes_since_snapshot.saturating_sub(prev.pushes_since_snapshot)
    };
    let new_pushes = usize::try_from(new_pushes)
        .unwrap_or(usize::MAX)
        .min(next.items.len());

    if resnapshotted {
        changes.push(FeedChange::Snapshot {
            count: next.items.len() - new_pushes,
        });
    }
    changes.extend(
        next.items[..new_pushes]
            .iter()
            .rev()
            .cloned()
            .map(FeedChange::Pushed),
    );

    changes
}

/// Execute `fanpulse watch`.
pub async fn execute(config: &Config, args: &WatchArgs) -> Result<()> {
    let stream = WebSocketFeedStream::new(&config.feed.ws_url, config.token.as_deref())?;

    output::section("Opportunity Feed");
    output::field("Endpoint", stream.redacted_url());
    output::hint("press Ctrl-C to stop");

    let handle = RealtimeChannel::spawn(stream, config.feed.channel());
    let mut state_rx = handle.subscribe();
    let mut last = state_rx.borrow_and_update().clone();
    let mut refresh = args
        .refresh_secs
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .map(|period| interval_at(Instant::now() + period, period));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                debug!("Interrupted, stopping feed");
                break;
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let next = state_rx.borrow_and_update().clone();
                for change in diff(&last, &next) {
                    print_change(&change);
                }
                last = next;
            }
            () = tick(&mut refresh) => {
                if !handle.refresh() {
                    debug!("Refresh skipped, feed not open");
                }
            }
        }
    }

    handle.shutdown().await;
    output::note("Feed closed.");
    Ok(())
}

async fn tick(interval: &mut Option<Interval>) {
    match interval {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn print_change(change: &FeedChange) {
    let now = chrono::Local::now().format("%H:%M:%S").to_string();
    match change {
        FeedChange::Status(status) => output::feed_line(&now, "status", &status.to_string()),
        FeedChange::Offline { failures } => output::warning(&format!(
            "Feed offline after {failures} failed reconnects, still retrying"
        )),
        FeedChange::Snapshot { count } => {
            output::feed_line(&now, "snapshot", &format!("{count} open opportunities"));
        }
        FeedChange::Pushed(opportunity) => {
            let artist = opportunity
                .artist_id
                .as_ref()
                .map(|id| format!(" [{id}]"))
                .unwrap_or_default();
            output::feed_line(
                &now,
                opportunity.priority.as_str(),
                &format!("{}{artist}", opportunity.title),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::outbound::{FeedMessage, FeedPayload};
    use crate::testkit::domain::opportunity;

    fn open() -> OpportunityFeedState {
        OpportunityFeedState::default().connecting().opened()
    }

    #[test]
    fn reports_status_transitions() {
        let prev = OpportunityFeedState::default();
        let next = prev.clone().connecting();
        assert_eq!(
            diff(&prev, &next),
            vec![FeedChange::Status(ConnectionStatus::Connecting)]
        );
    }

    #[test]
    fn push_is_reported_once() {
        let prev = open();
        let next = prev
            .clone()
            .apply(FeedMessage::new(FeedPayload::Push(opportunity("o1"))));

        assert_eq!(diff(&prev, &next), vec![FeedChange::Pushed(opportunity("o1"))]);
        assert!(diff(&next, &next).is_empty());
    }

    #[test]
    fn every_push_between_observations_is_reported() {
        let prev = open();
        let next = prev
            .clone()
            .apply(FeedMessage::new(FeedPayload::Push(opportunity("o1"))))
            .apply(FeedMessage::new(FeedPayload::Push(opportunity("o2"))));

        assert_eq!(
            diff(&prev, &next),
            vec![
                FeedChange::Pushed(opportunity("o1")),
                FeedChange::Pushed(opportunity("o2")),
            ]
        );
    }

    #[test]
    fn snapshot_then_pushes_in_one_observation() {
        let prev = open().apply(FeedMessage::new(FeedPayload::Push(opportunity("old"))));
        let next = prev
            .clone()
            .apply(FeedMessage::new(FeedPayload::Snapshot(vec![
                opportunity("s1"),
                opportunity("s2"),
            ])))
            .apply(FeedMessage::new(FeedPayload::Push(opportunity("p1"))));

        assert_eq!(
            diff(&prev, &next),
            vec![
                FeedChange::Snapshot { count: 2 },
                FeedChange::Pushed(opportunity("p1")),
            ]
        );
    }

    #[test]
    fn pushes_beyond_the_cap_are_not_invented() {
        let prev = open();
        let next = prev
            .clone()
            .apply(FeedMessage::new(FeedPayload::Push(opportunity("o1"))))
            .apply(FeedMessage::new(FeedPayload::Push(opportunity("o2"))))
            .apply(FeedMessage::new(FeedPayload::Push(opportunity("o3"))))
            .trimmed(2);

        assert_eq!(
            diff(&prev, &next),
            vec![
                FeedChange::Pushed(opportunity("o2")),
                FeedChange::Pushed(opportunity("o3")),
            ]
        );
    }

    #[test]
    fn snapshot_reports_item_count() {
        let prev = open();
        let next = prev.clone().apply(FeedMessage::new(FeedPayload::Snapshot(vec![
            opportunity("o1"),
            opportunity("o2"),
        ])));

        assert_eq!(diff(&prev, &next), vec![FeedChange::Snapshot { count: 2 }]);
    }

    #[test]
    fn offline_is_reported_on_escalation_only() {
        let prev = open().closed(4, false);
        let next = prev.clone().closed(5, true);
        let again = next.clone().closed(6, true);

        assert_eq!(diff(&prev, &next), vec![FeedChange::Offline { failures: 5 }]);
        assert!(diff(&next, &again).is_empty());
    }
}
