//! Reconnecting realtime channel.
//!
//! [`RealtimeChannel::spawn`] moves a [`FeedStream`] into a background task
//! that owns the feed state. The task connects, applies inbound messages in
//! arrival order, sends heartbeats while open, and after any disconnect
//! waits out one backoff delay before the next connect attempt. Readers see
//! immutable snapshots through a `watch` channel.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::backoff::Backoff;
use super::config::ChannelConfig;
use super::state::{ConnectionStatus, OpportunityFeedState};
use crate::port::outbound::{ControlFrame, FeedEvent, FeedMessage, FeedPayload, FeedStream};

/// Requests from handles to the channel task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedCommand {
    Refresh,
}

/// Why an open session ended.
enum SessionEnd {
    Disconnected(String),
    Shutdown,
}

/// Background task driving one realtime feed.
pub struct RealtimeChannel<S: FeedStream> {
    stream: S,
    config: ChannelConfig,
    backoff: Backoff,
    state_tx: watch::Sender<OpportunityFeedState>,
    commands: mpsc::Receiver<FeedCommand>,
    shutdown: mpsc::Receiver<()>,
}

impl<S: FeedStream + 'static> RealtimeChannel<S> {
    /// Start the channel task and return its handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(stream: S, config: ChannelConfig) -> FeedHandle {
        let (state_tx, state_rx) = watch::channel(OpportunityFeedState::default());
        let (command_tx, commands) = mpsc::channel(1);
        let (shutdown_tx, shutdown) = mpsc::channel::<()>(1);

        let channel = Self {
            stream,
            backoff: Backoff::new(config.reconnection.clone()),
            config,
            state_tx,
            commands,
            shutdown,
        };
        let task = tokio::spawn(channel.run());

        FeedHandle {
            state_rx,
            command_tx,
            shutdown_tx,
            task,
        }
    }

    async fn run(mut self) {
        let transport = self.stream.transport_name();
        info!(transport, "Feed channel started");

        loop {
            self.publish(OpportunityFeedState::connecting);

            let connected = tokio::select! {
                biased;
                _ = self.shutdown.recv() => break,
                result = self.stream.connect() => result,
            };

            match connected {
                Ok(()) => {
                    self.backoff.reset();
                    // Refresh requests from an earlier connection are void.
                    while self.commands.try_recv().is_ok() {}
                    self.publish(OpportunityFeedState::opened);
                    info!(transport, "Feed connected");

                    match self.session().await {
                        SessionEnd::Shutdown => break,
                        SessionEnd::Disconnected(reason) => {
                            warn!(transport, reason = %reason, "Feed disconnected");
                        }
                    }
                }
                Err(err) => warn!(transport, error = %err, "Feed connect failed"),
            }

            let offline = self.backoff.record_failure();
            let failures = self.backoff.consecutive_failures();
            self.publish(|state| state.closed(failures, offline));

            if offline {
                error!(failures, "Feed offline, still retrying");
            }

            let delay = self.backoff.next_delay();
            info!(
                delay_ms = delay.as_millis() as u64,
                attempt = failures + 1,
                "Reconnecting after delay"
            );
            if self.wait(delay).await {
                break;
            }
        }

        self.stream.close().await;
        self.state_tx
            .send_modify(|state| state.status = ConnectionStatus::Closed);
        info!(transport, "Feed channel stopped");
    }

    /// Drive one open connection until it drops or shutdown is requested.
    async fn session(&mut self) -> SessionEnd {
        let period = self.config.heartbeat_interval();
        let mut heartbeat = interval_at(Instant::now() + period, period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.recv() => return SessionEnd::Shutdown,
                event = self.stream.next_event() => match event {
                    Some(FeedEvent::Message(message)) => self.handle_message(message),
                    Some(FeedEvent::Disconnected { reason }) => {
                        return SessionEnd::Disconnected(reason);
                    }
                    None => return SessionEnd::Disconnected("stream ended".into()),
                },
                _ = heartbeat.tick() => {
                    debug!("Sending heartbeat");
                    if let Err(err) = self.stream.send(ControlFrame::Ping).await {
                        return SessionEnd::Disconnected(err.to_string());
                    }
                }
                Some(command) = self.commands.recv() => match command {
                    FeedCommand::Refresh => {
                        debug!("Requesting snapshot refresh");
                        let sent = self.stream.send(ControlFrame::RefreshOpportunities).await;
                        if let Err(err) = sent {
                            return SessionEnd::Disconnected(err.to_string());
                        }
                    }
                },
            }
        }
    }

    /// Sleep out a reconnect delay. Returns `true` when shutdown was requested.
    async fn wait(&mut self, delay: Duration) -> bool {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.recv() => return true,
                () = &mut sleep => return false,
                Some(_) = self.commands.recv() => {
                    debug!("Refresh dropped while disconnected");
                }
            }
        }
    }

    fn handle_message(&mut self, message: FeedMessage) {
        match &message.payload {
            FeedPayload::Snapshot(items) => debug!(count = items.len(), "Feed snapshot"),
            FeedPayload::Push(opportunity) => {
                info!(
                    opportunity_id = %opportunity.id,
                    title = %opportunity.title,
                    "New opportunity"
                );
            }
            FeedPayload::Heartbeat => {}
            FeedPayload::Unknown(kind) => debug!(kind = %kind, "Ignoring unknown feed message"),
        }
        let max_items = self.config.max_items;
        self.publish(|state| state.apply(message).trimmed(max_items));
    }

    fn publish(&self, transition: impl FnOnce(OpportunityFeedState) -> OpportunityFeedState) {
        self.state_tx
            .send_modify(|state| *state = transition(std::mem::take(state)));
    }
}

/// Handle to a running [`RealtimeChannel`].
///
/// Dropping the handle stops the channel as if [`FeedHandle::shutdown`]
/// had been called, without waiting for the task.
pub struct FeedHandle {
    state_rx: watch::Receiver<OpportunityFeedState>,
    command_tx: mpsc::Sender<FeedCommand>,
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl FeedHandle {
    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> OpportunityFeedState {
        self.state_rx.borrow().clone()
    }

    /// Receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<OpportunityFeedState> {
        self.state_rx.clone()
    }

    /// Ask the server for a fresh snapshot.
    ///
    /// Only honored while the channel is open. Returns `false` when the
    /// request was dropped; it is never queued for a later connection.
    pub fn refresh(&self) -> bool {
        if !self.state_rx.borrow().is_open() {
            debug!("Refresh ignored, feed not open");
            return false;
        }
        self.command_tx.try_send(FeedCommand::Refresh).is_ok()
    }

    /// Wait until the state satisfies `predicate`.
    ///
    /// Returns `None` if the channel stopped first.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&OpportunityFeedState) -> bool,
    ) -> Option<OpportunityFeedState> {
        let mut rx = self.state_rx.clone();
        let state = rx.wait_for(predicate).await.ok().map(|state| (*state).clone());
        state
    }

    /// Stop the channel: cancel any pending reconnect, close the transport,
    /// and wait for the task to finish.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(err) = self.task.await {
            warn!(error = %err, "Feed channel task failed");
        }
    }
}
