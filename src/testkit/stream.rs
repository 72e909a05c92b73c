//! Mock [`FeedStream`] implementations for testing.
//!
//! - [`ScriptedFeedStream`] - Pre-loaded connect results and a fixed event
//!   queue. Best for: reconnection timing, escalation, reconciliation.
//!
//! - [`ChannelFeedStream`] - Channel-backed stream with external control
//!   handle. Best for: tests needing on-demand event delivery.
//!
//! Both record what the channel did to them in a shared [`FeedProbe`].

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::port::outbound::{ControlFrame, FeedEvent, FeedStream};

// ---------------------------------------------------------------------------
// FeedProbe
// ---------------------------------------------------------------------------

/// Shared record of the calls made on a mock stream.
#[derive(Debug, Default)]
pub struct FeedProbe {
    connect_count: AtomicU32,
    connect_times: Mutex<Vec<Instant>>,
    sent: Mutex<Vec<ControlFrame>>,
    closed: AtomicBool,
}

impl FeedProbe {
    fn record_connect(&self) {
        self.connect_count.fetch_add(1, Ordering::SeqCst);
        self.connect_times.lock().push(Instant::now());
    }

    /// How many times `connect()` was called.
    pub fn connect_count(&self) -> u32 {
        self.connect_count.load(Ordering::SeqCst)
    }

    /// When each `connect()` call happened, in call order.
    pub fn connect_times(&self) -> Vec<Instant> {
        self.connect_times.lock().clone()
    }

    /// Every control frame sent so far.
    pub fn sent(&self) -> Vec<ControlFrame> {
        self.sent.lock().clone()
    }

    /// Number of frames of one kind sent so far.
    pub fn sent_count(&self, frame: ControlFrame) -> usize {
        self.sent.lock().iter().filter(|f| **f == frame).count()
    }

    /// Whether `close()` was called.
    pub fn closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// ScriptedFeedStream
// ---------------------------------------------------------------------------

/// A mock stream with scripted connect results and a fixed event queue.
///
/// Each `connect()` pops the next result; once exhausted it succeeds, or
/// fails for a stream built with [`ScriptedFeedStream::unreachable`].
/// `next_event()` pops the queue: `Some(None)` ends the stream, an empty
/// queue blocks forever (an open but quiet connection).
pub struct ScriptedFeedStream {
    connect_results: VecDeque<Result<()>>,
    connect_default_ok: bool,
    events: VecDeque<Option<FeedEvent>>,
    probe: Arc<FeedProbe>,
}

impl ScriptedFeedStream {
    pub fn new() -> Self {
        Self {
            connect_results: VecDeque::new(),
            connect_default_ok: true,
            events: VecDeque::new(),
            probe: Arc::new(FeedProbe::default()),
        }
    }

    /// A stream whose every connect attempt fails.
    pub fn unreachable() -> Self {
        Self {
            connect_default_ok: false,
            ..Self::new()
        }
    }

    pub fn with_connect_results(mut self, results: Vec<Result<()>>) -> Self {
        self.connect_results = results.into();
        self
    }

    /// Fail the next `n` connect attempts.
    pub fn failing_connects(self, n: usize) -> Self {
        let results = (0..n).map(|_| Err(refused())).collect();
        self.with_connect_results(results)
    }

    pub fn with_events(mut self, events: Vec<Option<FeedEvent>>) -> Self {
        self.events = events.into();
        self
    }

    /// Shared call record; stays valid after the stream moves into a channel.
    pub fn probe(&self) -> Arc<FeedProbe> {
        self.probe.clone()
    }
}

impl Default for ScriptedFeedStream {
    fn default() -> Self {
        Self::new()
    }
}

fn refused() -> Error {
    Error::Transport("connection refused".into())
}

#[async_trait]
impl FeedStream for ScriptedFeedStream {
    async fn connect(&mut self) -> Result<()> {
        self.probe.record_connect();
        match self.connect_results.pop_front() {
            Some(result) => result,
            None if self.connect_default_ok => Ok(()),
            None => Err(refused()),
        }
    }

    async fn send(&mut self, frame: ControlFrame) -> Result<()> {
        self.probe.sent.lock().push(frame);
        Ok(())
    }

    async fn next_event(&mut self) -> Option<FeedEvent> {
        match self.events.pop_front() {
            Some(event) => event,
            // Block forever, the connection stays open but silent.
            None => std::future::pending().await,
        }
    }

    async fn close(&mut self) {
        self.probe.closed.store(true, Ordering::SeqCst);
    }

    fn transport_name(&self) -> &'static str {
        "mock"
    }
}

// ---------------------------------------------------------------------------
// ChannelFeedStream
// ---------------------------------------------------------------------------

/// A mock stream controlled externally via a [`ChannelFeedHandle`].
pub struct ChannelFeedStream {
    event_rx: mpsc::Receiver<Option<FeedEvent>>,
    probe: Arc<FeedProbe>,
}

/// Control handle for a [`ChannelFeedStream`].
pub struct ChannelFeedHandle {
    event_tx: mpsc::Sender<Option<FeedEvent>>,
    probe: Arc<FeedProbe>,
}

impl ChannelFeedHandle {
    /// Deliver an event to the stream.
    pub async fn send(&self, event: FeedEvent) {
        let _ = self.event_tx.send(Some(event)).await;
    }

    /// Signal end-of-stream (causes `next_event` to return `None`).
    pub async fn end(&self) {
        let _ = self.event_tx.send(None).await;
    }

    pub fn probe(&self) -> Arc<FeedProbe> {
        self.probe.clone()
    }
}

/// Create a [`ChannelFeedStream`] and its control [`ChannelFeedHandle`].
pub fn channel_feed_stream(buffer: usize) -> (ChannelFeedStream, ChannelFeedHandle) {
    let (tx, rx) = mpsc::channel(buffer);
    let probe = Arc::new(FeedProbe::default());
    (
        ChannelFeedStream {
            event_rx: rx,
            probe: probe.clone(),
        },
        ChannelFeedHandle {
            event_tx: tx,
            probe,
        },
    )
}

#[async_trait]
impl FeedStream for ChannelFeedStream {
    async fn connect(&mut self) -> Result<()> {
        self.probe.record_connect();
        Ok(())
    }

    async fn send(&mut self, frame: ControlFrame) -> Result<()> {
        self.probe.sent.lock().push(frame);
        Ok(())
    }

    async fn next_event(&mut self) -> Option<FeedEvent> {
        match self.event_rx.recv().await {
            Some(Some(event)) => Some(event),
            Some(None) | None => None,
        }
    }

    async fn close(&mut self) {
        self.probe.closed.store(true, Ordering::SeqCst);
    }

    fn transport_name(&self) -> &'static str {
        "mock"
    }
}
