// ── Status poller ──
//
// Owns the poll loop: one spawned task per activation, fetching on a fixed
// schedule and publishing each successful result as a fresh snapshot.
// Requests never overlap; a tick waits for the previous fetch to finish.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use checkr_api::{OccupancyClient, TransportConfig};

use crate::error::CoreError;
use crate::failure::{FailureHandler, LogFailures};
use crate::model::DisplayState;
use crate::source::OccupancySource;
use crate::stream::StateStream;

// ── Configuration ────────────────────────────────────────────────

/// When the poll loop fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Time between polls. Must be non-zero.
    pub interval: Duration,
    /// Poll once right away instead of waiting a full interval first.
    pub immediate: bool,
}

impl Schedule {
    /// Poll every `interval`, first poll after one interval.
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            immediate: false,
        }
    }

    pub fn immediately(mut self) -> Self {
        self.immediate = true;
        self
    }
}

/// Everything needed to poll a real HTTP endpoint.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub endpoint: Url,
    pub schedule: Schedule,
    /// Request timeout; `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl PollerConfig {
    pub fn new(endpoint: Url, interval: Duration) -> Self {
        Self {
            endpoint,
            schedule: Schedule::every(interval),
            timeout: None,
        }
    }
}

// ── StatusPoller ─────────────────────────────────────────────────

/// Keeps a [`DisplayState`] fresh by polling an occupancy source.
///
/// Cheaply cloneable via `Arc<PollerInner>`. Dropping the last clone
/// cancels a running loop.
#[derive(Clone)]
pub struct StatusPoller {
    inner: Arc<PollerInner>,
}

struct PollerInner {
    state: Arc<watch::Sender<Arc<DisplayState>>>,
    failure: Arc<dyn FailureHandler>,
    running: Mutex<Option<Running>>,
}

struct Running {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl Default for StatusPoller {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusPoller {
    /// Create an idle poller that logs failed polls.
    pub fn new() -> Self {
        Self::with_failure_handler(LogFailures)
    }

    /// Create an idle poller reporting failed polls to `handler`.
    pub fn with_failure_handler(handler: impl FailureHandler) -> Self {
        let (state, _) = watch::channel(Arc::new(DisplayState::unloaded()));
        Self {
            inner: Arc::new(PollerInner {
                state: Arc::new(state),
                failure: Arc::new(handler),
                running: Mutex::new(None),
            }),
        }
    }

    /// Start polling an HTTP endpoint.
    pub async fn start(&self, config: PollerConfig) -> Result<(), CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = OccupancyClient::new(config.endpoint, &transport)?;
        info!(endpoint = %client.endpoint(), interval = ?config.schedule.interval, "starting status poller");
        self.start_with_source(client, config.schedule).await
    }

    /// Start polling an arbitrary source.
    pub async fn start_with_source<S: OccupancySource>(
        &self,
        source: S,
        schedule: Schedule,
    ) -> Result<(), CoreError> {
        if schedule.interval.is_zero() {
            return Err(CoreError::Config {
                message: "poll interval must be greater than zero".into(),
            });
        }

        let mut running = self.inner.running.lock().await;
        if running.is_some() {
            return Err(CoreError::AlreadyRunning);
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(poll_task(
            source,
            schedule,
            Arc::clone(&self.inner.state),
            Arc::clone(&self.inner.failure),
            cancel.clone(),
        ));
        *running = Some(Running { cancel, handle });
        Ok(())
    }

    /// Stop polling. Once this returns the state no longer changes.
    /// A no-op when the poller is idle.
    pub async fn stop(&self) {
        let Some(Running { cancel, handle }) = self.inner.running.lock().await.take() else {
            return;
        };
        cancel.cancel();
        if let Err(e) = handle.await {
            warn!(error = %e, "poll task ended abnormally");
        }
        info!("status poller stopped");
    }

    pub async fn is_running(&self) -> bool {
        self.inner.running.lock().await.is_some()
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<DisplayState> {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.inner.state.subscribe())
    }
}

impl Drop for PollerInner {
    fn drop(&mut self) {
        if let Some(running) = self.running.get_mut().take() {
            running.cancel.cancel();
        }
    }
}

// ── Poll loop ────────────────────────────────────────────────────

/// Fetch on every tick until cancelled. An in-flight fetch is abandoned on
/// cancellation and its result never published.
async fn poll_task<S: OccupancySource>(
    source: S,
    schedule: Schedule,
    state: Arc<watch::Sender<Arc<DisplayState>>>,
    failure: Arc<dyn FailureHandler>,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(schedule.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    if !schedule.immediate {
        interval.tick().await; // consume the immediate first tick
    }

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = source.fetch() => result,
        };

        if cancel.is_cancelled() {
            break;
        }

        match result.map_err(CoreError::from).and_then(DisplayState::try_from) {
            Ok(next) => {
                debug!(status = ?next.status, "display state updated");
                state.send_replace(Arc::new(next));
            }
            Err(e) => failure.on_failure(&e),
        }
    }

    debug!("poll task shut down");
}
