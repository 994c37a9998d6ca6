// ── Display state subscription ──

use std::sync::Arc;

use tokio::sync::watch;

use crate::model::DisplayState;

/// A subscription to the poller's published display state.
///
/// Provides point-in-time snapshot access and change notification via
/// [`changed()`](Self::changed).
pub struct StateStream {
    current: Arc<DisplayState>,
    receiver: watch::Receiver<Arc<DisplayState>>,
}

impl StateStream {
    pub(crate) fn new(mut receiver: watch::Receiver<Arc<DisplayState>>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// The snapshot seen most recently by this subscription.
    pub fn current(&self) -> &Arc<DisplayState> {
        &self.current
    }

    /// The latest published snapshot (may be newer than `current()`).
    pub fn latest(&self) -> Arc<DisplayState> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next published snapshot.
    /// Returns `None` once the poller has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<DisplayState>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }
}
