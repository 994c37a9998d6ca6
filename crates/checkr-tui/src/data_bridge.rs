//! Data bridge: forwards poller snapshots to the TUI as actions.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use checkr_core::StateStream;

use crate::action::Action;

/// Send the current snapshot, then every new one, until cancelled or the
/// poller goes away.
pub async fn spawn_data_bridge(
    mut stream: StateStream,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let _ = action_tx.send(Action::StateUpdated(Arc::clone(stream.current())));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            snapshot = stream.changed() => {
                let Some(snapshot) = snapshot else { break };
                debug!("dispatching StateUpdated");
                if action_tx.send(Action::StateUpdated(snapshot)).is_err() {
                    break;
                }
            }
        }
    }

    debug!("data bridge shut down");
}

/// Wait for the bridge task, logging a panic or abort instead of dropping it.
pub async fn join_bridge(handle: JoinHandle<()>) {
    if let Err(e) = handle.await {
        warn!(error = %e, "data bridge ended abnormally");
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use checkr_core::{StatusPoller, handler_fn};

    use super::*;

    #[tokio::test]
    async fn sends_initial_snapshot_then_stops_on_cancel() {
        let poller = StatusPoller::with_failure_handler(handler_fn(|_| {}));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        let bridge = tokio::spawn(spawn_data_bridge(poller.subscribe(), tx, cancel.clone()));

        match rx.recv().await.unwrap() {
            Action::StateUpdated(state) => assert!(state.is_unloaded()),
            other => panic!("expected StateUpdated, got {other:?}"),
        }

        cancel.cancel();
        bridge.await.unwrap();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn exits_when_poller_is_dropped() {
        let poller = StatusPoller::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let stream = poller.subscribe();
        drop(poller);

        spawn_data_bridge(stream, tx, CancellationToken::new()).await;

        assert!(matches!(rx.recv().await, Some(Action::StateUpdated(_))));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn join_absorbs_a_panicked_bridge() {
        let handle = tokio::spawn(async {
            panic!("bridge blew up");
        });
        join_bridge(handle).await;

        let handle = tokio::spawn(async {});
        join_bridge(handle).await;
    }
}
