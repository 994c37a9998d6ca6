//! Terminal event reader running in a background tokio task.
//!
//! Merges crossterm key/resize events with tick and render intervals into a
//! single `mpsc` channel.

use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Events produced by the terminal event reader.
#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Terminal was resized to (cols, rows).
    Resize(u16, u16),
    Tick,
    Render,
}

/// Reads terminal events in a background task and sends them over a channel.
pub struct EventReader {
    rx: mpsc::UnboundedReceiver<Event>,
    cancel: CancellationToken,
}

impl EventReader {
    /// Spawn the background reader emitting `Tick` every `tick_rate` and
    /// `Render` every `render_rate`.
    pub fn new(tick_rate: Duration, render_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tokio::spawn(read_events(tx, tick_rate, render_rate, cancel.clone()));
        Self { rx, cancel }
    }

    /// Receive the next event. Returns `None` once the reader has stopped.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn read_events(
    tx: mpsc::UnboundedSender<Event>,
    tick_rate: Duration,
    render_rate: Duration,
    cancel: CancellationToken,
) {
    let mut terminal_events = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);
    let mut renders = tokio::time::interval(render_rate);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    renders.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticks.tick() => Event::Tick,
            _ = renders.tick() => Event::Render,
            Some(Ok(raw)) = terminal_events.next() => match raw {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
                CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                _ => continue,
            },
        };

        if tx.send(event).is_err() {
            break;
        }
    }
}
