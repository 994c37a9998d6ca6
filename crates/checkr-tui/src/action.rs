//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use checkr_core::DisplayState;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Periodic tick (4 Hz).
    Tick,
    /// Redraw the frame.
    Render,
    /// Terminal resized to (cols, rows).
    Resize(u16, u16),
    /// Leave the app.
    Quit,
    /// The poller published a new snapshot.
    StateUpdated(Arc<DisplayState>),
}
