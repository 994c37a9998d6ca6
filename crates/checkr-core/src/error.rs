// ── Core error types ──
//
// Everything that can make a poll fail, plus the few lifecycle errors the
// poller reports to its caller. Transport errors are wrapped, not flattened,
// so failure handlers can still inspect the HTTP status.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Poll failures ────────────────────────────────────────────────
    #[error("poll failed: {0}")]
    Api(#[from] checkr_api::Error),

    #[error("response carried only one of current and max capacity")]
    IncompleteOccupancy,

    // ── Lifecycle errors ─────────────────────────────────────────────
    #[error("status poller is already running")]
    AlreadyRunning,

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Returns `true` for errors produced by a single failed poll cycle.
    pub fn is_poll_failure(&self) -> bool {
        matches!(self, Self::Api(_) | Self::IncompleteOccupancy)
    }
}
