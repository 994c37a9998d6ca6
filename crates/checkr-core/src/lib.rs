//! Reactive occupancy layer between `checkr-api` and UI consumers.
//!
//! - **[`StatusPoller`]**: Owns the poll loop. [`start()`](StatusPoller::start)
//!   spawns a cancellable task that fetches the occupancy endpoint on a fixed
//!   [`Schedule`] and publishes immutable [`DisplayState`] snapshots;
//!   [`stop()`](StatusPoller::stop) cancels it and waits for it to exit.
//!
//! - **[`StateStream`]**: Subscription handle vended by the poller. Exposes
//!   `current()` / `latest()` / `changed()` for reactive rendering.
//!
//! - **[`pick_color`]**: The status-to-color policy. Total, defaults to green.
//!
//! - **[`FailureHandler`]**: Receives every failed poll. Failures never
//!   touch the published state and never stop the loop.

pub mod color;
pub mod convert;
pub mod error;
pub mod failure;
pub mod model;
pub mod poller;
pub mod source;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use color::{PanelColor, pick_color};
pub use error::CoreError;
pub use failure::{FailureHandler, HandlerFn, LogFailures, handler_fn};
pub use model::{DisplayState, Identifier, Occupancy, Status};
pub use poller::{PollerConfig, Schedule, StatusPoller};
pub use source::OccupancySource;
pub use stream::StateStream;
