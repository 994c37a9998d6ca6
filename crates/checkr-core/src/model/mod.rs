// ── Domain model ──
//
// The display snapshot and the small value types it is built from.

mod display_state;
mod status;

pub use display_state::{DisplayState, Identifier, Occupancy};
pub use status::Status;
