use std::fmt;

use crate::color::{PanelColor, pick_color};
use crate::model::Status;

/// Opaque room or building identifier. Endpoints send either form.
#[derive(Debug, Clone, PartialEq)]
pub enum Identifier {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

/// Current and maximum occupancy. They always arrive together.
///
/// `current` may exceed `max`; nothing downstream assumes otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupancy {
    pub current: u64,
    pub max: u64,
}

/// Everything the occupancy view shows.
///
/// Published as `Arc<DisplayState>` and replaced wholesale on every
/// successful poll; never mutated in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub status: Option<Status>,
    pub room_number: Option<Identifier>,
    pub building_number: Option<Identifier>,
    pub occupancy: Option<Occupancy>,
}

impl DisplayState {
    /// The state before the first successful poll: every field empty.
    pub fn unloaded() -> Self {
        Self::default()
    }

    pub fn is_unloaded(&self) -> bool {
        *self == Self::unloaded()
    }

    pub fn current_capacity(&self) -> Option<u64> {
        self.occupancy.map(|o| o.current)
    }

    pub fn max_capacity(&self) -> Option<u64> {
        self.occupancy.map(|o| o.max)
    }

    /// Panel color for the current status.
    pub fn color(&self) -> PanelColor {
        pick_color(self.status.as_ref())
    }
}
