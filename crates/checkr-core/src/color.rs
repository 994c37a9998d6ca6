//! Status-to-color policy.

use std::fmt;

use crate::model::Status;

/// One of the three panel colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelColor {
    Red,
    Yellow,
    Green,
}

impl PanelColor {
    /// `#RRGGBB` form.
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Red => "#FF2605",
            Self::Yellow => "#FFF23D",
            Self::Green => "#5AF542",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Red => (0xFF, 0x26, 0x05),
            Self::Yellow => (0xFF, 0xF2, 0x3D),
            Self::Green => (0x5A, 0xF5, 0x42),
        }
    }
}

impl fmt::Display for PanelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

/// Map a status to its panel color.
///
/// Only `Red` and `Yellow` change the color; a missing, green, or
/// unrecognised status is green.
pub fn pick_color(status: Option<&Status>) -> PanelColor {
    match status {
        Some(Status::Red) => PanelColor::Red,
        Some(Status::Yellow) => PanelColor::Yellow,
        _ => PanelColor::Green,
    }
}
