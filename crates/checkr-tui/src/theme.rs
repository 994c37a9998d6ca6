//! Palette and semantic styles for the dashboard.

use ratatui::style::{Color, Modifier, Style};

use checkr_core::PanelColor;

pub const HEADING: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const TEXT: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4

/// Terminal color for a status panel.
pub fn panel_color(color: PanelColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// Main "Capacity Checkr" heading.
pub fn title_style() -> Style {
    Style::default().fg(HEADING).add_modifier(Modifier::BOLD)
}

/// Labelled field lines.
pub fn field_style() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint text (e.g., "q quit").
pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(HEADING).add_modifier(Modifier::BOLD)
}
