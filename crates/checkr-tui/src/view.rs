//! Occupancy view: echoes the latest snapshot with a color-coded panel.
//!
//! Absent fields render as empty text after their label.

use std::fmt::Display;
use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use checkr_core::DisplayState;

use crate::action::Action;
use crate::component::Component;
use crate::theme;

const PANEL_WIDTH: u16 = 24;
const PANEL_HEIGHT: u16 = 5;

pub struct OccupancyView {
    state: Arc<DisplayState>,
}

/// Where each piece of the view lands inside its area.
pub(crate) struct ViewLayout {
    pub title: Rect,
    pub building: Rect,
    pub room: Rect,
    pub color_label: Rect,
    pub panel: Rect,
    pub current: Rect,
    pub max: Rect,
}

impl ViewLayout {
    pub(crate) fn new(area: Rect) -> Self {
        let [
            title,
            _,
            building,
            room,
            _,
            color_label,
            panel_row,
            _,
            current,
            max,
            _,
        ] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(PANEL_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        let [_, panel, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(PANEL_WIDTH),
            Constraint::Fill(1),
        ])
        .areas(panel_row);

        Self {
            title,
            building,
            room,
            color_label,
            panel,
            current,
            max,
        }
    }
}

fn labelled<T: Display>(label: &str, value: Option<T>) -> String {
    match value {
        Some(v) => format!("{label}: {v}"),
        None => format!("{label}: "),
    }
}

impl Default for OccupancyView {
    fn default() -> Self {
        Self::new()
    }
}

impl OccupancyView {
    pub fn new() -> Self {
        Self {
            state: Arc::new(DisplayState::unloaded()),
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Text lines in display order, keyed by the layout slot they fill.
    fn field_lines(&self) -> [String; 5] {
        let s = &self.state;
        [
            labelled("Building", s.building_number.as_ref()),
            labelled("Room number", s.room_number.as_ref()),
            "Color code:".to_owned(),
            labelled("Current Occupancy", s.current_capacity()),
            labelled("Max Occupancy", s.max_capacity()),
        ]
    }
}

impl Component for OccupancyView {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StateUpdated(snapshot) = action {
            self.state = Arc::clone(snapshot);
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = ViewLayout::new(area);

        frame.render_widget(
            Paragraph::new(Line::styled("Capacity Checkr", theme::title_style()))
                .alignment(Alignment::Center),
            layout.title,
        );

        let [building, room, color_label, current, max] = self.field_lines();
        for (text, slot) in [
            (building, layout.building),
            (room, layout.room),
            (color_label, layout.color_label),
            (current, layout.current),
            (max, layout.max),
        ] {
            frame.render_widget(
                Paragraph::new(Line::styled(text, theme::field_style()))
                    .alignment(Alignment::Center),
                slot,
            );
        }

        let panel = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default())
            .style(Style::default().bg(theme::panel_color(self.state.color())));
        frame.render_widget(panel, layout.panel);
    }

    fn id(&self) -> &str {
        "occupancy"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use checkr_core::{Identifier, Occupancy, Status};
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer, style::Color};

    use super::*;

    const WIDTH: u16 = 40;
    const HEIGHT: u16 = 20;

    fn draw(view: &OccupancyView) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(WIDTH, HEIGHT)).unwrap();
        terminal.draw(|f| view.render(f, f.area())).unwrap();
        terminal.backend().buffer().clone()
    }

    fn text_rows(buffer: &Buffer) -> Vec<String> {
        buffer
            .content()
            .chunks(usize::from(WIDTH))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .map(|row| row.trim().to_owned())
            .collect()
    }

    fn panel_center_bg(buffer: &Buffer) -> Color {
        let panel = ViewLayout::new(Rect::new(0, 0, WIDTH, HEIGHT)).panel;
        buffer[(panel.x + panel.width / 2, panel.y + panel.height / 2)].bg
    }

    fn loaded(status: &str) -> Arc<DisplayState> {
        Arc::new(DisplayState {
            status: Some(Status::from(status)),
            room_number: Some(Identifier::from(101_u64)),
            building_number: Some(Identifier::from(2_u64)),
            occupancy: Some(Occupancy {
                current: 10,
                max: 50,
            }),
        })
    }

    fn view_with(state: Arc<DisplayState>) -> OccupancyView {
        let mut view = OccupancyView::new();
        view.update(&Action::StateUpdated(state)).unwrap();
        view
    }

    #[test]
    fn unloaded_view_shows_empty_fields_on_green() {
        let buffer = draw(&OccupancyView::new());
        let rows = text_rows(&buffer);

        assert_eq!(rows[0], "Capacity Checkr");
        assert_eq!(rows[2], "Building:");
        assert_eq!(rows[3], "Room number:");
        assert_eq!(rows[5], "Color code:");
        assert_eq!(rows[12], "Current Occupancy:");
        assert_eq!(rows[13], "Max Occupancy:");
        assert_eq!(panel_center_bg(&buffer), Color::Rgb(0x5A, 0xF5, 0x42));
    }

    #[test]
    fn loaded_view_echoes_fields() {
        let buffer = draw(&view_with(loaded("green")));
        let rows = text_rows(&buffer);

        assert_eq!(rows[2], "Building: 2");
        assert_eq!(rows[3], "Room number: 101");
        assert_eq!(rows[12], "Current Occupancy: 10");
        assert_eq!(rows[13], "Max Occupancy: 50");
        assert_eq!(panel_center_bg(&buffer), Color::Rgb(0x5A, 0xF5, 0x42));
    }

    #[test]
    fn red_status_paints_red_panel() {
        let buffer = draw(&view_with(loaded("red")));
        assert_eq!(panel_center_bg(&buffer), Color::Rgb(0xFF, 0x26, 0x05));
    }

    #[test]
    fn yellow_status_paints_yellow_panel() {
        let buffer = draw(&view_with(loaded("yellow")));
        assert_eq!(panel_center_bg(&buffer), Color::Rgb(0xFF, 0xF2, 0x3D));
    }

    #[test]
    fn unknown_status_falls_back_to_green() {
        let mut view = view_with(loaded("red"));
        view.update(&Action::StateUpdated(loaded("purple"))).unwrap();
        let buffer = draw(&view);
        assert_eq!(panel_center_bg(&buffer), Color::Rgb(0x5A, 0xF5, 0x42));
    }

    #[test]
    fn text_identifiers_render_verbatim() {
        let state = Arc::new(DisplayState {
            room_number: Some(Identifier::from("GOL-1400")),
            building_number: Some(Identifier::from("70")),
            ..DisplayState::unloaded()
        });
        let rows = text_rows(&draw(&view_with(state)));
        assert_eq!(rows[2], "Building: 70");
        assert_eq!(rows[3], "Room number: GOL-1400");
    }

    #[test]
    fn other_actions_leave_state_alone() {
        let mut view = view_with(loaded("red"));
        view.update(&Action::Tick).unwrap();
        view.update(&Action::Resize(80, 24)).unwrap();
        assert_eq!(*view.state(), *loaded("red"));
    }
}
