//! Application core: event loop and action dispatch.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use checkr_core::StatusPoller;

use crate::action::Action;
use crate::component::Component;
use crate::data_bridge::{join_bridge, spawn_data_bridge};
use crate::event::{Event, EventReader};
use crate::theme;
use crate::tui::Tui;
use crate::view::OccupancyView;

/// Top-level application state and event loop.
pub struct App {
    view: OccupancyView,
    poller: StatusPoller,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(poller: StatusPoller) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            view: OccupancyView::new(),
            poller,
            running: true,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.view.init(self.action_tx.clone())?;
        debug!(component = self.view.id(), "component mounted");

        let cancel = CancellationToken::new();
        let bridge = tokio::spawn(spawn_data_bridge(
            self.poller.subscribe(),
            self.action_tx.clone(),
            cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if matches!(action, Action::Render | Action::Resize(..)) {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        cancel.cancel();
        events.stop();
        join_bridge(bridge).await;
        drop(tui);
        info!("TUI event loop stopped");
        Ok(())
    }

    /// Global keys first, then the view.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q') | KeyCode::Esc, _)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Ok(Some(Action::Quit)),
            _ => self.view.handle_key_event(key),
        }
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::StateUpdated(_) => {
                if let Some(follow_up) = self.view.update(action)? {
                    self.action_tx.send(follow_up)?;
                }
                debug!(status = ?self.view.state().status, "view state replaced");
            }
            Action::Tick | Action::Render | Action::Resize(..) => {}
        }
        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let [body, footer] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        self.view.render(frame, body);

        let hints = Line::from(vec![
            Span::styled("q", theme::key_hint_key()),
            Span::styled(" quit", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints).alignment(Alignment::Right), footer);
    }
}
