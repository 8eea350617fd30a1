//! Event handling for the `ViewApp`.

use super::app::{FilterField, ViewApp};
use crate::config::TuiPreferences;
use crate::tui::theme::toggle_theme;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Terminal events.
#[allow(dead_code)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Event handler.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    _tx: mpsc::Sender<Event>,
}

impl Default for EventHandler {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(100);

        let event_tx = tx.clone();
        thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) => {
                            if event_tx.send(Event::Key(key)).is_err() {
                                break;
                            }
                        }
                        Ok(CrosstermEvent::Resize(w, h)) => {
                            if event_tx.send(Event::Resize(w, h)).is_err() {
                                break;
                            }
                        }
                        _ => {}
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, _tx: tx }
    }
}

impl EventHandler {
    pub fn next(&self) -> io::Result<Event> {
        self.rx.recv().map_err(io::Error::other)
    }
}

/// Handle key events for `ViewApp`.
pub fn handle_key_event(app: &mut ViewApp, key: KeyEvent) {
    app.clear_status_message();

    // Ctrl+C always quits.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Filter input overlay captures everything while open.
    if app.filter_input.is_some() {
        match key.code {
            KeyCode::Esc => app.cancel_filter_input(),
            KeyCode::Enter => app.commit_filter_input(),
            KeyCode::Backspace => {
                app.input_buffer.pop();
            }
            KeyCode::Char(c) => app.input_buffer.push(c),
            _ => {}
        }
        return;
    }

    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q' | '?') => app.show_help = false,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // Navigation
        KeyCode::Down | KeyCode::Char('j') => app.tree_state.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.tree_state.select_prev(),
        KeyCode::Char('g') => app.tree_state.select_first(),
        KeyCode::Char('G') => app.tree_state.select_last(),

        // Expansion
        KeyCode::Char(' ') => {
            if let Some(name) = app.cursor_node() {
                app.tree_state.toggle_expand(&name);
            }
        }
        KeyCode::Char('e') => app.tree_state.expand_all(app.explorer.tree()),
        KeyCode::Char('w') => app.tree_state.collapse_all(),

        // Selection
        KeyCode::Enter => app.select_under_cursor(),
        KeyCode::Esc => app.unselect(),

        // Filters
        KeyCode::Char('/') => app.start_filter_input(FilterField::Name),
        KeyCode::Char('t') => app.start_filter_input(FilterField::Technos),
        KeyCode::Char('h') => app.start_filter_input(FilterField::Hosts),
        KeyCode::Char('c') => app.clear_filters(),

        // Payload + theme
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('T') => {
            let theme = toggle_theme();
            let prefs = TuiPreferences {
                theme: theme.name().to_string(),
            };
            if prefs.save().is_err() {
                app.set_status_message("Could not persist theme preference");
            }
        }
        _ => {}
    }
}
