//! Interactive terminal UI using ratatui.
//!
//! The TUI is the presentation layer over the [`crate::Explorer`] engine:
//! it lays the tree out with box-drawing characters, maps highlight
//! opacities onto dimmed styles, applies the "not found" state to filter
//! misses, and turns key presses into `select`/filter calls. All engine
//! state transitions happen in the engine; this module only draws them.

mod app;
mod events;
pub mod theme;
mod ui;
pub mod widgets;

pub use app::{FilterField, ViewApp};
pub use events::Event;
pub use theme::{colors, current_theme, set_theme, toggle_theme, ColorScheme, Theme};
pub use ui::run_view_tui;
