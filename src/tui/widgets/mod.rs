//! Reusable TUI widgets.

mod tree;

pub use tree::{flatten_tree, NodeLine, Tree, TreeState};

use crate::tui::theme::colors;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// Minimum terminal width for a usable layout.
pub const MIN_WIDTH: u16 = 60;
/// Minimum terminal height for a usable layout.
pub const MIN_HEIGHT: u16 = 16;

/// Check whether the terminal is large enough to render.
pub fn check_terminal_size(width: u16, height: u16) -> Result<(), (u16, u16)> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        Err((width, height))
    } else {
        Ok(())
    }
}

/// Render a warning when the terminal is too small.
pub fn render_size_warning(frame: &mut Frame, area: Rect, min_width: u16, min_height: u16) {
    let scheme = colors();
    let text = format!(
        "Terminal too small\nNeed at least {min_width}x{min_height}, have {}x{}",
        area.width, area.height
    );
    let warning = Paragraph::new(text)
        .style(Style::default().fg(scheme.warning))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(warning, area);
}
