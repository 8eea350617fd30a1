//! Centralized theme and color scheme for the TUI.
//!
//! This module provides consistent styling across all TUI views.

use ratatui::prelude::*;
use std::sync::RwLock;

/// Color scheme for the TUI application.
/// Provides semantic colors for different UI elements.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    // UI element colors
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,

    // Highlight states
    /// Nodes faded out while a selection is active
    pub dimmed: Color,
    /// Nodes missed by the current filters
    pub not_found: Color,
    /// The active node marker
    pub active: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::DarkGray,

            dimmed: Color::DarkGray,
            not_found: Color::DarkGray,
            active: Color::Yellow,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    /// Light theme for bright terminals
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Blue,
            accent: Color::Magenta,
            muted: Color::Gray,
            border: Color::Gray,
            border_focused: Color::Blue,
            text: Color::Black,
            text_muted: Color::DarkGray,
            selection: Color::LightBlue,

            dimmed: Color::Gray,
            not_found: Color::Gray,
            active: Color::Magenta,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
        }
    }
}

/// Available themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// Resolve a theme by name, defaulting to dark.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Canonical name of the theme.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    const fn scheme(self) -> ColorScheme {
        match self {
            Self::Dark => ColorScheme::dark(),
            Self::Light => ColorScheme::light(),
        }
    }
}

static CURRENT_THEME: RwLock<Theme> = RwLock::new(Theme::Dark);

/// Get the active color scheme.
#[must_use]
pub fn colors() -> ColorScheme {
    CURRENT_THEME
        .read()
        .map(|t| t.scheme())
        .unwrap_or_else(|_| ColorScheme::dark())
}

/// Set the active theme.
pub fn set_theme(theme: Theme) {
    if let Ok(mut current) = CURRENT_THEME.write() {
        *current = theme;
    }
}

/// Toggle between dark and light, returning the new theme.
pub fn toggle_theme() -> Theme {
    let next = match current_theme() {
        Theme::Dark => Theme::Light,
        Theme::Light => Theme::Dark,
    };
    set_theme(next);
    next
}

/// Get the active theme.
#[must_use]
pub fn current_theme() -> Theme {
    CURRENT_THEME.read().map(|t| *t).unwrap_or(Theme::Dark)
}

/// Map a highlight opacity onto a text style.
///
/// The engine speaks in opacities (1.0 full, 0.1 dimmed); a terminal has
/// no alpha channel, so anything below full renders in the dimmed color.
#[must_use]
pub fn opacity_style(opacity: f32) -> Style {
    let scheme = colors();
    if opacity < 1.0 {
        Style::default().fg(scheme.dimmed).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(scheme.text)
    }
}

/// Stroke color for a node's satisfaction value: 1.0 renders steel blue,
/// 0.0 renders red, linearly interpolated between.
#[must_use]
pub fn satisfaction_color(satisfaction: f64) -> Color {
    let t = satisfaction.clamp(0.0, 1.0);
    let lerp = |a: f64, b: f64| (a + (b - a) * t) as u8;
    // red (246,102,102) at 0 .. steel blue (70,130,180) at 1
    Color::Rgb(lerp(246.0, 70.0), lerp(102.0, 130.0), lerp(102.0, 180.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        assert_eq!(Theme::from_name("light"), Theme::Light);
        assert_eq!(Theme::from_name("dark"), Theme::Dark);
        assert_eq!(Theme::from_name("anything"), Theme::Dark);
    }

    #[test]
    fn test_satisfaction_color_endpoints() {
        assert_eq!(satisfaction_color(1.0), Color::Rgb(70, 130, 180));
        assert_eq!(satisfaction_color(0.0), Color::Rgb(246, 102, 102));
        // Out-of-range values clamp.
        assert_eq!(satisfaction_color(2.0), Color::Rgb(70, 130, 180));
    }

    #[test]
    fn test_opacity_style_dim() {
        let dim = opacity_style(0.1);
        assert!(dim.add_modifier.contains(Modifier::DIM));
        let full = opacity_style(1.0);
        assert!(!full.add_modifier.contains(Modifier::DIM));
    }
}
