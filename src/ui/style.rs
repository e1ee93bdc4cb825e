//! Theming and color definitions.
//!
//! Every color the pager draws with lives in [`Theme`]. The defaults use the
//! terminal's ANSI palette; header, alternate-row and column colors can be
//! overridden by name from the command line or config file.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("unknown color: {0}")]
    UnknownColor(String),
}

/// Parse a color name (`red`, `lightblue`, `#ff8800`, `208`).
///
/// # Errors
/// Returns [`ThemeError::UnknownColor`] when ratatui does not recognize `name`.
pub fn parse_color(name: &str) -> Result<Color, ThemeError> {
    Color::from_str(name.trim()).map_err(|_| ThemeError::UnknownColor(name.to_string()))
}

/// Styles for each part of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub header: Style,
    pub alternate: Style,
    pub column: Style,
    pub search: Style,
    pub selection: Style,
    pub gutter: Style,
    pub status: Style,
    pub prompt: Style,
    /// Filler shown on rows past the end of the buffer.
    pub filler: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            header: Style::default().add_modifier(Modifier::BOLD),
            alternate: Style::default().bg(Color::Indexed(236)),
            column: Style::default().add_modifier(Modifier::REVERSED),
            search: Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
            selection: Style::default().bg(Color::Blue).fg(Color::White),
            gutter: Style::default().add_modifier(Modifier::DIM),
            status: Style::default().add_modifier(Modifier::REVERSED),
            prompt: Style::default(),
            filler: Style::default().fg(Color::DarkGray),
        }
    }
}

impl Theme {
    /// Build a theme with any of the configurable colors overridden.
    ///
    /// # Errors
    /// Returns [`ThemeError::UnknownColor`] for the first name that does not parse.
    pub fn with_colors(
        header: Option<&str>,
        alternate: Option<&str>,
        column: Option<&str>,
    ) -> Result<Self, ThemeError> {
        let mut theme = Self::default();
        if let Some(name) = header {
            theme.header = theme.header.fg(parse_color(name)?);
        }
        if let Some(name) = alternate {
            theme.alternate = Style::default().bg(parse_color(name)?);
        }
        if let Some(name) = column {
            theme.column = Style::default().bg(parse_color(name)?);
        }
        Ok(theme)
    }
}
