//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Color for the statement text.
    pub sql_text: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Border style for the focused table.
    pub focused_border: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            border: Color::Gray,
            sql_text: Color::White,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            focused_border: Style::default().fg(Color::Cyan),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            border: Color::DarkGray,
            sql_text: Color::Black,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            focused_border: Style::default().fg(Color::Blue),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Border style for a table, depending on whether it has focus.
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            Style::default().fg(self.border)
        }
    }
}

/// Convert a `#rrggbb` color token to a terminal color.
///
/// Malformed tokens fall back to gray.
pub fn token_color(token: &str) -> Color {
    let parse = |hex: &str| -> Option<Color> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    };

    token.strip_prefix('#').and_then(parse).unwrap_or(Color::Gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_color() {
        assert_eq!(token_color("#04ce04"), Color::Rgb(0x04, 0xce, 0x04));
        assert_eq!(token_color("#1F77B4"), Color::Rgb(0x1f, 0x77, 0xb4));
    }

    #[test]
    fn test_token_color_fallback() {
        assert_eq!(token_color("04ce04"), Color::Gray);
        assert_eq!(token_color("#04ce"), Color::Gray);
        assert_eq!(token_color("#zzzzzz"), Color::Gray);
        assert_eq!(token_color(""), Color::Gray);
    }

    #[test]
    fn test_border_style() {
        let theme = Theme::dark();
        assert_eq!(theme.border_style(true), theme.focused_border);
        assert_eq!(theme.border_style(false), Style::default().fg(Color::Gray));
    }
}
