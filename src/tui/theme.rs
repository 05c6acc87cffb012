//! TUI theming support.
//!
//! The `Theme` struct defines the color palette for the interface. It is
//! constructed once at startup and passed into the renderer as a plain
//! value; nothing reads theme state globally.

use ratatui::style::Color;

/// A collection of colors used for TUI components.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Headers and borders.
    pub primary: Color,
    /// Highlights and key hints.
    pub secondary: Color,
    /// Deletions, errors, stale markers.
    pub danger: Color,
    /// Confirmations and status text.
    pub success: Color,
    /// Secondary text.
    pub dim: Color,
    /// Main text.
    pub normal: Color,
    /// Text on colored backgrounds.
    pub inverted_fg: Color,
}

impl Theme {
    /// High-contrast dark theme (default).
    #[must_use]
    pub fn dark() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Yellow,
            danger: Color::Red,
            success: Color::Green,
            dim: Color::DarkGray,
            normal: Color::White,
            inverted_fg: Color::Black,
        }
    }

    /// High-contrast light theme.
    #[must_use]
    pub fn light() -> Self {
        Self {
            primary: Color::Blue,
            secondary: Color::Magenta,
            danger: Color::Red,
            success: Color::Green,
            dim: Color::Gray,
            normal: Color::Black,
            inverted_fg: Color::White,
        }
    }

    /// Monochrome theme for `--no-color`.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            primary: Color::Reset,
            secondary: Color::Reset,
            danger: Color::Reset,
            success: Color::Reset,
            dim: Color::Reset,
            normal: Color::Reset,
            inverted_fg: Color::Reset,
        }
    }

    /// Detect the terminal theme, falling back to dark.
    #[must_use]
    pub fn auto() -> Self {
        if is_light_terminal() {
            Self::light()
        } else {
            Self::dark()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Heuristic light-background detection via COLORFGBG.
///
/// COLORFGBG is set by some terminals (rxvt, konsole) as "fg;bg" where a
/// bg index of 7 or above (except 8, dark gray) usually means light.
fn is_light_terminal() -> bool {
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u32>() {
                return bg_num >= 7 && bg_num != 8;
            }
        }
    }
    false
}
