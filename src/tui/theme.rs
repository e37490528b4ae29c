// Color theme for the TUI
//
// One compact palette covering every UI element. Kept as a struct rather
// than scattered constants so panels stay consistent and a light variant can
// be added without touching components.

use ratatui::style::Color;

/// UI color palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub title: Color,
    pub status_bar: Color,
    /// Accent for tabs, highlights, the key panel border
    pub accent: Color,
    pub success: Color,
    pub error: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            fg: Color::Gray,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            title: Color::Cyan,
            status_bar: Color::DarkGray,
            accent: Color::Magenta,
            success: Color::Green,
            error: Color::Red,
            selection_bg: Color::Indexed(60),
            selection_fg: Color::White,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
