//! Toast notification component
//!
//! A non-blocking overlay in the bottom-right corner that auto-dismisses
//! after its duration (expiry is checked by the app tick).

use crate::tui::app::Toast;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the toast on top of all other content
pub fn render(f: &mut Frame, area: Rect, toast: &Toast, theme: &Theme) {
    // Padding (2 chars each side) plus borders
    let width = (toast.message.len() as u16 + 4).min(area.width.saturating_sub(4));
    let height = 3;

    // Bottom-right corner, offset 2 cells from the edge
    let x = area.right().saturating_sub(width + 2);
    let y = area.bottom().saturating_sub(height + 2);
    let toast_area = Rect::new(x, y, width, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.success));

    let text = Paragraph::new(toast.message.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.fg))
        .block(block);

    // Clear first so the toast appears on top
    f.render_widget(Clear, toast_area);
    f.render_widget(text, toast_area);
}
