// Title bar component

use crate::config::VERSION;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            " cipherdeck ",
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("v{} ", VERSION), Style::default().fg(app.theme.muted)),
        Span::styled(
            "│ cipher playground",
            Style::default().fg(app.theme.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
