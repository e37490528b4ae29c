// Status bar component
//
// Keybind hints for the focused panel on the left, the dispatcher phase on
// the right.

use crate::session::Phase;
use crate::tui::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let hints = match app.focus {
        Focus::Techniques => "↑↓:select  Tab:focus  F1-F3:mode  ^Enter:run  ?:help  q:quit",
        Focus::Input => "type text  Enter:newline  ^Enter:run  ^L:clear  Tab:focus",
        Focus::Params => "↑↓:field  ←→/Space:option  type value  ^Enter:run  Tab:focus",
        Focus::Result => "↑↓:candidate  Enter:copy  y:copy all  k:copy key  Tab:focus",
    };

    let phase = match &app.session.phase {
        Phase::Idle => ("idle", app.theme.muted),
        Phase::Pending => ("working…", app.theme.accent),
        Phase::Succeeded(_) => ("ok", app.theme.success),
        Phase::Failed(_) => ("failed", app.theme.error),
    };

    let left = format!(" {}", hints);
    let right = format!("{} ", phase.0);
    let pad = (area.width as usize)
        .saturating_sub(left.chars().count() + right.chars().count());

    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(app.theme.status_bar)),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, Style::default().fg(phase.1)),
    ]);

    let status = Paragraph::new(line).block(Block::default().borders(Borders::TOP));
    f.render_widget(status, area);
}
