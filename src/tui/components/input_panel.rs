// Operation tabs and input text area
//
// The three operation modes render as mutually exclusive tabs; the input
// area shows a per-mode placeholder until the user types.

use crate::schema::Operation;
use crate::tui::app::{App, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    render_tabs(f, chunks[0], app);
    render_text_area(f, chunks[1], app);
}

fn render_tabs(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let titles: Vec<String> = Operation::all()
        .iter()
        .enumerate()
        .map(|(i, op)| format!("F{} {}", i + 1, op.title()))
        .collect();
    let selected = Operation::all()
        .iter()
        .position(|&op| op == app.session.operation)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme.muted))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    f.render_widget(tabs, area);
}

fn render_text_area(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Input;

    let (text, style) = if app.input.is_empty() {
        (
            app.session.operation.input_placeholder().to_string(),
            Style::default().fg(theme.muted),
        )
    } else if focused {
        // Block cursor at the end of the buffer
        (format!("{}█", app.input), Style::default().fg(theme.fg))
    } else {
        (app.input.clone(), Style::default().fg(theme.fg))
    };

    let border_color = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    let input = Paragraph::new(text).style(style).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Input "),
    );
    f.render_widget(input, area);
}
