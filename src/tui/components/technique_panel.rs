// Technique selector panel
//
// A list with an explicit empty entry at the top, then the catalog in server
// order. Catalog failure shows a degraded placeholder entry - the rest of
// the UI stays alive. The technique description renders below the list when
// one is selected.

use crate::session::CatalogState;
use crate::tui::app::{App, Focus};
use crate::util::fit_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Label for the explicit empty selection, matching the playground UI
const EMPTY_ENTRY: &str = "-- Select a Technique --";

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(6)])
        .split(area);

    render_list(f, chunks[0], app);
    render_description(f, chunks[1], app);
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Techniques;
    let theme = &app.theme;
    let width = area.width.saturating_sub(4) as usize;

    let mut items: Vec<ListItem> = Vec::new();
    match app.session.catalog {
        CatalogState::Loading => {
            items.push(
                ListItem::new("Loading techniques...").style(Style::default().fg(theme.muted)),
            );
        }
        CatalogState::Unavailable => {
            items.push(
                ListItem::new("Error loading techniques").style(Style::default().fg(theme.error)),
            );
        }
        CatalogState::Ready => {
            for (i, name) in std::iter::once(EMPTY_ENTRY.to_string())
                .chain(app.session.techniques.iter().cloned())
                .enumerate()
            {
                let is_cursor = focused && i == app.technique_cursor;
                let is_active = i > 0 && app.session.selected == Some(i - 1);
                let prefix = if is_active { " ● " } else { "   " };
                let style = if is_cursor {
                    Style::default()
                        .bg(theme.selection_bg)
                        .fg(theme.selection_fg)
                        .add_modifier(Modifier::BOLD)
                } else if is_active {
                    Style::default().fg(theme.success)
                } else if i == 0 {
                    Style::default().fg(theme.muted)
                } else {
                    Style::default().fg(theme.fg)
                };
                items.push(
                    ListItem::new(fit_width(&format!("{}{}", prefix, name), width)).style(style),
                );
            }
        }
    }

    let border_color = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Techniques "),
    );
    f.render_widget(list, area);
}

fn render_description(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = app
        .session
        .description
        .clone()
        .unwrap_or_else(|| "Select a technique to see its description.".to_string());
    let style = if app.session.description.is_some() {
        Style::default().fg(theme.fg)
    } else {
        Style::default().fg(theme.muted)
    };
    let info = Paragraph::new(text).style(style).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" About "),
    );
    f.render_widget(info, area);
}
