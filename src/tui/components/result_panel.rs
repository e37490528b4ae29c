// Result panel
//
// Renders the dispatcher phase: an idle placeholder, the pending spinner, a
// failure line, or a successful result view. Successful views branch on the
// body shape - plain text, or the selectable brute-force candidate list -
// plus the optional key panel and auxiliary facts.
//
// All content goes through plain text widgets, so result strings containing
// markup-significant characters display literally.

use crate::render::{candidate_label, failure_line, KeyPanel, ResultBody, ResultView};
use crate::session::Phase;
use crate::tui::app::{App, CopyTarget, Focus};
use crate::util::fit_width;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Result;
    let border_color = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Results ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    match &app.session.phase {
        Phase::Idle => {
            let placeholder = Paragraph::new("Results will appear here...")
                .style(Style::default().fg(theme.muted));
            f.render_widget(placeholder, inner);
        }
        Phase::Pending => {
            let spinner = SPINNER[app.animation_frame % SPINNER.len()];
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", spinner),
                    Style::default().fg(theme.accent),
                ),
                Span::styled("Working...", Style::default().fg(theme.fg)),
            ]);
            f.render_widget(Paragraph::new(line), inner);
        }
        Phase::Failed(message) => {
            let error = Paragraph::new(failure_line(message))
                .style(Style::default().fg(theme.error))
                .wrap(Wrap { trim: false });
            f.render_widget(error, inner);
        }
        Phase::Succeeded(view) => render_success(f, inner, app, view),
    }
}

fn render_success(f: &mut Frame, area: Rect, app: &App, view: &ResultView) {
    let facts_height = u16::from(!view.facts.is_empty());
    let key_height = view.key.as_ref().map_or(0, key_panel_height);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(2),
            Constraint::Length(facts_height),
            Constraint::Length(key_height),
            Constraint::Length(1),
        ])
        .split(area);

    render_body(f, chunks[0], app, view);
    if !view.facts.is_empty() {
        render_facts(f, chunks[1], app, view);
    }
    if let Some(key) = &view.key {
        render_key_panel(f, chunks[2], app, key);
    }
    render_copy_footer(f, chunks[3], app);
}

fn render_body(f: &mut Frame, area: Rect, app: &App, view: &ResultView) {
    let theme = &app.theme;
    match &view.body {
        ResultBody::Text(text) => {
            let body = Paragraph::new(text.as_str())
                .style(Style::default().fg(theme.success))
                .wrap(Wrap { trim: false });
            f.render_widget(body, area);
        }
        ResultBody::Candidates(items) => {
            let focused = app.focus == Focus::Result;
            let visible = area.height as usize;
            // Keep the cursor inside the window
            let offset = app
                .candidate_cursor
                .saturating_sub(visible.saturating_sub(1));
            let width = area.width.saturating_sub(2) as usize;

            let list_items: Vec<ListItem> = items
                .iter()
                .enumerate()
                .skip(offset)
                .take(visible)
                .map(|(i, candidate)| {
                    let is_cursor = focused && i == app.candidate_cursor;
                    let is_selected = app.candidate_selected == Some(i);
                    let copied = app.acks.is_active(CopyTarget::Candidate(i));

                    let mut label = candidate_label(i, candidate);
                    if copied {
                        label.push_str("  ✓ Copied!");
                    }
                    // At most one candidate is highlighted at a time; moving
                    // the selection clears the previous one implicitly
                    let style = if is_cursor {
                        Style::default()
                            .bg(theme.selection_bg)
                            .fg(theme.selection_fg)
                            .add_modifier(Modifier::BOLD)
                    } else if is_selected {
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.fg)
                    };
                    ListItem::new(fit_width(&label, width)).style(style)
                })
                .collect();

            f.render_widget(List::new(list_items), area);
        }
    }
}

fn render_facts(f: &mut Frame, area: Rect, app: &App, view: &ResultView) {
    let theme = &app.theme;
    let mut spans = Vec::new();
    for (i, (label, value)) in view.facts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(theme.muted)));
        }
        spans.push(Span::styled(
            format!("{}: ", label),
            Style::default().fg(theme.muted),
        ));
        spans.push(Span::styled(
            value.clone(),
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn key_panel_height(key: &KeyPanel) -> u16 {
    // borders + hex line + advisory, plus the UTF-8 annotation when present
    4 + u16::from(key.key_utf8.is_some())
}

fn render_key_panel(f: &mut Frame, area: Rect, app: &App, key: &KeyPanel) {
    let theme = &app.theme;
    let copied = app.acks.is_active(CopyTarget::Key);

    let copy_hint = if copied { "✓ Copied!" } else { "[k] Copy" };
    let mut lines = vec![Line::from(vec![
        Span::styled(
            key.key_hex.clone(),
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            copy_hint,
            Style::default().fg(if copied { theme.success } else { theme.accent }),
        ),
    ])];
    if let Some(utf8) = &key.key_utf8 {
        lines.push(Line::from(vec![
            Span::styled("UTF-8: ", Style::default().fg(theme.muted)),
            Span::styled(utf8.clone(), Style::default().fg(theme.fg)),
        ]));
    }
    lines.push(Line::from(Span::styled(
        "⚠ Save this key to decrypt your message later!",
        Style::default().fg(theme.accent),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" 🔑 Encryption Key ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_copy_footer(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let copied = app.acks.is_active(CopyTarget::Result);
    let (text, color) = if copied {
        ("✓ Copied!", theme.success)
    } else {
        ("[y] Copy result", theme.accent)
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(color)),
        area,
    );
}
