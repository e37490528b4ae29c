// Parameter panel
//
// Draws the schema-driven form: one line per field. Text and number fields
// show their buffer (or placeholder), radio fields show the option group
// with the checked option marked. The panel is empty-bodied when the active
// technique declares no parameters.

use crate::form::FieldState;
use crate::schema::ParamKind;
use crate::tui::app::{App, Focus};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Params;
    let border_color = if focused {
        theme.border_focused
    } else {
        theme.border
    };

    let mut lines: Vec<Line> = Vec::new();
    if app.session.form.is_empty() {
        lines.push(Line::from(Span::styled(
            "No parameters for this technique.",
            Style::default().fg(theme.muted),
        )));
    } else {
        for (i, field) in app.session.form.fields.iter().enumerate() {
            let is_cursor = focused && i == app.param_cursor;
            lines.push(field_line(field, is_cursor, app));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Parameters ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line<'a>(field: &'a FieldState, is_cursor: bool, app: &App) -> Line<'a> {
    let theme = &app.theme;
    let label_style = if is_cursor {
        Style::default()
            .fg(theme.selection_fg)
            .bg(theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg)
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", field.spec.display_label()),
        label_style,
    )];
    if field.spec.required {
        spans.push(Span::styled("* ", Style::default().fg(theme.error)));
    }
    spans.push(Span::styled(": ", Style::default().fg(theme.muted)));

    match field.spec.kind {
        ParamKind::Radio => {
            for (j, option) in field.spec.options.iter().enumerate() {
                let checked = field.selected == Some(j);
                let marker = if checked { "(•) " } else { "( ) " };
                let style = if checked {
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg)
                };
                spans.push(Span::styled(format!("{}{}  ", marker, option.label), style));
            }
        }
        ParamKind::Text | ParamKind::Number => {
            if field.input.is_empty() {
                let placeholder = field.spec.placeholder_text().unwrap_or_default();
                spans.push(Span::styled(placeholder, Style::default().fg(theme.muted)));
            } else {
                let value = if is_cursor {
                    format!("{}█", field.input)
                } else {
                    field.input.clone()
                };
                spans.push(Span::styled(value, Style::default().fg(theme.fg)));
            }
            if let Some(hint) = field.bounds_hint() {
                spans.push(Span::styled(
                    format!("  {}", hint),
                    Style::default().fg(theme.muted),
                ));
            }
        }
    }

    Line::from(spans)
}

/// Rows the panel needs for the current form (borders included)
pub fn desired_height(app: &App) -> u16 {
    let fields = app.session.form.fields.len().max(1);
    (fields as u16).saturating_add(2).min(10)
}
