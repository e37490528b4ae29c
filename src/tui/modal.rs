// Modal overlays
//
// Three kinds: a blocking notice (clipboard failures - must be dismissed
// explicitly), the help screen, and the recent-logs view. A modal absorbs
// all input while open.

use super::theme::Theme;
use crate::logging::{LogBuffer, LogLevel};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Result of feeding a key to the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Close,
}

/// An open modal overlay
#[derive(Debug)]
pub enum Modal {
    /// Blocking notification, e.g. a clipboard failure
    Notice(String),
    Help,
    Logs,
}

impl Modal {
    pub fn notice(message: impl Into<String>) -> Self {
        Modal::Notice(message.into())
    }

    /// Feed a key press; Esc, Enter and q close every modal
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match key {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => ModalAction::Close,
            _ => ModalAction::None,
        }
    }

    /// Render centered on top of the current frame
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, logs: &LogBuffer) {
        match self {
            Modal::Notice(message) => render_notice(f, area, theme, message),
            Modal::Help => render_help(f, area, theme),
            Modal::Logs => render_logs(f, area, theme, logs),
        }
    }
}

/// Centered sub-rectangle with the given percentage size
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_notice(f: &mut Frame, area: Rect, theme: &Theme, message: &str) {
    let rect = centered_rect(60, 25, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error))
        .title(" Error ");
    let text = Paragraph::new(format!("{}\n\nPress Esc to dismiss", message))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(theme.fg))
        .block(block);
    f.render_widget(Clear, rect);
    f.render_widget(text, rect);
}

fn render_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let rect = centered_rect(60, 70, area);
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(
                format!("  {:<12}", k),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(desc, Style::default().fg(theme.fg)),
        ])
    };
    let lines = vec![
        Line::from(""),
        key("Tab / S-Tab", "cycle panel focus"),
        key("↑ / ↓", "navigate lists and fields"),
        key("F1 F2 F3", "Encrypt / Decrypt / Brute force"),
        key("Ctrl+Enter", "execute operation"),
        key("Ctrl+L", "clear input and result"),
        key("Enter", "copy selected candidate (result panel)"),
        key("y", "copy full result"),
        key("k", "copy key material"),
        key("F4", "recent logs"),
        key("?", "this help"),
        key("q / Ctrl+C", "quit"),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Help ");
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}

fn render_logs(f: &mut Frame, area: Rect, theme: &Theme, logs: &LogBuffer) {
    let rect = centered_rect(80, 70, area);
    let entries = logs.get_all();
    let visible = rect.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = entries
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let color = match entry.level {
                LogLevel::Error => theme.error,
                LogLevel::Warn => theme.accent,
                _ => theme.muted,
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(format!("{:<5} ", entry.level.as_str()), Style::default().fg(color)),
                Span::styled(entry.message.clone(), Style::default().fg(theme.fg)),
            ])
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .title(" Logs ");
    f.render_widget(Clear, rect);
    f.render_widget(Paragraph::new(lines).block(block), rect);
}
