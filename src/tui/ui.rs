// Top-level layout and draw
//
// ┌ title bar ──────────────────────────────────────┐
// │ techniques │ tabs + input                        │
// │            │ parameters                          │
// │ about      │ results (body / facts / key panel)  │
// ├ status bar ─────────────────────────────────────┤
// Toast and modal overlays render last, on top.

use super::app::App;
use super::components::{
    input_panel, params_panel, result_panel, status_bar, technique_panel, title_bar, toast,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

pub fn draw(f: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title bar
            Constraint::Min(10),   // main content
            Constraint::Length(2), // status bar
        ])
        .split(f.area());

    title_bar::render(f, outer[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(outer[1]);

    technique_panel::render(f, columns[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // tabs + input area
            Constraint::Length(params_panel::desired_height(app)),
            Constraint::Min(5), // results
        ])
        .split(columns[1]);

    input_panel::render(f, right[0], app);
    params_panel::render(f, right[1], app);
    result_panel::render(f, right[2], app);

    status_bar::render(f, outer[2], app);

    let full = f.area();
    if let Some(t) = &app.toast {
        toast::render(f, full, t, &app.theme);
    }
    if let Some(modal) = &app.modal {
        modal.render(f, full, &app.theme, &app.log_buffer);
    }
}
