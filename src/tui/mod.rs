// TUI module - Terminal User Interface
//
// Terminal initialization and cleanup, the event loop, and layered key
// dispatch. The loop multiplexes three sources with tokio::select!:
// keyboard input, a periodic redraw tick, and completion events from
// spawned network tasks.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod modal;
pub mod theme;
pub mod ui;

use crate::client::ApiClient;
use crate::logging::LogBuffer;
use crate::schema::Operation;
use crate::session::SessionEvent;
use anyhow::{Context, Result};
use app::{App, Focus};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI until the user quits
pub async fn run_tui(client: ApiClient, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Completion events from spawned network tasks
    let (events_tx, mut events_rx) = mpsc::channel::<SessionEvent>(64);

    let mut app = App::new(client, events_tx, log_buffer);
    app.load_techniques();

    let result = run_event_loop(&mut terminal, &mut app, &mut events_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events_rx: &mut mpsc::Receiver<SessionEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            // Periodic tick for spinner animation and ack/toast expiry
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            // Network task completions
            Some(event) = events_rx.recv() => {
                app.apply_event(event);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Layered dispatch: Modal → Global → Focused panel
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return;
    }
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Layer 1: an open modal absorbs everything
    if let Some(modal) = &mut app.modal {
        if modal.handle_input(key_event.code) == ModalAction::Close {
            app.modal = None;
        }
        return;
    }

    // Layer 2: global keys
    if handle_global_keys(app, &key_event) {
        return;
    }

    // Layer 3: focused panel
    match app.focus {
        Focus::Techniques => handle_techniques_keys(app, &key_event),
        Focus::Input => handle_input_keys(app, &key_event),
        Focus::Params => handle_params_keys(app, &key_event),
        Focus::Result => handle_result_keys(app, &key_event),
    }
}

/// Global keys - work the same regardless of focus. Returns true if handled.
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let key = key_event.code;
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            true
        }
        // Execute key chord
        KeyCode::Enter if ctrl => {
            if app.handle_key_press(key) {
                app.execute();
            }
            true
        }
        // Clear action
        KeyCode::Char('l') if ctrl => {
            app.clear();
            true
        }
        KeyCode::Tab => {
            if app.handle_key_press(key) {
                app.focus = app.focus.next();
            }
            true
        }
        KeyCode::BackTab => {
            if app.handle_key_press(key) {
                app.focus = app.focus.prev();
            }
            true
        }
        // Operation tabs - mutually exclusive, exactly one active
        KeyCode::F(1) => {
            if app.handle_key_press(key) {
                app.set_operation(Operation::Encrypt);
            }
            true
        }
        KeyCode::F(2) => {
            if app.handle_key_press(key) {
                app.set_operation(Operation::Decrypt);
            }
            true
        }
        KeyCode::F(3) => {
            if app.handle_key_press(key) {
                app.set_operation(Operation::BruteForce);
            }
            true
        }
        KeyCode::F(4) => {
            if app.handle_key_press(key) {
                app.modal = Some(Modal::Logs);
            }
            true
        }
        _ => false,
    }
}

fn handle_techniques_keys(app: &mut App, key_event: &KeyEvent) {
    let key = key_event.code;
    match key {
        KeyCode::Up => {
            if app.handle_key_press(key) {
                app.move_technique_cursor(-1);
            }
        }
        KeyCode::Down => {
            if app.handle_key_press(key) {
                app.move_technique_cursor(1);
            }
        }
        KeyCode::Enter => {
            // Convenience: jump to the input area once a technique is chosen
            if app.handle_key_press(key) {
                app.focus = Focus::Input;
            }
        }
        KeyCode::Char('q') => {
            if app.handle_key_press(key) {
                app.should_quit = true;
            }
        }
        KeyCode::Char('y') => {
            if app.handle_key_press(key) {
                app.copy_result();
            }
        }
        KeyCode::Char('?') => {
            if app.handle_key_press(key) {
                app.modal = Some(Modal::Help);
            }
        }
        _ => {}
    }
}

fn handle_input_keys(app: &mut App, key_event: &KeyEvent) {
    match key_event.code {
        // Unhandled control chords must not type into the buffer
        KeyCode::Char(_) if key_event.modifiers.contains(KeyModifiers::CONTROL) => {}
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Enter => app.input.push('\n'),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Esc => app.focus = Focus::Techniques,
        _ => {}
    }
}

fn handle_params_keys(app: &mut App, key_event: &KeyEvent) {
    let key = key_event.code;
    let field_count = app.session.form.fields.len();
    match key {
        KeyCode::Up => {
            if app.handle_key_press(key) {
                app.param_cursor = app.param_cursor.saturating_sub(1);
            }
        }
        KeyCode::Down => {
            if app.handle_key_press(key) && field_count > 0 {
                app.param_cursor = (app.param_cursor + 1).min(field_count - 1);
            }
        }
        KeyCode::Left => {
            if app.handle_key_press(key) {
                if let Some(field) = app.session.form.fields.get_mut(app.param_cursor) {
                    field.cycle_option(false);
                }
            }
        }
        KeyCode::Right | KeyCode::Char(' ') => {
            if app.handle_key_press(key) {
                if let Some(field) = app.session.form.fields.get_mut(app.param_cursor) {
                    field.cycle_option(true);
                }
            }
        }
        KeyCode::Char(c) => {
            if !key_event.modifiers.contains(KeyModifiers::CONTROL) {
                if let Some(field) = app.session.form.fields.get_mut(app.param_cursor) {
                    field.push_char(c);
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = app.session.form.fields.get_mut(app.param_cursor) {
                field.pop_char();
            }
        }
        KeyCode::Esc => app.focus = Focus::Techniques,
        _ => {}
    }
}

fn handle_result_keys(app: &mut App, key_event: &KeyEvent) {
    let key = key_event.code;
    match key {
        KeyCode::Up => {
            if app.handle_key_press(key) {
                app.move_candidate_cursor(-1);
            }
        }
        KeyCode::Down => {
            if app.handle_key_press(key) {
                app.move_candidate_cursor(1);
            }
        }
        KeyCode::Enter => {
            if app.handle_key_press(key) {
                app.copy_candidate_at_cursor();
            }
        }
        KeyCode::Char('y') => {
            if app.handle_key_press(key) {
                app.copy_result();
            }
        }
        KeyCode::Char('k') => {
            if app.handle_key_press(key) {
                app.copy_key();
            }
        }
        KeyCode::Char('q') => {
            if app.handle_key_press(key) {
                app.should_quit = true;
            }
        }
        KeyCode::Char('?') => {
            if app.handle_key_press(key) {
                app.modal = Some(Modal::Help);
            }
        }
        _ => {}
    }
}
