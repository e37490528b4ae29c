// TUI application state
//
// Owns the session, the free-text input buffer, focus and cursor positions,
// copy acknowledgments, and the toast/modal overlays. Network calls are
// spawned onto tokio tasks and their completions come back through the
// SessionEvent channel drained by the event loop.

use super::clipboard;
use super::input::InputHandler;
use super::modal::Modal;
use super::theme::Theme;
use crate::client::ApiClient;
use crate::logging::LogBuffer;
use crate::render::{candidate_label, strip_candidate_label, ResultBody};
use crate::schema::Operation;
use crate::session::{Phase, Session, SessionEvent};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Focusable panels, cycled with Tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Techniques,
    Input,
    Params,
    Result,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Techniques => Focus::Input,
            Focus::Input => Focus::Params,
            Focus::Params => Focus::Result,
            Focus::Result => Focus::Techniques,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Techniques => Focus::Result,
            Focus::Input => Focus::Techniques,
            Focus::Params => Focus::Input,
            Focus::Result => Focus::Params,
        }
    }
}

/// Controls that show a transient copy acknowledgment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyTarget {
    Result,
    Key,
    Candidate(usize),
}

/// How long a "✓ Copied!" acknowledgment stays on a control
const ACK_DURATION: Duration = Duration::from_secs(2);

/// Per-control copy acknowledgments
///
/// Revert deadlines are keyed by control: a second copy on the same control
/// replaces the earlier deadline, so the later revert wins instead of racing
/// the first.
#[derive(Debug, Default)]
pub struct AckState {
    active: HashMap<CopyTarget, Instant>,
}

impl AckState {
    pub fn trigger(&mut self, target: CopyTarget) {
        self.active.insert(target, Instant::now());
    }

    pub fn is_active(&self, target: CopyTarget) -> bool {
        self.active
            .get(&target)
            .is_some_and(|since| since.elapsed() < ACK_DURATION)
    }

    /// Drop expired acknowledgments; called from the redraw tick
    pub fn prune(&mut self) {
        self.active.retain(|_, since| since.elapsed() < ACK_DURATION);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

/// Transient toast notification
#[derive(Debug)]
pub struct Toast {
    pub message: String,
    created_at: Instant,
}

impl Toast {
    const DURATION: Duration = Duration::from_secs(2);

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= Self::DURATION
    }
}

/// Main application state for the TUI
pub struct App {
    pub session: Session,

    /// Free-text input area buffer
    pub input: String,

    pub focus: Focus,

    /// Selector cursor: 0 is the explicit empty entry, i+1 is technique i
    pub technique_cursor: usize,

    /// Focused field in the parameter panel
    pub param_cursor: usize,

    /// Navigation position within brute-force candidates
    pub candidate_cursor: usize,

    /// Highlighted (last copied) candidate; at most one at a time
    pub candidate_selected: Option<usize>,

    pub acks: AckState,
    pub toast: Option<Toast>,
    pub modal: Option<Modal>,

    pub theme: Theme,
    pub should_quit: bool,

    /// Animation frame counter for the pending spinner
    pub animation_frame: usize,

    pub log_buffer: LogBuffer,

    input_handler: InputHandler,
    client: ApiClient,
    events_tx: mpsc::Sender<SessionEvent>,
}

impl App {
    pub fn new(client: ApiClient, events_tx: mpsc::Sender<SessionEvent>, log_buffer: LogBuffer) -> Self {
        Self {
            session: Session::new(),
            input: String::new(),
            focus: Focus::default(),
            technique_cursor: 0,
            param_cursor: 0,
            candidate_cursor: 0,
            candidate_selected: None,
            acks: AckState::default(),
            toast: None,
            modal: None,
            theme: Theme::default(),
            should_quit: false,
            animation_frame: 0,
            log_buffer,
            input_handler: InputHandler::default(),
            client,
            events_tx,
        }
    }

    // ── Key press bookkeeping ────────────────────────────────────────────

    pub fn handle_key_press(&mut self, key: crossterm::event::KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: crossterm::event::KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    /// Redraw tick: advance the spinner, expire acknowledgments and toasts
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.acks.prune();
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    // ── Network triggers ─────────────────────────────────────────────────

    /// Kick off the initial catalog load
    pub fn load_techniques(&self) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.list_techniques().await;
            let _ = tx.send(SessionEvent::TechniquesLoaded(result)).await;
        });
    }

    /// Move the technique selector cursor and apply the selection change
    ///
    /// Selecting a technique immediately fetches its info; the empty entry
    /// (cursor 0) clears the panels without a call.
    pub fn move_technique_cursor(&mut self, delta: i64) {
        let max = self.session.techniques.len(); // 0..=len, 0 is the empty entry
        let cursor = self.technique_cursor as i64 + delta;
        let cursor = cursor.clamp(0, max as i64) as usize;
        if cursor == self.technique_cursor {
            return;
        }
        self.technique_cursor = cursor;
        self.param_cursor = 0;
        let index = cursor.checked_sub(1);
        if let Some((name, epoch)) = self.session.select(index) {
            let client = self.client.clone();
            let tx = self.events_tx.clone();
            tokio::spawn(async move {
                let result = client.technique_info(&name).await;
                let _ = tx.send(SessionEvent::InfoLoaded { epoch, result }).await;
            });
        }
    }

    /// Execute the active operation
    ///
    /// Ignored while a request is pending - the UI disables re-entry rather
    /// than queueing submissions.
    pub fn execute(&mut self) {
        if self.session.is_pending() {
            return;
        }
        self.reset_result_cursor();
        if let Some(request) = self.session.begin_execute(&self.input) {
            let client = self.client.clone();
            let tx = self.events_tx.clone();
            tokio::spawn(async move {
                let outcome = client.execute(&request).await;
                let _ = tx.send(SessionEvent::ExecuteDone(outcome)).await;
            });
        }
    }

    /// Apply a completion event from a spawned task
    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::TechniquesLoaded(result) => {
                self.session.apply_techniques(result);
                self.technique_cursor = 0;
                self.param_cursor = 0;
            }
            SessionEvent::InfoLoaded { epoch, result } => {
                self.session.apply_info(epoch, result);
                self.param_cursor = 0;
            }
            SessionEvent::ExecuteDone(outcome) => {
                self.session.finish_execute(outcome);
                self.reset_result_cursor();
            }
        }
    }

    // ── User actions ─────────────────────────────────────────────────────

    /// Clear action: reset input text and drop the last result
    pub fn clear(&mut self) {
        self.input.clear();
        self.session.clear_result();
        self.reset_result_cursor();
        self.acks.clear();
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.session.set_operation(operation);
    }

    /// Copy the full rendered result; available only after a success
    pub fn copy_result(&mut self) {
        let Phase::Succeeded(view) = &self.session.phase else {
            return;
        };
        let text = view.copy_all_text();
        self.copy_with_ack(&text, CopyTarget::Result);
    }

    /// Copy the key material, bound to exactly the returned hex string
    pub fn copy_key(&mut self) {
        let Phase::Succeeded(view) = &self.session.phase else {
            return;
        };
        let Some(key) = &view.key else { return };
        let text = key.key_hex.clone();
        self.copy_with_ack(&text, CopyTarget::Key);
    }

    /// Copy the candidate under the cursor, label stripped, and highlight it
    pub fn copy_candidate_at_cursor(&mut self) {
        let Phase::Succeeded(view) = &self.session.phase else {
            return;
        };
        let ResultBody::Candidates(items) = &view.body else {
            return;
        };
        let Some(candidate) = items.get(self.candidate_cursor) else {
            return;
        };
        // Copy what the user sees minus the leading label
        let line = candidate_label(self.candidate_cursor, candidate);
        let text = strip_candidate_label(&line);
        let cursor = self.candidate_cursor;
        if self.copy_with_ack(&text, CopyTarget::Candidate(cursor)) {
            // Highlight moves; the previous selection is cleared implicitly
            self.candidate_selected = Some(cursor);
        }
    }

    /// Move the candidate cursor within the result panel
    pub fn move_candidate_cursor(&mut self, delta: i64) {
        let Phase::Succeeded(view) = &self.session.phase else {
            return;
        };
        let count = view.candidate_count();
        if count == 0 {
            return;
        }
        let cursor = (self.candidate_cursor as i64 + delta).clamp(0, count as i64 - 1);
        self.candidate_cursor = cursor as usize;
    }

    fn copy_with_ack(&mut self, text: &str, target: CopyTarget) -> bool {
        match clipboard::copy_to_clipboard(text) {
            Ok(()) => {
                self.acks.trigger(target);
                self.show_toast("✓ Copied to clipboard");
                true
            }
            Err(e) => {
                tracing::error!("Clipboard copy failed: {:#}", e);
                self.modal = Some(Modal::notice(format!(
                    "Failed to copy to clipboard: {}",
                    e
                )));
                false
            }
        }
    }

    fn reset_result_cursor(&mut self) {
        self.candidate_cursor = 0;
        self.candidate_selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ExecuteSuccess;
    use crate::schema::{ExtraInfo, ResultPayload};

    fn test_app() -> App {
        let (tx, _rx) = mpsc::channel(8);
        App::new(ApiClient::new("http://127.0.0.1:5000"), tx, LogBuffer::new())
    }

    #[test]
    fn focus_cycle_covers_all_panels() {
        let mut focus = Focus::Techniques;
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Techniques);
        assert_eq!(Focus::Techniques.prev(), Focus::Result);
    }

    #[test]
    fn ack_last_writer_wins_per_control() {
        let mut acks = AckState::default();
        acks.trigger(CopyTarget::Key);
        // A second copy on the same control replaces the deadline
        acks.trigger(CopyTarget::Key);
        assert!(acks.is_active(CopyTarget::Key));
        assert!(!acks.is_active(CopyTarget::Result));
        assert!(!acks.is_active(CopyTarget::Candidate(0)));
    }

    #[test]
    fn ack_targets_are_independent() {
        let mut acks = AckState::default();
        acks.trigger(CopyTarget::Candidate(1));
        assert!(acks.is_active(CopyTarget::Candidate(1)));
        assert!(!acks.is_active(CopyTarget::Candidate(2)));
        acks.clear();
        assert!(!acks.is_active(CopyTarget::Candidate(1)));
    }

    #[test]
    fn clear_resets_input_and_result() {
        let mut app = test_app();
        app.input = "secret message".to_string();
        app.session.apply_techniques(Ok(vec!["CaesarCipher".into()]));
        app.session.select(Some(0));
        app.session.begin_execute("secret message");
        app.session.finish_execute(Ok(ExecuteSuccess {
            result: ResultPayload::Text("XYZ".into()),
            extra_info: ExtraInfo::default(),
        }));
        app.candidate_selected = Some(0);

        app.clear();
        assert!(app.input.is_empty());
        assert!(matches!(app.session.phase, Phase::Idle));
        assert!(app.candidate_selected.is_none());
    }

    #[test]
    fn execute_is_ignored_while_pending() {
        let mut app = test_app();
        app.session.apply_techniques(Ok(vec!["CaesarCipher".into()]));
        app.session.select(Some(0));
        app.input = "hello".to_string();
        app.session.begin_execute("hello");
        assert!(app.session.is_pending());

        // Re-entry during Pending neither queues nor resets the phase
        app.execute();
        assert!(app.session.is_pending());
    }
}
