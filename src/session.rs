// Session state and operation dispatch
//
// Single owner of the mutable selection state (active technique, operation
// mode, form, result phase). The original front-end scattered this across
// module globals; holding it in one struct keeps every transition unit
// testable without a terminal.
//
// Network work happens elsewhere: `begin_execute` validates and hands back
// the request to submit, and completions come back in through the
// `apply_*`/`finish_*` methods as `SessionEvent`s from spawned tasks.

use crate::client::{CatalogError, ExecuteError, ExecuteSuccess};
use crate::form::{self, FormState};
use crate::render::ResultView;
use crate::schema::{Operation, OperationRequest, Technique};

/// Fixed message for transport-level execute failures; the cause is logged,
/// not surfaced
pub const MSG_CONNECT_FAILED: &str = "Failed to connect to server";
/// Local validation messages, caught before any network call
pub const MSG_NO_TECHNIQUE: &str = "Please select a technique first";
pub const MSG_NO_INPUT: &str = "Please enter some text";
/// Soft-failure fallback when a technique-info fetch fails
pub const GENERIC_DESCRIPTION: &str = "generic technique";

/// Catalog listing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogState {
    #[default]
    Loading,
    Ready,
    /// Degraded: listing failed, rest of the UI stays alive
    Unavailable,
}

/// Dispatcher state machine
///
/// Idle -> Pending -> {Succeeded, Failed}, and back to Pending on each new
/// explicit submission. No queuing, no auto-retry.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Idle,
    Pending,
    Succeeded(ResultView),
    Failed(String),
}

/// Completion events delivered from spawned network tasks
#[derive(Debug)]
pub enum SessionEvent {
    TechniquesLoaded(Result<Vec<String>, CatalogError>),
    /// Tagged with the epoch current when the fetch was issued; stale
    /// responses are dropped on receipt
    InfoLoaded {
        epoch: u64,
        result: Result<Technique, CatalogError>,
    },
    ExecuteDone(Result<ExecuteSuccess, ExecuteError>),
}

/// All session state, owned by the UI loop
#[derive(Debug, Default)]
pub struct Session {
    pub catalog: CatalogState,
    pub techniques: Vec<String>,
    /// Index into `techniques`; None is the explicit empty selection
    pub selected: Option<usize>,
    pub operation: Operation,
    pub description: Option<String>,
    pub form: FormState,
    pub phase: Phase,
    info_epoch: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_technique(&self) -> Option<&str> {
        self.selected
            .and_then(|i| self.techniques.get(i))
            .map(String::as_str)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }

    /// Apply the catalog listing result
    pub fn apply_techniques(&mut self, result: Result<Vec<String>, CatalogError>) {
        self.selected = None;
        self.description = None;
        self.form = FormState::default();
        match result {
            Ok(techniques) => {
                self.catalog = CatalogState::Ready;
                self.techniques = techniques;
            }
            Err(e) => {
                tracing::warn!("Failed to load technique catalog: {}", e);
                self.catalog = CatalogState::Unavailable;
                self.techniques.clear();
            }
        }
    }

    /// Change the active selection
    ///
    /// Discards the current description and form unconditionally and bumps
    /// the info epoch, which invalidates any in-flight info fetch. Returns
    /// the technique name and epoch to fetch info for, or None for the empty
    /// selection (no call is made, panels just clear).
    pub fn select(&mut self, index: Option<usize>) -> Option<(String, u64)> {
        self.selected = index.filter(|&i| i < self.techniques.len());
        self.description = None;
        self.form = FormState::default();
        self.info_epoch += 1;
        self.selected_technique()
            .map(|name| (name.to_string(), self.info_epoch))
    }

    /// Apply a technique-info result, dropping stale epochs
    ///
    /// On failure the description falls back to a generic non-empty string
    /// with no params - informational context is not required for correct
    /// operation, so the form never gets stuck blank.
    pub fn apply_info(&mut self, epoch: u64, result: Result<Technique, CatalogError>) {
        if epoch != self.info_epoch {
            tracing::debug!(epoch, current = self.info_epoch, "Dropping stale technique info");
            return;
        }
        if self.selected.is_none() {
            return;
        }
        match result {
            Ok(technique) => {
                self.form = form::render(&technique.params);
                self.description = Some(technique.description);
            }
            Err(e) => {
                tracing::warn!("Failed to fetch technique info: {}", e);
                self.description = Some(GENERIC_DESCRIPTION.to_string());
                self.form = FormState::default();
            }
        }
    }

    pub fn set_operation(&mut self, operation: Operation) {
        self.operation = operation;
    }

    /// Validate and assemble a request for submission
    ///
    /// Precondition violations never reach the network: they transition
    /// straight to `Failed` with a descriptive message and return None. On
    /// success the phase becomes `Pending` (the UI hides any previous result
    /// and copy affordances) and the caller submits the returned request.
    pub fn begin_execute(&mut self, input_text: &str) -> Option<OperationRequest> {
        let Some(technique) = self.selected_technique() else {
            self.phase = Phase::Failed(MSG_NO_TECHNIQUE.to_string());
            return None;
        };
        let technique = technique.to_string();
        let trimmed = input_text.trim();
        if trimmed.is_empty() {
            self.phase = Phase::Failed(MSG_NO_INPUT.to_string());
            return None;
        }
        let request = OperationRequest {
            technique,
            operation: self.operation,
            input_text: trimmed.to_string(),
            params: form::collect(&self.form),
        };
        self.phase = Phase::Pending;
        Some(request)
    }

    /// Apply an execute completion
    ///
    /// Defensive: the UI disables re-entry while pending, but a completion
    /// arriving in any other phase is still dropped rather than trusted.
    pub fn finish_execute(&mut self, outcome: Result<ExecuteSuccess, ExecuteError>) {
        if !self.is_pending() {
            tracing::debug!("Dropping execute completion outside Pending phase");
            return;
        }
        self.phase = match outcome {
            Ok(success) => Phase::Succeeded(ResultView::build(&success)),
            Err(ExecuteError::Transport(cause)) => {
                tracing::warn!("Execute transport failure: {}", cause);
                Phase::Failed(MSG_CONNECT_FAILED.to_string())
            }
            Err(ExecuteError::Rejected(message)) => Phase::Failed(message),
        };
    }

    /// Clear action: drop the last result and return to Idle
    pub fn clear_result(&mut self) {
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ExtraInfo, ParamValue, ResultPayload};

    fn ready_session() -> Session {
        let mut session = Session::new();
        session.apply_techniques(Ok(vec!["CaesarCipher".into(), "AESCipher".into()]));
        session
    }

    fn caesar_params() -> Vec<crate::schema::ParamSpec> {
        serde_json::from_str(
            r#"[{"name": "offset", "type": "number", "min": 1, "max": 25}]"#,
        )
        .unwrap()
    }

    #[test]
    fn execute_without_technique_fails_locally() {
        let mut session = ready_session();
        let request = session.begin_execute("hello");
        assert!(request.is_none(), "no request may reach the network");
        match &session.phase {
            Phase::Failed(msg) => assert_eq!(msg, MSG_NO_TECHNIQUE),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn execute_with_blank_input_fails_locally() {
        let mut session = ready_session();
        session.select(Some(0));
        let request = session.begin_execute("   \n\t ");
        assert!(request.is_none());
        match &session.phase {
            Phase::Failed(msg) => assert_eq!(msg, MSG_NO_INPUT),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn empty_optional_param_is_omitted_from_request() {
        // CaesarCipher scenario: offset left empty, operation E, input "hello"
        let mut session = ready_session();
        let (name, epoch) = session.select(Some(0)).unwrap();
        assert_eq!(name, "CaesarCipher");
        session.apply_info(
            epoch,
            Ok(Technique {
                description: "shift cipher".into(),
                params: caesar_params(),
            }),
        );
        let request = session.begin_execute("hello").expect("request");
        assert!(session.is_pending());
        assert_eq!(request.technique, "CaesarCipher");
        assert_eq!(request.input_text, "hello");
        assert!(request.params.is_empty(), "no offset key may be sent");
    }

    #[test]
    fn radio_default_rides_along_with_request() {
        let mut session = ready_session();
        let (_, epoch) = session.select(Some(1)).unwrap();
        let technique: Technique = serde_json::from_str(
            r#"{"description": "AES",
                "params": [{"name": "keySize", "type": "radio", "default": "128",
                            "options": [{"value": "128", "label": "128"},
                                        {"value": "256", "label": "256"}]},
                           {"name": "customKey", "type": "text"}]}"#,
        )
        .unwrap();
        session.apply_info(epoch, Ok(technique));
        let request = session.begin_execute("hello").unwrap();
        assert_eq!(request.params.len(), 1);
        assert_eq!(
            request.params.get("keySize"),
            Some(&ParamValue::Number(128))
        );
    }

    #[test]
    fn transport_failure_uses_fixed_message() {
        let mut session = ready_session();
        session.select(Some(0));
        session.begin_execute("hello").unwrap();
        session.finish_execute(Err(ExecuteError::Transport("dns failure".into())));
        match &session.phase {
            Phase::Failed(msg) => {
                assert_eq!(msg, MSG_CONNECT_FAILED);
                assert!(!msg.contains("dns"), "cause must not surface");
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn rejection_message_is_verbatim() {
        let mut session = ready_session();
        session.select(Some(0));
        session.begin_execute("hello").unwrap();
        session.finish_execute(Err(ExecuteError::Rejected("invalid offset".into())));
        match &session.phase {
            Phase::Failed(msg) => assert_eq!(msg, "invalid offset"),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[test]
    fn success_transitions_with_result_view() {
        let mut session = ready_session();
        session.select(Some(0));
        session.begin_execute("hello").unwrap();
        session.finish_execute(Ok(ExecuteSuccess {
            result: ResultPayload::Text("XYZ".into()),
            extra_info: ExtraInfo::default(),
        }));
        assert!(matches!(session.phase, Phase::Succeeded(_)));
    }

    #[test]
    fn stray_completion_outside_pending_is_dropped() {
        let mut session = ready_session();
        session.select(Some(0));
        session.finish_execute(Ok(ExecuteSuccess {
            result: ResultPayload::Text("XYZ".into()),
            extra_info: ExtraInfo::default(),
        }));
        assert!(matches!(session.phase, Phase::Idle));
    }

    #[test]
    fn resubmission_after_failure_goes_pending_again() {
        let mut session = ready_session();
        session.select(Some(0));
        session.begin_execute("hello").unwrap();
        session.finish_execute(Err(ExecuteError::Rejected("bad".into())));
        assert!(session.begin_execute("hello again").is_some());
        assert!(session.is_pending());
    }

    #[test]
    fn stale_info_epoch_is_dropped() {
        let mut session = ready_session();
        let (_, first_epoch) = session.select(Some(0)).unwrap();
        // User switches again before the first fetch lands
        let (_, _second_epoch) = session.select(Some(1)).unwrap();
        session.apply_info(
            first_epoch,
            Ok(Technique {
                description: "stale".into(),
                params: caesar_params(),
            }),
        );
        assert!(session.description.is_none(), "stale info must not land");
        assert!(session.form.is_empty());
    }

    #[test]
    fn info_failure_falls_back_to_generic_description() {
        let mut session = ready_session();
        let (_, epoch) = session.select(Some(0)).unwrap();
        session.apply_info(epoch, Err(CatalogError::Unreachable("refused".into())));
        assert_eq!(session.description.as_deref(), Some(GENERIC_DESCRIPTION));
        assert!(session.form.is_empty());
    }

    #[test]
    fn selection_change_discards_form_state() {
        let mut session = ready_session();
        let (_, epoch) = session.select(Some(0)).unwrap();
        session.apply_info(
            epoch,
            Ok(Technique {
                description: "shift cipher".into(),
                params: caesar_params(),
            }),
        );
        assert!(!session.form.is_empty());
        // Empty selection clears panels and issues no fetch
        assert!(session.select(None).is_none());
        assert!(session.form.is_empty());
        assert!(session.description.is_none());
    }

    #[test]
    fn catalog_failure_degrades_listing() {
        let mut session = Session::new();
        session.apply_techniques(Err(CatalogError::Unreachable("refused".into())));
        assert_eq!(session.catalog, CatalogState::Unavailable);
        assert!(session.techniques.is_empty());
        // The rest of the session still works; execute just fails locally
        assert!(session.begin_execute("hello").is_none());
    }

    #[test]
    fn clear_returns_to_idle() {
        let mut session = ready_session();
        session.select(Some(0));
        session.begin_execute("hello").unwrap();
        session.finish_execute(Ok(ExecuteSuccess {
            result: ResultPayload::Text("XYZ".into()),
            extra_info: ExtraInfo::default(),
        }));
        session.clear_result();
        assert!(matches!(session.phase, Phase::Idle));
    }
}
