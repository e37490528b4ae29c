// Result view model
//
// Pure construction of what the result panel displays, independent of any
// terminal toolkit. The TUI draws these values through plain text widgets, so
// attacker-influenced result strings are carried byte-for-byte and never
// interpreted as structure.

use crate::client::ExecuteSuccess;
use crate::schema::ResultPayload;
use regex::Regex;
use std::sync::OnceLock;

/// Marker prefixed to every rendered failure message
pub const FAILURE_MARKER: &str = "❌ ";

/// Body of a successful result
#[derive(Debug, Clone, PartialEq)]
pub enum ResultBody {
    Text(String),
    /// Brute-force candidates, in the order the server returned them -
    /// order reflects the key-space search and is preserved verbatim
    Candidates(Vec<String>),
}

/// Highlighted key panel, shown when the server returned key material
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPanel {
    /// Copy action binds to exactly this string
    pub key_hex: String,
    /// Secondary annotation
    pub key_utf8: Option<String>,
}

/// What the result panel shows after a successful operation
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub body: ResultBody,
    pub key: Option<KeyPanel>,
    /// Labeled auxiliary facts ("Key Size" / "Rounds"); absent ones skipped
    pub facts: Vec<(&'static str, String)>,
}

impl ResultView {
    /// Build the view from a decoded execute success
    pub fn build(success: &ExecuteSuccess) -> Self {
        let body = match &success.result {
            ResultPayload::Text(text) => ResultBody::Text(text.clone()),
            ResultPayload::Candidates(items) => ResultBody::Candidates(items.clone()),
        };
        let extra = &success.extra_info;
        let key = extra.key_hex.as_ref().map(|key_hex| KeyPanel {
            key_hex: key_hex.clone(),
            key_utf8: extra.key_utf8.clone(),
        });
        let mut facts = Vec::new();
        if let Some(size) = extra.key_size {
            facts.push(("Key Size", format!("{}-bit", size)));
        }
        if let Some(rounds) = extra.num_rounds {
            facts.push(("Rounds", rounds.to_string()));
        }
        Self { body, key, facts }
    }

    pub fn candidate_count(&self) -> usize {
        match &self.body {
            ResultBody::Candidates(items) => items.len(),
            ResultBody::Text(_) => 0,
        }
    }

    /// Text for the copy-of-full-result action
    ///
    /// Candidate lists copy as their labeled lines, matching what is on
    /// screen.
    pub fn copy_all_text(&self) -> String {
        match &self.body {
            ResultBody::Text(text) => text.clone(),
            ResultBody::Candidates(items) => items
                .iter()
                .enumerate()
                .map(|(i, c)| candidate_label(i, c))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Display label for candidate `index` (0-based in, 1-indexed out)
pub fn candidate_label(index: usize, candidate: &str) -> String {
    format!("Option {}: {}", index + 1, candidate)
}

/// Strip the leading "Option N: " label from a rendered candidate line
///
/// Selecting a candidate copies the underlying text, not the label.
pub fn strip_candidate_label(line: &str) -> String {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    let re = LABEL.get_or_init(|| Regex::new(r"^Option \d+: ").expect("static regex"));
    re.replace(line, "").into_owned()
}

/// Failure message as displayed, e.g. "❌ invalid offset"
pub fn failure_line(message: &str) -> String {
    format!("{}{}", FAILURE_MARKER, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ExtraInfo;

    fn success(result: ResultPayload, extra_info: ExtraInfo) -> ExecuteSuccess {
        ExecuteSuccess { result, extra_info }
    }

    #[test]
    fn candidates_render_labeled_in_order() {
        let view = ResultView::build(&success(
            ResultPayload::Candidates(vec!["ifmmp".into(), "hello".into(), "gdkkn".into()]),
            ExtraInfo::default(),
        ));
        let ResultBody::Candidates(items) = &view.body else {
            panic!("expected candidates");
        };
        assert_eq!(items.len(), 3);
        assert_eq!(candidate_label(0, &items[0]), "Option 1: ifmmp");
        assert_eq!(candidate_label(2, &items[2]), "Option 3: gdkkn");
    }

    #[test]
    fn selecting_candidate_copies_stripped_text() {
        let line = candidate_label(1, "hello world");
        assert_eq!(line, "Option 2: hello world");
        assert_eq!(strip_candidate_label(&line), "hello world");
    }

    #[test]
    fn strip_only_removes_leading_label() {
        // A candidate that itself contains "Option 1: " keeps its content
        assert_eq!(
            strip_candidate_label("Option 1: Option 9: nested"),
            "Option 9: nested"
        );
        assert_eq!(strip_candidate_label("no label here"), "no label here");
    }

    #[test]
    fn markup_significant_text_is_preserved_verbatim() {
        let payload = "<script>alert('x')</script> & <b>bold</b>";
        let view = ResultView::build(&success(
            ResultPayload::Text(payload.into()),
            ExtraInfo::default(),
        ));
        assert_eq!(view.body, ResultBody::Text(payload.into()));
        assert_eq!(view.copy_all_text(), payload);
    }

    #[test]
    fn key_panel_binds_exact_key_material() {
        let extra: ExtraInfo = serde_json::from_str(
            r#"{"key_hex": "AB12", "key_utf8": "««»", "key_size": 256, "num_rounds": 14}"#,
        )
        .unwrap();
        let view = ResultView::build(&success(ResultPayload::Text("XYZ".into()), extra));
        let key = view.key.expect("key panel");
        assert_eq!(key.key_hex, "AB12");
        assert!(key.key_utf8.is_some());
        assert_eq!(view.facts[0], ("Key Size", "256-bit".to_string()));
        assert_eq!(view.facts[1], ("Rounds", "14".to_string()));
    }

    #[test]
    fn absent_facts_are_skipped_without_placeholder() {
        let view = ResultView::build(&success(
            ResultPayload::Text("XYZ".into()),
            ExtraInfo::default(),
        ));
        assert!(view.key.is_none());
        assert!(view.facts.is_empty());
    }

    #[test]
    fn failure_line_carries_marker_and_message() {
        assert_eq!(failure_line("invalid offset"), "❌ invalid offset");
    }

    #[test]
    fn copy_all_joins_labeled_candidates() {
        let view = ResultView::build(&success(
            ResultPayload::Candidates(vec!["a".into(), "b".into()]),
            ExtraInfo::default(),
        ));
        assert_eq!(view.copy_all_text(), "Option 1: a\nOption 2: b");
    }
}
