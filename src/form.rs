// Parameter form builder
//
// A pure, stateless mapping in both directions: `render` turns a technique's
// ParamSpec sequence into editable field state, and `collect` reads the field
// state back into the typed parameter map sent with an OperationRequest.
// There is no per-technique code anywhere in here - the schema drives
// everything, which is what lets new server-side techniques appear without
// client changes.

use crate::schema::{scalar_text, ParamKind, ParamSpec, ParamValue};
use std::collections::BTreeMap;

/// Editable state of one rendered parameter field
#[derive(Debug, Clone)]
pub struct FieldState {
    pub spec: ParamSpec,
    /// Text buffer for `text`/`number` fields
    pub input: String,
    /// Checked option index for `radio` fields
    pub selected: Option<usize>,
}

impl FieldState {
    fn new(spec: ParamSpec) -> Self {
        let selected = match spec.kind {
            ParamKind::Radio => spec.default_option(),
            _ => None,
        };
        Self {
            spec,
            input: String::new(),
            selected,
        }
    }

    /// Bounds hint for number fields, e.g. "(1-25)"
    pub fn bounds_hint(&self) -> Option<String> {
        if self.spec.kind != ParamKind::Number {
            return None;
        }
        match (self.spec.min, self.spec.max) {
            (Some(min), Some(max)) => Some(format!("({}-{})", min, max)),
            (Some(min), None) => Some(format!("(min {})", min)),
            (None, Some(max)) => Some(format!("(max {})", max)),
            (None, None) => None,
        }
    }

    /// Cycle the checked radio option forward or backward
    pub fn cycle_option(&mut self, forward: bool) {
        let len = self.spec.options.len();
        if self.spec.kind != ParamKind::Radio || len == 0 {
            return;
        }
        self.selected = Some(match self.selected {
            None => {
                if forward {
                    0
                } else {
                    len - 1
                }
            }
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
        });
    }

    /// Accept a typed character into the buffer
    ///
    /// Number fields only take digits and a leading minus so that collection
    /// can parse deterministically.
    pub fn push_char(&mut self, c: char) {
        match self.spec.kind {
            ParamKind::Text => self.input.push(c),
            ParamKind::Number => {
                if c.is_ascii_digit() || (c == '-' && self.input.is_empty()) {
                    self.input.push(c);
                }
            }
            ParamKind::Radio => {}
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }
}

/// Rendered form: ordered field states for the active technique
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub fields: Vec<FieldState>,
}

impl FormState {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Render a parameter schema into editable field state
///
/// Radio fields come up with their `default` option pre-checked; text and
/// number fields come up empty (placeholders are display-only).
pub fn render(params: &[ParamSpec]) -> FormState {
    FormState {
        fields: params.iter().cloned().map(FieldState::new).collect(),
    }
}

/// Collect current field state back into the request parameter map
///
/// Fields the user left empty are omitted entirely - not sent as empty or
/// zero - so the server can apply its own defaults. Radio values are coerced
/// to numbers when the option text parses as an integer, since the same
/// schema carries numeric choices (key sizes) and named ones (modes).
pub fn collect(form: &FormState) -> BTreeMap<String, ParamValue> {
    let mut params = BTreeMap::new();
    for field in &form.fields {
        let value = match field.spec.kind {
            ParamKind::Radio => field
                .selected
                .and_then(|i| field.spec.options.get(i))
                .and_then(|opt| scalar_text(&opt.value))
                .map(|text| coerce(&text)),
            ParamKind::Number => {
                let trimmed = field.input.trim();
                trimmed.parse::<i64>().ok().map(ParamValue::Number)
            }
            ParamKind::Text => {
                let trimmed = field.input.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(ParamValue::Text(trimmed.to_string()))
                }
            }
        };
        if let Some(value) = value {
            params.insert(field.spec.name.clone(), value);
        }
    }
    params
}

/// Deterministic numeric coercion for radio option values
fn coerce(text: &str) -> ParamValue {
    match text.parse::<i64>() {
        Ok(n) => ParamValue::Number(n),
        Err(_) => ParamValue::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(json: &str) -> ParamSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn untouched_form_yields_only_radio_defaults() {
        let params = vec![
            spec(r#"{"name": "offset", "type": "number", "min": 1, "max": 25}"#),
            spec(r#"{"name": "customKey", "type": "text"}"#),
            spec(
                r#"{"name": "keySize", "type": "radio", "default": "128",
                    "options": [{"value": "128", "label": "128-bit"},
                                {"value": "192", "label": "192-bit"}]}"#,
            ),
        ];
        let collected = collect(&render(&params));
        assert_eq!(collected.len(), 1);
        assert_eq!(collected.get("keySize"), Some(&ParamValue::Number(128)));
    }

    #[test]
    fn empty_optional_number_is_omitted() {
        // CaesarCipher: optional offset left empty -> params = {}
        let params = vec![spec(
            r#"{"name": "offset", "type": "number", "min": 1, "max": 25}"#,
        )];
        let form = render(&params);
        assert!(collect(&form).is_empty());
    }

    #[test]
    fn radio_selection_coerces_numeric_text() {
        // AESCipher: keySize "256" selected, customKey left empty
        let params = vec![
            spec(
                r#"{"name": "keySize", "type": "radio", "default": "128",
                    "options": [{"value": "128", "label": "128-bit"},
                                {"value": "192", "label": "192-bit"},
                                {"value": "256", "label": "256-bit"}]}"#,
            ),
            spec(r#"{"name": "customKey", "type": "text"}"#),
        ];
        let mut form = render(&params);
        form.fields[0].selected = Some(2);
        let collected = collect(&form);
        assert_eq!(collected.len(), 1);
        assert_eq!(collected.get("keySize"), Some(&ParamValue::Number(256)));
        assert!(!collected.contains_key("customKey"));
    }

    #[test]
    fn named_radio_option_stays_text() {
        let params = vec![spec(
            r#"{"name": "mode", "type": "radio", "default": "CBC",
                "options": [{"value": "CBC", "label": "CBC"},
                            {"value": "ECB", "label": "ECB"}]}"#,
        )];
        let collected = collect(&render(&params));
        assert_eq!(collected.get("mode"), Some(&ParamValue::Text("CBC".into())));
    }

    #[test]
    fn text_values_are_trimmed_and_blank_omitted() {
        let params = vec![
            spec(r#"{"name": "customKey", "type": "text"}"#),
            spec(r#"{"name": "other", "type": "text"}"#),
        ];
        let mut form = render(&params);
        form.fields[0].input = "  secret  ".to_string();
        form.fields[1].input = "   ".to_string();
        let collected = collect(&form);
        assert_eq!(
            collected.get("customKey"),
            Some(&ParamValue::Text("secret".into()))
        );
        assert!(!collected.contains_key("other"));
    }

    #[test]
    fn number_field_filters_input_chars() {
        let params = vec![spec(r#"{"name": "offset", "type": "number"}"#)];
        let mut form = render(&params);
        for c in "-1a2b3".chars() {
            form.fields[0].push_char(c);
        }
        assert_eq!(form.fields[0].input, "-123");
        let collected = collect(&form);
        assert_eq!(collected.get("offset"), Some(&ParamValue::Number(-123)));
    }

    #[test]
    fn radio_cycle_wraps_both_directions() {
        let params = vec![spec(
            r#"{"name": "keySize", "type": "radio", "default": "128",
                "options": [{"value": "128", "label": "a"},
                            {"value": "192", "label": "b"},
                            {"value": "256", "label": "c"}]}"#,
        )];
        let mut form = render(&params);
        assert_eq!(form.fields[0].selected, Some(0));
        form.fields[0].cycle_option(false);
        assert_eq!(form.fields[0].selected, Some(2));
        form.fields[0].cycle_option(true);
        assert_eq!(form.fields[0].selected, Some(0));
    }

    #[test]
    fn switching_schemas_discards_state() {
        // render() of a new schema starts fresh; nothing carries over
        let first = vec![spec(r#"{"name": "offset", "type": "number"}"#)];
        let mut form = render(&first);
        form.fields[0].input = "5".to_string();

        let second = vec![spec(r#"{"name": "offset", "type": "number"}"#)];
        let fresh = render(&second);
        assert!(fresh.fields[0].input.is_empty());
    }
}
