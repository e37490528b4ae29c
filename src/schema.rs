// Wire schema for the cipher playground API
//
// These types mirror the JSON contract exactly:
// - GET  /api/techniques        -> TechniqueList
// - GET  /api/technique_info/N  -> Technique
// - POST /api/execute           -> OperationRequest / ExecuteResponse
//
// The response's `result` field is a string for E/D operations and a list of
// candidate strings for brute force. That split is a first-class enum here so
// the rendering path never inspects JSON types at runtime.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Response body of `GET /api/techniques`
#[derive(Debug, Clone, Deserialize)]
pub struct TechniqueList {
    pub techniques: Vec<String>,
}

/// A technique's description and declarative parameter schema
///
/// Retrieved on demand when the selection changes and discarded when it
/// changes again - the client never caches these.
#[derive(Debug, Clone, Deserialize)]
pub struct Technique {
    pub description: String,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

/// Input control type for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    #[default]
    Text,
    Number,
    Radio,
}

/// One option of a radio parameter
///
/// Option values arrive as JSON strings or numbers depending on the technique
/// (a key-size choice vs. a named-mode choice), so the raw value is kept and
/// compared on its canonical scalar text.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamOption {
    pub value: serde_json::Value,
    pub label: String,
}

/// Declarative description of one configurable input a technique accepts
#[derive(Debug, Clone, Deserialize)]
pub struct ParamSpec {
    /// Collection key, unique within a technique's param list
    pub name: String,
    /// Display text; falls back to `name` when absent
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ParamKind,
    /// Required non-empty for `radio`
    #[serde(default)]
    pub options: Vec<ParamOption>,
    /// Matched against `options` to pre-select (radio), or placeholder text
    /// (text/number). The server also emits `placeholder` for the latter.
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub placeholder: Option<String>,
    /// Inclusive bounds, `number` only, display constraints
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub required: bool,
}

impl ParamSpec {
    /// Display label, defaulting to the field name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Placeholder text for text/number inputs
    pub fn placeholder_text(&self) -> Option<String> {
        if let Some(p) = &self.placeholder {
            if !p.is_empty() {
                return Some(p.clone());
            }
        }
        self.default.as_ref().and_then(scalar_text)
    }

    /// Index of the option pre-selected by `default`, if any
    ///
    /// At most one option matches (schema invariant); comparison is on
    /// canonical scalar text so "128" matches the number 128.
    pub fn default_option(&self) -> Option<usize> {
        let wanted = self.default.as_ref().and_then(scalar_text)?;
        self.options
            .iter()
            .position(|opt| scalar_text(&opt.value).as_deref() == Some(wanted.as_str()))
    }
}

/// Canonical text form of a JSON scalar (string or number)
///
/// Non-scalar values yield None and are treated as absent.
pub fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Operation mode - selects how the input text is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Operation {
    #[default]
    #[serde(rename = "E")]
    Encrypt,
    #[serde(rename = "D")]
    Decrypt,
    #[serde(rename = "B")]
    BruteForce,
}

impl Operation {
    pub fn all() -> &'static [Operation] {
        &[Operation::Encrypt, Operation::Decrypt, Operation::BruteForce]
    }

    /// Tab label
    pub fn title(&self) -> &'static str {
        match self {
            Operation::Encrypt => "Encrypt",
            Operation::Decrypt => "Decrypt",
            Operation::BruteForce => "Brute force",
        }
    }

    /// Input-area placeholder for this mode
    pub fn input_placeholder(&self) -> &'static str {
        match self {
            Operation::Encrypt => "Enter plaintext to encrypt...",
            Operation::Decrypt => "Enter ciphertext to decrypt...",
            Operation::BruteForce => "Enter ciphertext to brute force...",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A collected parameter value
///
/// Serializes untagged: numbers as JSON numbers, text as JSON strings,
/// matching what the server-side technique constructors expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(i64),
    Text(String),
}

/// Request body of `POST /api/execute`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRequest {
    pub technique: String,
    pub operation: Operation,
    pub input_text: String,
    /// Omits fields the user left empty so the server applies its own
    /// defaults (e.g. generate a random key)
    pub params: BTreeMap<String, ParamValue>,
}

/// Successful `result` payload: a single transformed string, or an ordered
/// sequence of brute-force candidates
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ResultPayload {
    Text(String),
    Candidates(Vec<String>),
}

/// Recognized auxiliary facts returned alongside a result
///
/// Unrecognized keys are ignored by deserialization, not errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtraInfo {
    #[serde(default)]
    pub key_hex: Option<String>,
    #[serde(default)]
    pub key_utf8: Option<String>,
    #[serde(default)]
    pub key_size: Option<u64>,
    #[serde(default)]
    pub num_rounds: Option<u64>,
}

/// Response body of `POST /api/execute`
///
/// Transport success and logical success are independent signals: a 2xx
/// response with `success: false` is a failure, and a non-2xx response may
/// still carry a usable `error` body.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecuteResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Option<ResultPayload>,
    #[serde(default)]
    pub extra_info: Option<ExtraInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_payload_decodes_string_and_list() {
        let single: ExecuteResponse =
            serde_json::from_str(r#"{"success": true, "result": "XYZ"}"#).unwrap();
        assert_eq!(single.result, Some(ResultPayload::Text("XYZ".into())));

        let list: ExecuteResponse =
            serde_json::from_str(r#"{"success": true, "result": ["a", "b", "c"]}"#).unwrap();
        assert_eq!(
            list.result,
            Some(ResultPayload::Candidates(vec![
                "a".into(),
                "b".into(),
                "c".into()
            ]))
        );
    }

    #[test]
    fn extra_info_ignores_unrecognized_keys() {
        let resp: ExecuteResponse = serde_json::from_str(
            r#"{"success": true, "result": "x",
                "extra_info": {"key_hex": "AB12", "iv_hex": "00", "mode": "CBC"}}"#,
        )
        .unwrap();
        let extra = resp.extra_info.unwrap();
        assert_eq!(extra.key_hex.as_deref(), Some("AB12"));
        assert!(extra.key_utf8.is_none());
        assert!(extra.key_size.is_none());
    }

    #[test]
    fn param_spec_defaults() {
        let spec: ParamSpec = serde_json::from_str(r#"{"name": "offset"}"#).unwrap();
        assert_eq!(spec.kind, ParamKind::Text);
        assert_eq!(spec.display_label(), "offset");
        assert!(!spec.required);
        assert!(spec.options.is_empty());
    }

    #[test]
    fn default_option_matches_numeric_and_string_values() {
        let spec: ParamSpec = serde_json::from_str(
            r#"{"name": "keySize", "type": "radio",
                "options": [{"value": 128, "label": "128-bit"},
                            {"value": 192, "label": "192-bit"},
                            {"value": 256, "label": "256-bit"}],
                "default": "128"}"#,
        )
        .unwrap();
        assert_eq!(spec.default_option(), Some(0));

        let named: ParamSpec = serde_json::from_str(
            r#"{"name": "mode", "type": "radio",
                "options": [{"value": "CBC", "label": "CBC"},
                            {"value": "ECB", "label": "ECB"}],
                "default": "ECB"}"#,
        )
        .unwrap();
        assert_eq!(named.default_option(), Some(1));
    }

    #[test]
    fn placeholder_falls_back_to_default_text() {
        let spec: ParamSpec = serde_json::from_str(
            r#"{"name": "customKey", "type": "text", "placeholder": "Leave empty for random"}"#,
        )
        .unwrap();
        assert_eq!(
            spec.placeholder_text().as_deref(),
            Some("Leave empty for random")
        );

        let via_default: ParamSpec =
            serde_json::from_str(r#"{"name": "offset", "type": "number", "default": "1"}"#)
                .unwrap();
        assert_eq!(via_default.placeholder_text().as_deref(), Some("1"));
    }

    #[test]
    fn operation_request_serializes_wire_format() {
        let mut params = BTreeMap::new();
        params.insert("keySize".to_string(), ParamValue::Number(256));
        params.insert("mode".to_string(), ParamValue::Text("CBC".into()));
        let req = OperationRequest {
            technique: "AESCipher".into(),
            operation: Operation::Encrypt,
            input_text: "hello".into(),
            params,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["operation"], "E");
        assert_eq!(json["params"]["keySize"], 256);
        assert_eq!(json["params"]["mode"], "CBC");
    }
}
