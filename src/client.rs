//! HTTP client for the cipher playground API
//!
//! Thin `reqwest` wrapper around the three collaborator endpoints. The
//! interesting part is `interpret`, which folds the two independent failure
//! signals (HTTP status and the body's `success` flag) into one outcome -
//! both must be checked, and both produce the same kind of failure.

use crate::schema::{ExecuteResponse, ExtraInfo, OperationRequest, ResultPayload, Technique, TechniqueList};
use std::fmt;

/// Catalog or technique-info fetch failure
///
/// Non-fatal by policy: the caller degrades (placeholder listing, generic
/// description) instead of blocking the UI.
#[derive(Debug)]
pub enum CatalogError {
    /// Collaborator unreachable
    Unreachable(String),
    /// Response arrived but could not be decoded
    Malformed(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreachable(msg) => write!(f, "Server unreachable: {}", msg),
            Self::Malformed(msg) => write!(f, "Malformed catalog response: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Execute request failure
#[derive(Debug)]
pub enum ExecuteError {
    /// No response received; the cause is logged, never shown to the user
    Transport(String),
    /// A response arrived and signalled failure (HTTP status or success flag)
    Rejected(String),
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "Transport failure: {}", msg),
            Self::Rejected(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ExecuteError {}

/// Decoded success payload of an execute call
#[derive(Debug, Clone)]
pub struct ExecuteSuccess {
    pub result: ResultPayload,
    pub extra_info: ExtraInfo,
}

/// Client for the playground's HTTP surface
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// `GET /api/techniques` - ordered technique names
    pub async fn list_techniques(&self) -> Result<Vec<String>, CatalogError> {
        let url = format!("{}/api/techniques", self.base_url);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Unreachable(e.to_string()))?;
        let list: TechniqueList = resp
            .json()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))?;
        tracing::debug!("Loaded {} techniques", list.techniques.len());
        Ok(list.techniques)
    }

    /// `GET /api/technique_info/{name}` - description and parameter schema
    pub async fn technique_info(&self, name: &str) -> Result<Technique, CatalogError> {
        let url = format!("{}/api/technique_info/{}", self.base_url, name);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Unreachable(e.to_string()))?;
        resp.json()
            .await
            .map_err(|e| CatalogError::Malformed(e.to_string()))
    }

    /// `POST /api/execute` - run an operation against the collaborator
    pub async fn execute(&self, request: &OperationRequest) -> Result<ExecuteSuccess, ExecuteError> {
        let url = format!("{}/api/execute", self.base_url);
        tracing::debug!(
            technique = %request.technique,
            operation = ?request.operation,
            "Submitting operation"
        );
        let resp = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ExecuteError::Transport(e.to_string()))?;
        let status_ok = resp.status().is_success();
        let body = resp.json::<ExecuteResponse>().await.ok();
        interpret(status_ok, body)
    }
}

/// Fold HTTP status and body into a single execute outcome
///
/// A failing status uses the body's `error` when one decoded; a 2xx body with
/// `success: false` is treated identically. A 2xx body that cannot be decoded
/// or lacks a `result` is a rejection, not a transport failure - a response
/// was received.
fn interpret(
    status_ok: bool,
    body: Option<ExecuteResponse>,
) -> Result<ExecuteSuccess, ExecuteError> {
    if !status_ok {
        let message = body
            .and_then(|b| b.error)
            .unwrap_or_else(|| "An error occurred".to_string());
        return Err(ExecuteError::Rejected(message));
    }
    let Some(body) = body else {
        return Err(ExecuteError::Rejected(
            "Malformed response from server".to_string(),
        ));
    };
    if !body.success {
        let message = body.error.unwrap_or_else(|| "Unknown error".to_string());
        return Err(ExecuteError::Rejected(message));
    }
    let Some(result) = body.result else {
        return Err(ExecuteError::Rejected(
            "Malformed response from server".to_string(),
        ));
    };
    Ok(ExecuteSuccess {
        result,
        extra_info: body.extra_info.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(json: &str) -> Option<ExecuteResponse> {
        Some(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn failing_status_uses_body_error() {
        let out = interpret(false, body(r#"{"success": false, "error": "invalid offset"}"#));
        match out {
            Err(ExecuteError::Rejected(msg)) => assert_eq!(msg, "invalid offset"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn failing_status_without_body_is_generic() {
        let out = interpret(false, None);
        match out {
            Err(ExecuteError::Rejected(msg)) => assert_eq!(msg, "An error occurred"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn logical_failure_on_ok_status_is_identical() {
        let out = interpret(true, body(r#"{"success": false, "error": "invalid offset"}"#));
        match out {
            Err(ExecuteError::Rejected(msg)) => assert_eq!(msg, "invalid offset"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn logical_failure_without_message_is_generic() {
        let out = interpret(true, body(r#"{"success": false}"#));
        match out {
            Err(ExecuteError::Rejected(msg)) => assert_eq!(msg, "Unknown error"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn success_carries_result_and_extra_info() {
        let out = interpret(
            true,
            body(r#"{"success": true, "result": "XYZ", "extra_info": {"key_hex": "AB12"}}"#),
        )
        .unwrap();
        assert_eq!(out.result, ResultPayload::Text("XYZ".into()));
        assert_eq!(out.extra_info.key_hex.as_deref(), Some("AB12"));
    }

    #[test]
    fn success_without_result_is_rejected() {
        let out = interpret(true, body(r#"{"success": true}"#));
        assert!(matches!(out, Err(ExecuteError::Rejected(_))));
    }
}
