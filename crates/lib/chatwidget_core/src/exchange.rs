//! Wire types and outcome of one request/response cycle with the chat endpoint.
//!
//! Request: `POST` with `Content-Type: application/json` and body
//! `{"message": "<input text>"}`. Reply: JSON `{"response": "<bot text>"}`.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Body of the outbound request.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Status and body of a reply, before interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawReply {
    pub status: u16,
    pub body: String,
}

impl RawReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP status level.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Chat request failed: {0}")]
    Request(String),

    #[error("Chat response parse error: {0}")]
    Decode(String),
}

/// Result of one exchange as seen by the rendering step.
#[derive(Debug)]
pub enum ExchangeOutcome {
    /// Decoded JSON body.
    Success(Value),
    /// Non-2xx status (only produced when status checking is on).
    HttpError(u16),
    /// Network failure or undecodable body.
    TransportError(TransportError),
}

impl ExchangeOutcome {
    /// Interpret a transport result.
    ///
    /// With `check_status` off, a non-2xx reply is decoded like any other and
    /// only fails if its body is not JSON.
    pub fn resolve(result: Result<RawReply, TransportError>, check_status: bool) -> Self {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => return ExchangeOutcome::TransportError(e),
        };

        if check_status && !raw.is_success() {
            return ExchangeOutcome::HttpError(raw.status);
        }

        match serde_json::from_str(&raw.body) {
            Ok(payload) => ExchangeOutcome::Success(payload),
            Err(e) => ExchangeOutcome::TransportError(TransportError::Decode(e.to_string())),
        }
    }
}

/// Bot text carried by a reply payload.
///
/// `None` when the content is absent: a missing `response`, `null`, or an
/// empty string. A non-object payload has no `response`. Non-string values
/// render as JSON.
pub fn response_text(payload: &Value) -> Option<String> {
    match payload.get("response") {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        None | Some(Value::Null) | Some(Value::String(_)) => None,
        Some(other) => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reply(status: u16, body: &str) -> Result<RawReply, TransportError> {
        Ok(RawReply {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn request_body_has_message_field() {
        let body = serde_json::to_value(ChatRequest { message: "  hello " }).unwrap();
        assert_eq!(body, json!({ "message": "  hello " }));
    }

    #[test]
    fn success_decodes_payload() {
        match ExchangeOutcome::resolve(reply(200, r#"{"response":"hi there"}"#), true) {
            ExchangeOutcome::Success(payload) => assert_eq!(payload["response"], "hi there"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn non_2xx_is_http_error_when_checked() {
        assert!(matches!(
            ExchangeOutcome::resolve(reply(500, r#"{"error":"boom"}"#), true),
            ExchangeOutcome::HttpError(500)
        ));
        assert!(matches!(
            ExchangeOutcome::resolve(reply(302, ""), true),
            ExchangeOutcome::HttpError(302)
        ));
    }

    #[test]
    fn non_2xx_is_decoded_when_unchecked() {
        match ExchangeOutcome::resolve(reply(500, r#"{"response":"degraded"}"#), false) {
            ExchangeOutcome::Success(payload) => assert_eq!(payload["response"], "degraded"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_transport_error() {
        assert!(matches!(
            ExchangeOutcome::resolve(reply(200, "<html>oops</html>"), true),
            ExchangeOutcome::TransportError(TransportError::Decode(_))
        ));
    }

    #[test]
    fn request_failure_passes_through() {
        let outcome = ExchangeOutcome::resolve(
            Err(TransportError::Request("connection refused".into())),
            true,
        );
        assert!(matches!(
            outcome,
            ExchangeOutcome::TransportError(TransportError::Request(_))
        ));
    }

    #[test]
    fn response_text_prefers_non_empty_string() {
        let text = response_text(&json!({"response": "hi"}));
        assert_eq!(text.as_deref(), Some("hi"));
    }

    #[test]
    fn response_text_is_absent_for_missing_null_or_empty() {
        assert_eq!(response_text(&json!({})), None);
        assert_eq!(response_text(&json!({"response": null})), None);
        assert_eq!(response_text(&json!({"response": ""})), None);
        assert_eq!(response_text(&json!(["response"])), None);
    }

    #[test]
    fn response_text_renders_other_values_as_json() {
        let text = response_text(&json!({"response": 42}));
        assert_eq!(text.as_deref(), Some("42"));
    }
}
