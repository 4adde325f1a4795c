//! Exchange transport types and error definitions.

use serde_json::Value;
use thiserror::Error;

/// Errors building the exchange client.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Endpoint URL could not be parsed.
    #[error("Invalid exchange URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Payload could not be serialized.
    #[error("Payload serialization failed: {0}")]
    Serialize(String),
}

/// Result type for exchange operations.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Classification of a single submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// HTTP 200 with a JSON confirmation body.
    Success(Value),
    /// The endpoint answered with anything other than a parsable 200.
    RemoteRejection { status: u16, body: String },
    /// No usable response: refused, timed out, or the body could not be read.
    TransportFailure(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionOutcome::Success(_) => "succeeded",
            SubmissionOutcome::RemoteRejection { .. } => "rejected",
            SubmissionOutcome::TransportFailure(_) => "failed",
        }
    }
}

/// Whether a confirmation body reports an application-level error.
///
/// The venue answers 200 with `{"status": "err", "response": "..."}` for
/// requests it parsed but refused.
pub fn confirmation_error(body: &Value) -> Option<String> {
    match body.get("status").and_then(Value::as_str) {
        Some("err") => Some(
            body.get("response")
                .map(|r| match r {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_else(|| "unspecified error".to_string()),
        ),
        _ => None,
    }
}
