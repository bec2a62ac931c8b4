//! Stream event types and definitions
//!
//! Contains the StreamEvent enum delivered to consumers, the RecordLine
//! classification of raw lines, and the per-record parse error.

use crate::models::{ChatResponse, LogRecord};

/// Literal prefix marking a record line.
pub const RECORD_PREFIX: &str = "data: ";

/// Classification of one complete line of the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLine<'a> {
    /// Record payload with the prefix stripped and whitespace trimmed
    Record(&'a str),
    /// Prefixed line with nothing after the prefix
    Blank,
    /// Keep-alive, comment, separator or anything else without the prefix
    Ignored,
}

/// Payload of an in-band `error` event
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct ErrorEvent {
    pub message: String,
}

/// Typed events decoded from the chat stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Backend progress record
    Log(LogRecord),
    /// Terminal success with the final answer
    Done(ChatResponse),
    /// Terminal failure reported by the backend
    Error(ErrorEvent),
    /// Well-formed record with a discriminator this client does not know
    Unknown {
        kind: String,
        data: serde_json::Value,
    },
}

impl StreamEvent {
    /// Discriminator as it appears on the wire
    pub fn kind(&self) -> &str {
        match self {
            StreamEvent::Log(_) => "log",
            StreamEvent::Done(_) => "done",
            StreamEvent::Error(_) => "error",
            StreamEvent::Unknown { kind, .. } => kind,
        }
    }

    /// `done` and `error` end the meaningful part of a stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done(_) | StreamEvent::Error(_))
    }
}

/// Why a single record could not be turned into an event.
///
/// Never fatal: the decoder logs it and moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordParseError {
    /// The payload is not a JSON object with a discriminator
    #[error("invalid record JSON: {0}")]
    InvalidJson(String),
    /// Known discriminator, but the payload has the wrong shape
    #[error("invalid payload for '{kind}' record: {message}")]
    InvalidPayload { kind: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogCategory;

    #[test]
    fn test_kind_and_terminal() {
        let log = StreamEvent::Log(LogRecord {
            timestamp: "t".to_string(),
            category: LogCategory::ToolCall,
            summary: "s".to_string(),
            details: None,
        });
        assert_eq!(log.kind(), "log");
        assert!(!log.is_terminal());

        let done = StreamEvent::Done(ChatResponse {
            message: "m".to_string(),
            books: None,
        });
        assert_eq!(done.kind(), "done");
        assert!(done.is_terminal());

        let error = StreamEvent::Error(ErrorEvent {
            message: "x".to_string(),
        });
        assert_eq!(error.kind(), "error");
        assert!(error.is_terminal());

        let unknown = StreamEvent::Unknown {
            kind: "progress".to_string(),
            data: serde_json::Value::Null,
        };
        assert_eq!(unknown.kind(), "progress");
        assert!(!unknown.is_terminal());
    }

    #[test]
    fn test_parse_error_display() {
        assert_eq!(
            RecordParseError::InvalidJson("EOF".to_string()).to_string(),
            "invalid record JSON: EOF"
        );
        assert_eq!(
            RecordParseError::InvalidPayload {
                kind: "done".to_string(),
                message: "missing field `message`".to_string()
            }
            .to_string(),
            "invalid payload for 'done' record: missing field `message`"
        );
    }
}
