//! Streaming-related error types.
//!
//! These are transport-level failures of a chat stream. A backend `error`
//! event is not one of them: it arrives in-band as a regular stream event.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamError {
    /// The response body could not be opened at all.
    TransportUnavailable {
        message: String,
    },

    /// A chunk read failed after the stream had started.
    ReadFailed {
        message: String,
    },

    /// The body ended without a `done` or `error` event.
    MissingTerminal,
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StreamError::TransportUnavailable { .. } | StreamError::ReadFailed { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::TransportUnavailable { .. } => {
                "Could not open a connection to the book search server.".to_string()
            }
            StreamError::ReadFailed { .. } => {
                "The connection was lost while the answer was streaming. Please try again."
                    .to_string()
            }
            StreamError::MissingTerminal => {
                "The server stopped responding before finishing its answer.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::TransportUnavailable { .. } => "E_STREAM_UNAVAILABLE",
            StreamError::ReadFailed { .. } => "E_STREAM_READ",
            StreamError::MissingTerminal => "E_STREAM_INCOMPLETE",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::TransportUnavailable { message } => {
                write!(f, "Stream transport unavailable: {}", message)
            }
            StreamError::ReadFailed { message } => write!(f, "Stream read failed: {}", message),
            StreamError::MissingTerminal => write!(f, "Stream ended without a terminal event"),
        }
    }
}

impl std::error::Error for StreamError {}
