//! Fold a stream of events into a single answer.

use tracing::debug;

use crate::error::StreamError;
use crate::models::{ChatResponse, LogRecord};
use crate::sse::events::StreamEvent;

/// How a stream ended.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamOutcome {
    /// `done` event
    Completed(ChatResponse),
    /// In-band `error` event from the backend
    Failed { message: String },
}

/// Everything a finished stream produced.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedChat {
    pub logs: Vec<LogRecord>,
    pub outcome: StreamOutcome,
    /// Records with a discriminator this client does not know
    pub unknown_events: usize,
}

impl CollectedChat {
    /// The final answer, if the backend completed.
    pub fn response(&self) -> Option<&ChatResponse> {
        match &self.outcome {
            StreamOutcome::Completed(response) => Some(response),
            StreamOutcome::Failed { .. } => None,
        }
    }

    /// Text to show the user: the answer or the backend's error message.
    pub fn display_message(&self) -> &str {
        match &self.outcome {
            StreamOutcome::Completed(response) => &response.message,
            StreamOutcome::Failed { message } => message,
        }
    }
}

/// Accumulates events until the first terminal one.
///
/// Anything after the first `done`/`error` is ignored.
#[derive(Debug, Default)]
pub struct StreamCollector {
    logs: Vec<LogRecord>,
    outcome: Option<StreamOutcome>,
    unknown_events: usize,
}

impl StreamCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, event: StreamEvent) {
        if self.outcome.is_some() {
            debug!(kind = event.kind(), "ignoring event after terminal");
            return;
        }
        match event {
            StreamEvent::Log(record) => self.logs.push(record),
            StreamEvent::Done(response) => self.outcome = Some(StreamOutcome::Completed(response)),
            StreamEvent::Error(error) => {
                self.outcome = Some(StreamOutcome::Failed {
                    message: error.message,
                })
            }
            StreamEvent::Unknown { kind, .. } => {
                debug!(kind = %kind, "unknown event kind");
                self.unknown_events += 1;
            }
        }
    }

    pub fn logs(&self) -> &[LogRecord] {
        &self.logs
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Fails with [`StreamError::MissingTerminal`] if no terminal event arrived.
    pub fn finish(self) -> Result<CollectedChat, StreamError> {
        let outcome = self.outcome.ok_or(StreamError::MissingTerminal)?;
        Ok(CollectedChat {
            logs: self.logs,
            outcome,
            unknown_events: self.unknown_events,
        })
    }
}
