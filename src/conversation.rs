//! Conversation history kept between chat turns.

use crate::models::{ChatMessage, ChatRequest, Role};
use crate::sse::{CollectedChat, StreamOutcome};

/// Ordered user/assistant turns of one chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    turns: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the request for a new user message, carrying every prior turn.
    pub fn request_for(&self, message: impl Into<String>) -> ChatRequest {
        ChatRequest::new(message).with_history(self.turns.clone())
    }

    /// Append a completed user/assistant pair.
    pub fn record_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(ChatMessage::user(question));
        self.turns.push(ChatMessage::assistant(answer));
    }

    /// Record the result of a streamed turn.
    ///
    /// Only a completed answer is kept; a failed turn leaves history untouched
    /// so the question can be asked again. Returns whether anything was added.
    pub fn record_collected(&mut self, question: impl Into<String>, chat: &CollectedChat) -> bool {
        match &chat.outcome {
            StreamOutcome::Completed(response) => {
                self.record_exchange(question, response.message.clone());
                true
            }
            StreamOutcome::Failed { .. } => false,
        }
    }

    pub fn turns(&self) -> &[ChatMessage] {
        &self.turns
    }

    /// Number of completed exchanges.
    pub fn exchange_count(&self) -> usize {
        self.turns.iter().filter(|m| m.role == Role::Assistant).count()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
