use serde::{Deserialize, Serialize};

use super::Book;

/// Role of a message in a conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One prior turn sent back to the backend as history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Request body for both `/chat` and `/chat/stream`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    /// The new user message
    pub message: String,
    /// Every earlier turn, oldest first
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Create a request with no prior history
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            history: Vec::new(),
        }
    }

    /// Set the conversation history (builder pattern)
    pub fn with_history(mut self, history: Vec<ChatMessage>) -> Self {
        self.history = history;
        self
    }
}

/// Final answer: the non-streaming response body and the `done` event payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatResponse {
    pub message: String,
    /// `None` when the backend did not run a search
    #[serde(default)]
    pub books: Option<Vec<Book>>,
}

impl ChatResponse {
    /// Books found for this answer, empty when no search ran.
    pub fn books(&self) -> &[Book] {
        self.books.as_deref().unwrap_or(&[])
    }
}
