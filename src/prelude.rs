//! Commonly used types in one import.
//!
//! ```ignore
//! use bookchat::prelude::*;
//! ```

pub use crate::client::{BackendClient, EventStream};
pub use crate::config::ClientConfig;
pub use crate::conversation::Conversation;
pub use crate::error::{BookChatError, BookChatResult, NetworkError, StreamError};
pub use crate::models::{
    Book, BookSearchParams, BookSearchResponse, ChatMessage, ChatRequest, ChatResponse, LogCategory,
    LogRecord, Role,
};
pub use crate::sse::{
    decode_stream, event_stream, forward_events, CollectedChat, RecordDecoder, StreamCollector,
    StreamEvent, StreamOutcome, StreamSummary,
};
