//! Result type alias for client operations.

use super::bookchat_error::BookChatError;

/// Type alias for Results using BookChatError.
pub type BookChatResult<T> = Result<T, BookChatError>;
