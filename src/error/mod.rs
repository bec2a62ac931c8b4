//! Error handling for the book chat client.
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network and Stream errors
//! - **Unified Error Type**: `BookChatError` wraps them plus configuration errors
//! - **Result Type Alias**: `BookChatResult<T>`
//!
//! A backend `error` record is *not* an error here. It is decoded as
//! [`StreamEvent::Error`](crate::sse::StreamEvent::Error) and delivered to the
//! consumer like any other event.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, dropped body | Yes |
//! | Server | Backend errors (5xx), truncated streams | Yes |
//! | Client | Rejected requests (4xx) | No |
//! | Configuration | Bad base URL or timeout | No |

mod bookchat_error;
mod category;
mod network;
mod result;
mod stream;

pub use bookchat_error::BookChatError;
pub use category::ErrorCategory;
pub use network::{classify_http_error, NetworkError};
pub use result::BookChatResult;
pub use stream::StreamError;
