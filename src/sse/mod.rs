//! Chat stream decoding
//!
//! The backend streams its progress as newline-delimited records:
//! - `data: <json>` - one event, `{ "kind": ..., "data": ... }`
//! - anything else (`: keep-alive`, blank separators) - ignored
//!
//! # Module structure
//! - `events` - Event types (StreamEvent, RecordLine, RecordParseError)
//! - `payloads` - Record envelope deserialization
//! - `parser` - Line/record parsing and the incremental RecordDecoder
//! - `stream` - Async drivers (callback, pull stream, channel)
//! - `collect` - Folding events into a final answer

mod collect;
mod events;
mod parser;
mod payloads;
mod stream;

pub use collect::{CollectedChat, StreamCollector, StreamOutcome};
pub use events::{ErrorEvent, RecordLine, RecordParseError, StreamEvent, RECORD_PREFIX};
pub use parser::{parse_record_line, parse_stream_event, RecordDecoder};
pub use stream::{decode_stream, event_stream, forward_events, StreamSummary};
