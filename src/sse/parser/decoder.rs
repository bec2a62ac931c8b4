//! Incremental chunk-to-event decoder.

use tracing::{debug, warn};

use super::{parse_record_line, parse_stream_event};
use crate::sse::events::{RecordLine, StreamEvent};

/// Stateful decoder that turns arbitrarily split body chunks into events.
///
/// Holds the text not yet terminated by a newline, plus up to three bytes of
/// a UTF-8 sequence split across chunks. One decoder serves one stream.
#[derive(Debug, Default)]
pub struct RecordDecoder {
    /// Decoded text not yet split into complete lines
    buffer: String,
    /// Incomplete trailing UTF-8 sequence from the previous chunk
    pending: Vec<u8>,
}

impl RecordDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, invoking `on_event` for each complete record in order.
    ///
    /// Returns the number of record lines that could not be parsed.
    pub fn feed_with<F>(&mut self, chunk: &[u8], mut on_event: F) -> usize
    where
        F: FnMut(StreamEvent),
    {
        self.push_utf8(chunk);

        let mut malformed = 0;
        let mut consumed = 0;
        while let Some(pos) = self.buffer[consumed..].find('\n') {
            let line = &self.buffer[consumed..consumed + pos];
            consumed += pos + 1;

            if let RecordLine::Record(payload) = parse_record_line(line) {
                match parse_stream_event(payload) {
                    Ok(event) => on_event(event),
                    Err(e) => {
                        malformed += 1;
                        warn!(error = %e, "skipping malformed stream record");
                    }
                }
            }
        }
        self.buffer.drain(..consumed);
        malformed
    }

    /// Feed one chunk and collect the events it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        self.feed_with(chunk, |event| events.push(event));
        events
    }

    /// Number of bytes held back waiting for a newline.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len() + self.pending.len()
    }

    /// End of stream: drop any unterminated line.
    ///
    /// Returns how many bytes were discarded.
    pub fn finish(self) -> usize {
        let discarded = self.buffered_len();
        if discarded > 0 {
            debug!(bytes = discarded, "discarding unterminated trailing line");
        }
        discarded
    }

    /// Decode `chunk` onto the text buffer, carrying a split sequence forward.
    fn push_utf8(&mut self, chunk: &[u8]) {
        let joined;
        let mut input: &[u8] = if self.pending.is_empty() {
            chunk
        } else {
            let mut bytes = std::mem::take(&mut self.pending);
            bytes.extend_from_slice(chunk);
            joined = bytes;
            &joined
        };

        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        self.buffer.push_str(text);
                    }
                    match err.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            input = &rest[len..];
                        }
                        None => {
                            // Sequence may complete in the next chunk
                            self.pending = rest.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }
}
