//! Async drivers that run a [`RecordDecoder`] over a chunked body.
//!
//! Three shapes of the same loop:
//! - [`decode_stream`] pushes every event into a callback
//! - [`event_stream`] is pulled by the caller; dropping it abandons the body
//! - [`forward_events`] feeds a channel and stops when the receiver goes away

use std::collections::VecDeque;
use std::fmt::Display;

use futures_util::stream::{self, Stream, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::StreamError;
use crate::sse::events::StreamEvent;
use crate::sse::parser::RecordDecoder;

/// Counters for one finished stream invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Events handed to the consumer
    pub delivered: usize,
    /// Record lines skipped because they failed to parse
    pub malformed: usize,
    /// Unterminated bytes dropped at end of stream
    pub discarded_bytes: usize,
    /// Whether a `done` or `error` event was seen
    pub saw_terminal: bool,
}

impl StreamSummary {
    fn record(&mut self, event: &StreamEvent) {
        self.note(event.kind(), event.is_terminal());
    }

    fn note(&mut self, kind: &str, terminal: bool) {
        if self.saw_terminal {
            warn!(kind, "record after terminal event");
        }
        self.delivered += 1;
        self.saw_terminal |= terminal;
    }
}

/// Decode `source` to the end, invoking `on_event` once per record in order.
///
/// Malformed records are skipped. A failed chunk read stops the loop and is
/// returned as [`StreamError::ReadFailed`]; events decoded before the failure
/// have already been delivered.
pub async fn decode_stream<S, B, E, F>(source: S, mut on_event: F) -> Result<StreamSummary, StreamError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
    F: FnMut(StreamEvent),
{
    let mut source = std::pin::pin!(source);
    let mut decoder = RecordDecoder::new();
    let mut summary = StreamSummary::default();

    while let Some(chunk) = source.next().await {
        let chunk = chunk.map_err(|e| StreamError::ReadFailed {
            message: e.to_string(),
        })?;
        let malformed = decoder.feed_with(chunk.as_ref(), |event| {
            summary.record(&event);
            on_event(event);
        });
        summary.malformed += malformed;
    }

    summary.discarded_bytes = decoder.finish();
    debug!(
        delivered = summary.delivered,
        malformed = summary.malformed,
        terminal = summary.saw_terminal,
        "stream ended"
    );
    Ok(summary)
}

/// Pull-based form: a stream of decoded events.
///
/// The returned stream owns `source`; dropping it early drops the body. After
/// a read failure it yields that error once and then ends.
pub fn event_stream<S, B, E>(source: S) -> impl Stream<Item = Result<StreamEvent, StreamError>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Display,
{
    struct State<S> {
        source: Option<S>,
        decoder: RecordDecoder,
        ready: VecDeque<StreamEvent>,
        saw_terminal: bool,
    }

    let state = State {
        source: Some(source),
        decoder: RecordDecoder::new(),
        ready: VecDeque::new(),
        saw_terminal: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            // First, hand out anything already decoded
            if let Some(event) = state.ready.pop_front() {
                if state.saw_terminal {
                    warn!(kind = event.kind(), "record after terminal event");
                }
                state.saw_terminal |= event.is_terminal();
                return Some((Ok(event), state));
            }

            let source = state.source.as_mut()?;
            match source.next().await {
                Some(Ok(chunk)) => {
                    let ready = &mut state.ready;
                    state.decoder.feed_with(chunk.as_ref(), |event| ready.push_back(event));
                }
                Some(Err(e)) => {
                    state.source = None;
                    let err = StreamError::ReadFailed {
                        message: e.to_string(),
                    };
                    return Some((Err(err), state));
                }
                None => {
                    state.source = None;
                    std::mem::take(&mut state.decoder).finish();
                    return None;
                }
            }
        }
    })
}

/// Channel form: decode `source` and send each event to `sender`.
///
/// Stops reading as soon as the receiver is dropped and returns what was
/// delivered up to that point. The summary counts the same things as
/// [`decode_stream`] does.
pub async fn forward_events<S, B, E>(
    source: S,
    sender: mpsc::Sender<StreamEvent>,
) -> Result<StreamSummary, StreamError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut source = std::pin::pin!(source);
    let mut decoder = RecordDecoder::new();
    let mut summary = StreamSummary::default();
    let mut ready = Vec::new();

    while let Some(chunk) = source.next().await {
        let chunk = chunk.map_err(|e| StreamError::ReadFailed {
            message: e.to_string(),
        })?;
        summary.malformed += decoder.feed_with(chunk.as_ref(), |event| ready.push(event));

        for event in ready.drain(..) {
            let kind = event.kind().to_string();
            let terminal = event.is_terminal();
            if sender.send(event).await.is_err() {
                debug!(delivered = summary.delivered, "event receiver dropped, abandoning stream");
                return Ok(summary);
            }
            summary.note(&kind, terminal);
        }
    }

    summary.discarded_bytes = decoder.finish();
    debug!(
        delivered = summary.delivered,
        malformed = summary.malformed,
        terminal = summary.saw_terminal,
        "stream forwarded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn ok_chunks(chunks: &[&str]) -> Vec<Result<Bytes, String>> {
        chunks
            .iter()
            .map(|c| Ok(Bytes::copy_from_slice(c.as_bytes())))
            .collect()
    }

    const DONE: &str = "data: {\"kind\":\"done\",\"data\":{\"message\":\"hello\",\"books\":null}}\n";
    const LOG: &str =
        "data: {\"kind\":\"log\",\"data\":{\"timestamp\":\"t\",\"type\":\"tool_call\",\"summary\":\"s\"}}\n";

    #[tokio::test]
    async fn test_decode_stream_delivers_in_order() {
        let source = stream::iter(ok_chunks(&["data: {\"ki", &LOG[10..], DONE]));
        let mut kinds = Vec::new();
        let summary = decode_stream(source, |e| kinds.push(e.kind().to_string()))
            .await
            .unwrap();
        assert_eq!(kinds, vec!["log", "done"]);
        assert_eq!(summary.delivered, 2);
        assert_eq!(summary.malformed, 0);
        assert!(summary.saw_terminal);
    }

    #[tokio::test]
    async fn test_decode_stream_read_failure_is_fatal() {
        let chunks: Vec<Result<Bytes, String>> = vec![
            Ok(Bytes::from(LOG)),
            Err("connection reset".to_string()),
            Ok(Bytes::from(DONE)),
        ];
        let mut kinds = Vec::new();
        let result = decode_stream(stream::iter(chunks), |e| kinds.push(e.kind().to_string())).await;

        assert_eq!(kinds, vec!["log"]);
        match result {
            Err(StreamError::ReadFailed { message }) => assert_eq!(message, "connection reset"),
            other => panic!("Expected ReadFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_decode_stream_reports_discarded_tail() {
        let source = stream::iter(ok_chunks(&[LOG, "data: {\"kind\":\"lo"]));
        let summary = decode_stream(source, |_| {}).await.unwrap();
        assert_eq!(summary.delivered, 1);
        assert_eq!(summary.discarded_bytes, "data: {\"kind\":\"lo".len());
        assert!(!summary.saw_terminal);
    }

    #[tokio::test]
    async fn test_event_stream_yields_events_then_ends() {
        let source = stream::iter(ok_chunks(&[LOG, DONE]));
        let events: Vec<_> = event_stream(source).collect().await;
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Ok(StreamEvent::Log(_))));
        assert!(matches!(events[1], Ok(StreamEvent::Done(_))));
    }

    #[tokio::test]
    async fn test_event_stream_error_then_end() {
        let chunks: Vec<Result<Bytes, String>> =
            vec![Ok(Bytes::from(LOG)), Err("boom".to_string()), Ok(Bytes::from(DONE))];
        let events: Vec<_> = event_stream(stream::iter(chunks)).collect().await;
        assert_eq!(events.len(), 2);
        assert!(events[0].is_ok());
        assert!(matches!(events[1], Err(StreamError::ReadFailed { .. })));
    }

    #[tokio::test]
    async fn test_event_stream_early_drop_stops_reading() {
        let (tx, rx) = mpsc::channel::<Result<Bytes, String>>(4);
        tx.send(Ok(Bytes::from(LOG))).await.unwrap();

        let source = futures::stream::unfold(rx, |mut rx| async move {
            rx.recv().await.map(|item| (item, rx))
        });
        let mut events = Box::pin(event_stream(Box::pin(source)));
        let first = events.next().await.unwrap().unwrap();
        assert_eq!(first.kind(), "log");

        drop(events);
        // The source (and its receiver) went with the stream
        assert!(tx.send(Ok(Bytes::from(DONE))).await.is_err());
    }

    #[tokio::test]
    async fn test_forward_events_through_channel() {
        let (tx, mut rx) = mpsc::channel(8);
        let source = stream::iter(ok_chunks(&[LOG, DONE]));
        let summary = forward_events(source, tx).await.unwrap();
        assert_eq!(summary.delivered, 2);
        assert!(summary.saw_terminal);

        assert_eq!(rx.recv().await.unwrap().kind(), "log");
        assert_eq!(rx.recv().await.unwrap().kind(), "done");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_forward_events_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let source = stream::iter(ok_chunks(&[LOG, DONE]));
        let summary = forward_events(source, tx).await.unwrap();
        assert_eq!(summary.delivered, 0);
    }
}
