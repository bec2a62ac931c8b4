//! Record parsing logic
//!
//! Line classification and record-to-event parsing live here; the stateful
//! chunk decoder that feeds them is in [`decoder`].

mod decoder;

pub use decoder::RecordDecoder;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::sse::events::{ErrorEvent, RecordLine, RecordParseError, StreamEvent, RECORD_PREFIX};
use crate::sse::payloads::RecordEnvelope;

/// Classify one complete line (without its newline).
///
/// A trailing `\r` is tolerated so CRLF-framed bodies decode the same way.
pub fn parse_record_line(line: &str) -> RecordLine<'_> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    match line.strip_prefix(RECORD_PREFIX) {
        Some(rest) => {
            let payload = rest.trim();
            if payload.is_empty() {
                RecordLine::Blank
            } else {
                RecordLine::Record(payload)
            }
        }
        None => RecordLine::Ignored,
    }
}

/// Parse one record payload into a typed event.
pub fn parse_stream_event(payload: &str) -> Result<StreamEvent, RecordParseError> {
    let envelope: RecordEnvelope = serde_json::from_str(payload)
        .map_err(|e| RecordParseError::InvalidJson(e.to_string()))?;

    match envelope.kind.as_str() {
        "log" => payload_as(&envelope).map(StreamEvent::Log),
        "done" => payload_as(&envelope).map(StreamEvent::Done),
        "error" => payload_as::<ErrorEvent>(&envelope).map(StreamEvent::Error),
        _ => Ok(StreamEvent::Unknown {
            kind: envelope.kind,
            data: envelope.data,
        }),
    }
}

fn payload_as<T: DeserializeOwned>(envelope: &RecordEnvelope) -> Result<T, RecordParseError> {
    Deserialize::deserialize(&envelope.data).map_err(|e| RecordParseError::InvalidPayload {
        kind: envelope.kind.clone(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogCategory;

    #[test]
    fn test_parse_record_line_record() {
        assert_eq!(
            parse_record_line(r#"data: {"kind":"done"}"#),
            RecordLine::Record(r#"{"kind":"done"}"#)
        );
    }

    #[test]
    fn test_parse_record_line_trims_payload() {
        assert_eq!(
            parse_record_line("data:    {\"kind\":\"done\"}   \r"),
            RecordLine::Record(r#"{"kind":"done"}"#)
        );
    }

    #[test]
    fn test_parse_record_line_blank() {
        assert_eq!(parse_record_line("data: "), RecordLine::Blank);
        assert_eq!(parse_record_line("data:    "), RecordLine::Blank);
    }

    #[test]
    fn test_parse_record_line_ignored() {
        assert_eq!(parse_record_line(""), RecordLine::Ignored);
        assert_eq!(parse_record_line(": keep-alive"), RecordLine::Ignored);
        assert_eq!(parse_record_line("event: message"), RecordLine::Ignored);
        // Prefix requires the space after the colon
        assert_eq!(parse_record_line(r#"data:{"kind":"done"}"#), RecordLine::Ignored);
        assert_eq!(parse_record_line(r#" data: {"kind":"done"}"#), RecordLine::Ignored);
    }

    #[test]
    fn test_parse_log_event() {
        let payload = r#"{"kind":"log","data":{"timestamp":"t","type":"tool_call","summary":"s"}}"#;
        match parse_stream_event(payload).unwrap() {
            StreamEvent::Log(record) => {
                assert_eq!(record.timestamp, "t");
                assert_eq!(record.category, LogCategory::ToolCall);
                assert_eq!(record.summary, "s");
                assert!(record.details.is_none());
            }
            other => panic!("Expected Log event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_done_event_with_books() {
        let payload = r#"{"type":"done","data":{"message":"おすすめです","books":[
            {"id":"1","title":"A","authors":["x","y"],"publisher":null,"year":"2020",
             "isbn":null,"description":null,"owner_count":3,"cinii_url":"https://e/1"}
        ]}}"#;
        match parse_stream_event(payload).unwrap() {
            StreamEvent::Done(response) => {
                assert_eq!(response.message, "おすすめです");
                let books = response.books.unwrap();
                assert_eq!(books.len(), 1);
                assert_eq!(books[0].authors, vec!["x", "y"]);
                assert_eq!(books[0].owner_count, Some(3));
            }
            other => panic!("Expected Done event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_event() {
        let event = parse_stream_event(r#"{"kind":"error","data":{"message":"x"}}"#).unwrap();
        assert_eq!(
            event,
            StreamEvent::Error(ErrorEvent {
                message: "x".to_string()
            })
        );
    }

    #[test]
    fn test_parse_unknown_kind_passes_through() {
        let event = parse_stream_event(r#"{"kind":"progress","data":{"pct":40}}"#).unwrap();
        match event {
            StreamEvent::Unknown { kind, data } => {
                assert_eq!(kind, "progress");
                assert_eq!(data["pct"], 40);
            }
            other => panic!("Expected Unknown event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_stream_event("{bad json").unwrap_err();
        assert!(matches!(err, RecordParseError::InvalidJson(_)));

        let err = parse_stream_event(r#""just a string""#).unwrap_err();
        assert!(matches!(err, RecordParseError::InvalidJson(_)));
    }

    #[test]
    fn test_parse_invalid_payload_shape() {
        let err = parse_stream_event(r#"{"kind":"done","data":{"books":null}}"#).unwrap_err();
        match err {
            RecordParseError::InvalidPayload { kind, .. } => assert_eq!(kind, "done"),
            other => panic!("Expected InvalidPayload, got {:?}", other),
        }

        let err = parse_stream_event(r#"{"kind":"error"}"#).unwrap_err();
        assert!(matches!(err, RecordParseError::InvalidPayload { .. }));
    }
}
