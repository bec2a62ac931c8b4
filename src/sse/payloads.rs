//! Record envelope deserialization
//!
//! Every record is `{ kind, data }`; the backend has also sent the same
//! envelope as `{ type, payload }`, so both spellings are accepted.

use serde::Deserialize;

/// Outer envelope of one record
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RecordEnvelope {
    #[serde(alias = "type")]
    pub kind: String,
    #[serde(default, alias = "payload")]
    pub data: serde_json::Value,
}
