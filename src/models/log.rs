use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category tag of a backend log record.
///
/// The backend historically named the model and catalog steps after their
/// vendors (`openai_*`, `cinii_*`); both spellings decode to the same variant.
/// Anything else decodes as [`LogCategory::Unknown`] so a new backend step
/// never breaks an older client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogCategory {
    FrontendRequest,
    #[serde(alias = "openai_request")]
    ModelRequest,
    #[serde(alias = "openai_response")]
    ModelResponse,
    ToolCall,
    ToolResult,
    #[serde(alias = "cinii_request")]
    CatalogRequest,
    #[serde(alias = "cinii_response")]
    CatalogResponse,
    Error,
    #[serde(other)]
    Unknown,
}

impl LogCategory {
    /// Returns the canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogCategory::FrontendRequest => "frontend_request",
            LogCategory::ModelRequest => "model_request",
            LogCategory::ModelResponse => "model_response",
            LogCategory::ToolCall => "tool_call",
            LogCategory::ToolResult => "tool_result",
            LogCategory::CatalogRequest => "catalog_request",
            LogCategory::CatalogResponse => "catalog_response",
            LogCategory::Error => "error",
            LogCategory::Unknown => "unknown",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LogCategory::Error)
    }
}

impl std::fmt::Display for LogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observability record emitted by the backend while it works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Timestamp exactly as sent; see [`LogRecord::parsed_timestamp`]
    pub timestamp: String,
    #[serde(rename = "type")]
    pub category: LogCategory,
    pub summary: String,
    /// Free-form detail payload, only for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

impl LogRecord {
    /// Parse the timestamp as UTC.
    ///
    /// Accepts RFC 3339 and the naive ISO-8601 form the backend produces
    /// (`2024-05-01T12:34:56.789012`), which is read as UTC.
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
