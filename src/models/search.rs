use serde::{Deserialize, Serialize};

use super::Book;

/// Default number of books a search asks for.
pub const DEFAULT_SEARCH_COUNT: u32 = 10;

fn default_count() -> u32 {
    DEFAULT_SEARCH_COUNT
}

/// Request body for `/books/search`.
///
/// Every criterion is optional; unset ones are left out of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSearchParams {
    /// Free-text query
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// First publication year, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_from: Option<i32>,
    /// Last publication year, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_to: Option<i32>,
    #[serde(default = "default_count")]
    pub count: u32,
}

impl Default for BookSearchParams {
    fn default() -> Self {
        Self {
            query: None,
            title: None,
            author: None,
            publisher: None,
            year_from: None,
            year_to: None,
            count: DEFAULT_SEARCH_COUNT,
        }
    }
}

impl BookSearchParams {
    /// Free-text search with the default result count.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    /// Restrict to a publication year range; either end may be open.
    pub fn with_years(mut self, from: Option<i32>, to: Option<i32>) -> Self {
        self.year_from = from;
        self.year_to = to;
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// Response body of `/books/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSearchResponse {
    /// Total hits in the catalog, which may exceed `books.len()`
    pub total: u64,
    #[serde(default)]
    pub books: Vec<Book>,
    /// Query parameters the backend actually sent to the catalog
    #[serde(default)]
    pub query_used: serde_json::Map<String, serde_json::Value>,
}

/// Structured failure the backend puts in an error body's `detail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Classification such as `timeout`, `rate_limit` or `invalid_input`
    pub error_type: String,
    pub message: String,
    #[serde(default)]
    pub retryable: bool,
}

/// Error body of a non-2xx backend response: `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    pub detail: DetailKind,
}

/// Either the structured detail, a plain message, or anything else
/// (e.g. a list of validation errors).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DetailKind {
    Structured(ErrorDetail),
    Text(String),
    Other(serde_json::Value),
}
