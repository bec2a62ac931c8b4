use serde::{Deserialize, Serialize};

use super::{deserialize_id, deserialize_nullable_vec};

/// A single catalog entry returned by the backend's book search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Catalog identifier
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub title: String,
    /// Author names in catalog order
    #[serde(default, deserialize_with = "deserialize_nullable_vec")]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    /// Publication year as the catalog reports it (may be a range like "2019-2020")
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Number of libraries holding the book, when known
    #[serde(default)]
    pub owner_count: Option<u64>,
    /// Canonical catalog page for the book
    #[serde(rename = "cinii_url", alias = "url")]
    pub url: String,
}

impl Book {
    /// Authors joined for a single display line.
    pub fn author_line(&self) -> String {
        self.authors.join(", ")
    }

    /// Publisher, year and holder count joined with " / ", skipping unknowns.
    pub fn meta_line(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(ref publisher) = self.publisher {
            parts.push(publisher.clone());
        }
        if let Some(ref year) = self.year {
            parts.push(year.clone());
        }
        if let Some(count) = self.owner_count {
            parts.push(format!("held by {} libraries", count));
        }
        parts.join(" / ")
    }
}
