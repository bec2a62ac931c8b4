//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use bytes::Bytes;

/// A `log` record line with the given category and summary.
pub fn log_line(category: &str, summary: &str) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({
            "kind": "log",
            "data": {
                "timestamp": "2024-05-01T12:00:00.000000",
                "type": category,
                "summary": summary,
            }
        })
    )
}

/// A `done` record line; `books` is serialized as given.
pub fn done_line(message: &str, books: serde_json::Value) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({
            "kind": "done",
            "data": { "message": message, "books": books }
        })
    )
}

/// An `error` record line.
pub fn error_line(message: &str) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({ "kind": "error", "data": { "message": message } })
    )
}

/// One catalog entry as the backend sends it.
pub fn book_json(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "authors": ["夏目漱石"],
        "publisher": "岩波書店",
        "year": "1990",
        "isbn": null,
        "description": null,
        "owner_count": 120,
        "cinii_url": format!("https://ci.nii.ac.jp/ncid/{}", id),
    })
}

/// Split `body` into chunks of at most `size` bytes, ignoring char boundaries.
pub fn chunked(body: &str, size: usize) -> Vec<Bytes> {
    body.as_bytes()
        .chunks(size)
        .map(Bytes::copy_from_slice)
        .collect()
}
