//! Plain-text rendering of chat output for the terminal.

use std::fmt::Write;

use crate::models::{Book, ChatResponse, LogRecord};

/// One progress line for a log record, e.g. `[tool_call] 検索: 村上春樹`.
pub fn log_line(record: &LogRecord) -> String {
    let time = record
        .parsed_timestamp()
        .map(|t| t.format("%H:%M:%S").to_string());
    match time {
        Some(time) => format!("{} [{}] {}", time, record.category, record.summary),
        None => format!("[{}] {}", record.category, record.summary),
    }
}

/// Numbered book list, empty string when there are no books.
pub fn book_list(books: &[Book]) -> String {
    let mut out = String::new();
    for (i, book) in books.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. {}", i + 1, book.title);
        let authors = book.author_line();
        if !authors.is_empty() {
            let _ = writeln!(out, "    {}", authors);
        }
        let meta = book.meta_line();
        if !meta.is_empty() {
            let _ = writeln!(out, "    {}", meta);
        }
        if !book.url.is_empty() {
            let _ = writeln!(out, "    {}", book.url);
        }
    }
    out
}

/// The answer text followed by its books.
pub fn answer(response: &ChatResponse) -> String {
    let books = book_list(response.books());
    if books.is_empty() {
        response.message.clone()
    } else {
        format!("{}\n\n{}", response.message, books.trim_end())
    }
}
