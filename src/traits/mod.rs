//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, streaming POST)

pub mod http;

pub use http::{BodyStream, Headers, HttpClient, HttpError, Response};
