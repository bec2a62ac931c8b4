//! bookchat - streaming client for a conversational book search backend
//!
//! The backend answers a question in natural language, streaming progress
//! records while it consults a language model and a library catalog. This
//! crate decodes that stream into typed events ([`sse`]), talks to the
//! backend ([`client`]), and ships a small terminal front end.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod conversation;
pub mod error;
pub mod logging;
pub mod models;
pub mod prelude;
pub mod sse;
pub mod traits;
