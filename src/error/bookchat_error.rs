//! Unified error type for the book chat client.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::stream::StreamError;
use crate::config::ConfigError;

/// Every failure a [`BackendClient`](crate::client::BackendClient) call can
/// surface.
#[derive(Debug)]
pub enum BookChatError {
    /// HTTP-level failures (connection, status, response body).
    Network(NetworkError),

    /// Failures of a streaming response.
    Stream(StreamError),

    /// Invalid client configuration.
    Config(ConfigError),
}

impl BookChatError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            BookChatError::Network(err) => match err {
                NetworkError::HttpStatus { status, .. } if *status >= 500 => ErrorCategory::Server,
                NetworkError::HttpStatus { .. } => ErrorCategory::Client,
                NetworkError::InvalidResponse { .. } => ErrorCategory::Client,
                _ => ErrorCategory::Network,
            },
            BookChatError::Stream(err) => match err {
                StreamError::TransportUnavailable { .. } | StreamError::ReadFailed { .. } => {
                    ErrorCategory::Network
                }
                StreamError::MissingTerminal => ErrorCategory::Client,
            },
            BookChatError::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            BookChatError::Network(err) => err.is_retryable(),
            BookChatError::Stream(err) => err.is_retryable(),
            BookChatError::Config(_) => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            BookChatError::Network(err) => err.user_message(),
            BookChatError::Stream(err) => err.user_message(),
            BookChatError::Config(err) => format!("Configuration error: {}", err),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            BookChatError::Network(err) => err.error_code(),
            BookChatError::Stream(err) => err.error_code(),
            BookChatError::Config(_) => "E_CONFIG",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for BookChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookChatError::Network(err) => write!(f, "{}", err),
            BookChatError::Stream(err) => write!(f, "{}", err),
            BookChatError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for BookChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookChatError::Network(err) => Some(err),
            BookChatError::Stream(err) => Some(err),
            BookChatError::Config(err) => Some(err),
        }
    }
}

impl From<NetworkError> for BookChatError {
    fn from(err: NetworkError) -> Self {
        BookChatError::Network(err)
    }
}

impl From<StreamError> for BookChatError {
    fn from(err: StreamError) -> Self {
        BookChatError::Stream(err)
    }
}

impl From<ConfigError> for BookChatError {
    fn from(err: ConfigError) -> Self {
        BookChatError::Config(err)
    }
}

impl From<serde_json::Error> for BookChatError {
    fn from(err: serde_json::Error) -> Self {
        BookChatError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}
