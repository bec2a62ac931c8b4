//! Network-related error types.
//!
//! Errors raised while talking HTTP to the backend, before or outside of
//! stream decoding.

use std::fmt;

use crate::traits::HttpError;

/// Network-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed {
        url: String,
        message: String,
    },

    /// Request timed out.
    Timeout {
        operation: String,
    },

    /// HTTP status error (non-2xx response).
    HttpStatus {
        status: u16,
        message: String,
    },

    /// Response body did not have the expected shape.
    InvalidResponse {
        message: String,
    },

    /// Generic network error.
    Other {
        message: String,
    },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                // Retry server errors and some specific client errors
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach the book search server. Is it running?".to_string()
            }
            NetworkError::Timeout { operation } => {
                format!("The {} timed out. The server may be slow or unreachable.", operation)
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                400 | 422 => "The request was rejected by the server.".to_string(),
                404 => "The chat endpoint was not found. Check the server URL.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => {
                    "The server is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("The server returned an error (HTTP {}).", status),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received an invalid response from the server.".to_string()
            }
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => write!(f, "{} timed out", operation),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a transport error into a NetworkError.
pub fn classify_http_error(err: &HttpError, url: &str) -> NetworkError {
    match err {
        HttpError::ConnectionFailed(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: message.clone(),
        },
        HttpError::Timeout(_) => NetworkError::Timeout {
            operation: "request".to_string(),
        },
        HttpError::ServerError { status, message } => NetworkError::HttpStatus {
            status: *status,
            message: message.clone(),
        },
        HttpError::InvalidUrl(message) => NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: message.clone(),
        },
        HttpError::Io(message) | HttpError::Other(message) => NetworkError::Other {
            message: message.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_is_retryable() {
        let err = NetworkError::ConnectionFailed {
            url: "http://localhost:8000/chat".to_string(),
            message: "Connection refused".to_string(),
        };
        assert!(err.is_retryable());
        assert_eq!(err.error_code(), "E_NET_CONN");
        assert!(err.to_string().contains("localhost:8000"));
    }

    #[test]
    fn test_http_status_retryable_for_server_errors() {
        let retryable = [500, 502, 503, 429, 408];
        for status in retryable {
            let err = NetworkError::HttpStatus {
                status,
                message: String::new(),
            };
            assert!(err.is_retryable(), "status {} should retry", status);
        }

        let permanent = [400, 404, 422];
        for status in permanent {
            let err = NetworkError::HttpStatus {
                status,
                message: String::new(),
            };
            assert!(!err.is_retryable(), "status {} should not retry", status);
        }
    }

    #[test]
    fn test_user_messages() {
        let err = NetworkError::HttpStatus {
            status: 503,
            message: "down".to_string(),
        };
        assert!(err.user_message().contains("try again later"));

        let err = NetworkError::Timeout {
            operation: "chat request".to_string(),
        };
        assert!(err.user_message().contains("chat request"));
    }

    #[test]
    fn test_classify_http_error() {
        let url = "http://localhost:8000/chat";

        let err = classify_http_error(&HttpError::ConnectionFailed("refused".to_string()), url);
        assert!(matches!(err, NetworkError::ConnectionFailed { ref url, .. } if url.ends_with("/chat")));

        let err = classify_http_error(&HttpError::Timeout("30s".to_string()), url);
        assert!(matches!(err, NetworkError::Timeout { .. }));

        let err = classify_http_error(
            &HttpError::ServerError {
                status: 502,
                message: "bad gateway".to_string(),
            },
            url,
        );
        assert_eq!(
            err,
            NetworkError::HttpStatus {
                status: 502,
                message: "bad gateway".to_string()
            }
        );

        let err = classify_http_error(&HttpError::Io("reset".to_string()), url);
        assert_eq!(err.error_code(), "E_NET_OTHER");
    }
}
