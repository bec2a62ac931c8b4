//! ClientConfig::from_env against the real process environment.

use std::time::Duration;

use serial_test::serial;

use bookchat::client::BackendClient;
use bookchat::config::{ClientConfig, ConfigError, ENV_API_URL, ENV_CONNECT_TIMEOUT};
use bookchat::error::BookChatError;

fn clear_env() {
    std::env::remove_var(ENV_API_URL);
    std::env::remove_var(ENV_CONNECT_TIMEOUT);
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url, "http://localhost:8000");
    assert_eq!(config.connect_timeout, None);
}

#[test]
#[serial]
fn test_from_env_reads_variables() {
    clear_env();
    std::env::set_var(ENV_API_URL, "https://books.example.org/api/");
    std::env::set_var(ENV_CONNECT_TIMEOUT, "3");

    let config = ClientConfig::from_env().unwrap();
    assert_eq!(config.base_url, "https://books.example.org/api");
    assert_eq!(config.connect_timeout, Some(Duration::from_secs(3)));
    assert_eq!(config.endpoint("/chat"), "https://books.example.org/api/chat");

    let client = BackendClient::from_env().unwrap();
    assert_eq!(client.base_url(), "https://books.example.org/api");
    clear_env();
}

#[test]
#[serial]
fn test_from_env_rejects_bad_values() {
    clear_env();
    std::env::set_var(ENV_API_URL, "books.example.org");
    assert!(matches!(
        ClientConfig::from_env(),
        Err(ConfigError::InvalidUrl { .. })
    ));

    let err = BackendClient::from_env().unwrap_err();
    assert!(matches!(err, BookChatError::Config(_)));

    clear_env();
    std::env::set_var(ENV_CONNECT_TIMEOUT, "0");
    assert!(matches!(
        ClientConfig::from_env(),
        Err(ConfigError::InvalidTimeout { .. })
    ));
    clear_env();
}
