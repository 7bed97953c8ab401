//! Error types for Stockroom
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Stockroom operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, credential storage, request dispatch, and the
/// token refresh lifecycle.
#[derive(Error, Debug)]
pub enum StockroomError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal authentication failure: the backend rejected a request
    /// again after it was already replayed with a refreshed credential
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The refresh exchange failed and the session was invalidated.
    /// Both stored credentials are cleared before this is returned.
    #[error("Session expired: {0}")]
    SessionExpired(String),

    /// Non-authorization error response from the backend, passed through
    /// to the caller untouched
    #[error("Backend returned HTTP {status}: {message}")]
    Backend {
        /// HTTP status code of the response
        status: u16,
        /// Response body, verbatim
        message: String,
    },

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing errors
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for Stockroom operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
