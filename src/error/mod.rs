// Error types for clixaw
// Author: kelexine (https://github.com/kelexine)

use thiserror::Error;

#[derive(Error, Debug)]
pub enum XawError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not connect to API. Check your internet connection and API URL.")]
    Connection(#[source] reqwest::Error),

    #[error("API request timed out. Please try again.")]
    Timeout(#[source] reqwest::Error),

    #[error("API returned error {0}")]
    Api(u16),

    #[error("API returned empty response")]
    EmptyResponse,

    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("No history entry found at index {0}")]
    HistoryIndex(usize),

    #[error("History entry has no command")]
    EmptyHistoryEntry,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for XawError {
    /// Sorts transport failures into the categories the CLI reports to users.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            XawError::Timeout(err)
        } else if err.is_connect() {
            XawError::Connection(err)
        } else if let Some(status) = err.status() {
            XawError::Api(status.as_u16())
        } else {
            XawError::Http(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, XawError>;
