//! Departure monitor client error types.

use std::fmt;

/// Errors from fetching a departure monitor response.
#[derive(Debug)]
pub enum TfnswError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// The provider rejected the API key (HTTP 401); carries the response body
    Unauthorized { message: String },

    /// Response decoded but had no `stopEvents` key
    MissingStopEvents,

    /// Client could not be set up from the given configuration
    NotConfigured(String),

    /// Recorded response could not be loaded
    Replay(String),
}

impl fmt::Display for TfnswError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TfnswError::Http(e) => write!(f, "HTTP error: {e}"),
            TfnswError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            TfnswError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            TfnswError::Unauthorized { message } => {
                write!(f, "unauthorized (invalid API key)")?;
                if !message.is_empty() {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
            TfnswError::MissingStopEvents => {
                write!(f, "'stopEvents' not found in response")
            }
            TfnswError::NotConfigured(msg) => write!(f, "not configured: {msg}"),
            TfnswError::Replay(msg) => write!(f, "replay data error: {msg}"),
        }
    }
}

impl std::error::Error for TfnswError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TfnswError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TfnswError {
    fn from(err: reqwest::Error) -> Self {
        TfnswError::Http(err)
    }
}
