/*!
 * Error types for the termbatch application.
 *
 * This module contains custom error types for the different layers of the
 * publish flow, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when talking to the Wikibase API
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Error when sending the request fails (network, timeout, TLS)
    #[error("API request failed: {0}")]
    Request(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    Parse(String),

    /// Non-success HTTP status
    #[error("API responded with HTTP {status_code}: {message}")]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Error object returned by the API itself
    #[error("API error {code}: {info}")]
    Server {
        /// Machine-readable error code (e.g. "maxlag", "permissiondenied")
        code: String,
        /// Human-readable error description
        info: String,
    },

    /// The requested entity does not exist
    #[error("Entity {0} does not exist")]
    MissingEntity(String),
}

impl ApiError {
    /// The most specific message available for display to a user.
    ///
    /// Server-provided info wins, then the server error code, then the
    /// generic display text.
    pub fn detail(&self) -> String {
        match self {
            Self::Server { info, .. } if !info.trim().is_empty() => info.clone(),
            Self::Server { code, .. } if !code.trim().is_empty() => code.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors that end a single publish attempt
#[derive(Error, Debug)]
pub enum SubmitError {
    /// No `Q<digits>` id in the configuration or the location
    #[error("Cannot detect entity ID (Q-id).")]
    EntityIdNotFound,

    /// Reading the authoritative state failed
    #[error("Could not load current terms: {0}")]
    Fetch(#[source] ApiError),

    /// The write was rejected or never reached the server
    #[error("Save failed: {0}")]
    Write(#[source] ApiError),

    /// Another submission is in flight on the same action
    #[error("A submission is already in progress")]
    Busy,
}

impl SubmitError {
    /// User-facing notice text for this failure
    pub fn notice(&self) -> String {
        match self {
            Self::Fetch(e) => format!("Could not load current terms: {}", e.detail()),
            Self::Write(e) => format!("Save failed: {}", e.detail()),
            other => other.to_string(),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the API layer
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Error from a publish attempt
    #[error("Submit error: {0}")]
    Submit(#[from] SubmitError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
