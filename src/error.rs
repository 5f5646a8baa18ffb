//! Error types for Code Museum.

use thiserror::Error;

/// Common error type for Code Museum.
#[derive(Error, Debug)]
pub enum MuseumError {
    /// Database error.
    ///
    /// Wraps errors from any database backend. Errors from sqlx are
    /// converted automatically.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (missing or unknown acting user, bad credentials).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP transport error seen by the client.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API server answered with an error status.
    #[error("{message} (HTTP {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the server's error body.
        message: String,
    },
}

impl MuseumError {
    /// HTTP status reported by the server, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            MuseumError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for MuseumError {
    fn from(e: sqlx::Error) -> Self {
        MuseumError::Database(e.to_string())
    }
}

impl From<reqwest::Error> for MuseumError {
    fn from(e: reqwest::Error) -> Self {
        MuseumError::Http(e.to_string())
    }
}

/// Result type alias for Code Museum operations.
pub type Result<T> = std::result::Result<T, MuseumError>;
