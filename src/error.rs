//! Error types for Blogun.

use thiserror::Error;

/// Common error type for Blogun.
#[derive(Error, Debug)]
pub enum BlogError {
    /// Database error.
    ///
    /// Wraps errors from the sqlx backend; converted automatically.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    ///
    /// The message is user-facing and rendered inline by clients.
    #[error("{0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Object storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BlogError {
    fn from(e: sqlx::Error) -> Self {
        BlogError::Database(e.to_string())
    }
}

/// Result type alias for Blogun operations.
pub type Result<T> = std::result::Result<T, BlogError>;
