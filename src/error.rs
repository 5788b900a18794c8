//! Error types for the roster client

use thiserror::Error;

/// Roster client error
#[derive(Debug, Error)]
pub enum RosterError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server returned an error
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Student not found
    #[error("Student not found: {0}")]
    NotFound(String),

    /// Input rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// Filesystem error (export)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;
