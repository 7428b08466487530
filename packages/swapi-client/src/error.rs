//! Error types for the SWAPI client.

use thiserror::Error;

/// Result type for SWAPI client operations.
pub type Result<T> = std::result::Result<T, SwapiError>;

/// SWAPI client errors.
///
/// Callers treat `Transport` and `Decode` the same way: either one fails the
/// fetch it happened in, and nothing is retried.
#[derive(Debug, Error)]
pub enum SwapiError {
    /// Network error (DNS, connection refused, aborted request)
    #[error("Network error: {0}")]
    Transport(String),

    /// Body could not be decoded as a starship record
    #[error("Decode error: {0}")]
    Decode(String),

    /// A fetch procedure was resumed with a value it was not waiting for
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl SwapiError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for SwapiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
