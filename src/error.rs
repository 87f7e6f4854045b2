//! Error types for the SSDB client
//!
//! One closed enum covers every failure the client can report, so callers
//! branch on the variant instead of matching on message text.

use thiserror::Error;

/// Result type alias using SsdbError
pub type Result<T> = std::result::Result<T, SsdbError>;

/// Unified error type for client operations
#[derive(Debug, Error)]
pub enum SsdbError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Corrupt frame: {0}")]
    CorruptFrame(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Bad response to {command}: {reason}")]
    BadResponse { command: String, reason: String },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SsdbError {
    /// Whether this error leaves the connection unusable.
    ///
    /// I/O failures and corrupt frames both lose track of where the next
    /// response starts in the stream buffer.
    pub fn is_fatal(&self) -> bool {
        matches!(self, SsdbError::Io(_) | SsdbError::CorruptFrame(_))
    }

    pub(crate) fn bad_response(command: &str, reason: impl Into<String>) -> Self {
        SsdbError::BadResponse {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}
