//! Internal session error type.

use thiserror::Error;

/// Failure raised by the session's persistence glue.
///
/// These never reach the transcript: the session logs a warning and keeps
/// going with the in-memory state as the source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A snapshot read or write against the state store failed.
    #[error("storage failure for `{key}`: {message}")]
    Storage {
        /// Storage key involved.
        key: String,
        /// Underlying store message.
        message: String,
    },
}

impl SessionError {
    /// Wraps a store-level message with its key.
    pub fn storage(key: &str, message: impl Into<String>) -> Self {
        Self::Storage {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
